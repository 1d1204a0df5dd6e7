// TokenDeck - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "TokenDeck";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "TokenDeck";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Backend connection
// =============================================================================

/// Default backend base URL when neither the CLI nor config.toml names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default timeout applied to every backend request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable request timeout (seconds).
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable request timeout (seconds).
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// Pagination
// =============================================================================

/// Number of rows shown per table page. Shared by the logs and tokens
/// tables, and it must match the backend's page size: backend page `p`
/// covers rows `[p * ITEMS_PER_PAGE, (p + 1) * ITEMS_PER_PAGE)`.
pub const ITEMS_PER_PAGE: usize = 10;

/// Minimum user-configurable page size (a zero page size breaks the
/// page-window maths).
pub const MIN_ITEMS_PER_PAGE: usize = 1;

/// Maximum user-configurable page size.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

// =============================================================================
// Backend status codes
// =============================================================================

/// Token is active and usable.
pub const TOKEN_STATUS_ENABLED: i32 = 1;

/// Token has been disabled by the operator.
pub const TOKEN_STATUS_DISABLED: i32 = 2;

/// Token passed its expiry timestamp.
pub const TOKEN_STATUS_EXPIRED: i32 = 3;

/// Token ran out of quota.
pub const TOKEN_STATUS_EXHAUSTED: i32 = 4;

/// Usage-log entry recording a quota top-up.
pub const LOG_TYPE_TOPUP: i32 = 1;

/// Usage-log entry recording quota consumption.
pub const LOG_TYPE_USAGE: i32 = 2;

/// Sentinel expiry timestamp meaning the token never expires.
pub const TOKEN_NEVER_EXPIRES: i64 = -1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
