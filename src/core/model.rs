// TokenDeck - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
// These types are the shared vocabulary across all layers, and their
// serde shapes mirror the backend's JSON wire format exactly.

use crate::core::pager::PagedItem;
use crate::util::constants;
use serde::Deserialize;

// =============================================================================
// Response envelope
// =============================================================================

/// The backend's uniform response wrapper.
///
/// Every endpoint answers `{success, message, data}`; `data` is absent or
/// null on failures and on acknowledge-only endpoints (delete, logout).
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,

    /// Backend-provided human-readable message. Shown to the operator
    /// verbatim when `success` is false.
    #[serde(default)]
    pub message: String,

    pub data: Option<T>,
}

// =============================================================================
// Usage log entry
// =============================================================================

/// A single usage-log row as returned by `GET /api/log/self/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    /// Backend-assigned identifier. The client never generates ids.
    pub id: i64,

    #[serde(default)]
    pub user_id: i64,

    /// Creation time as unix seconds.
    #[serde(default)]
    pub created_time: i64,

    /// Raw log-type code; see `LogKind`.
    #[serde(rename = "type", default)]
    pub log_type: i32,

    #[serde(default)]
    pub content: String,

    /// Local-only tombstone. Never sent by the backend; set after a
    /// successful delete so the row disappears from the rendered page
    /// while pagination maths stay aligned with the fetched collection.
    #[serde(default)]
    pub deleted: bool,
}

impl Log {
    /// Classified log type for display.
    pub fn kind(&self) -> LogKind {
        LogKind::from_code(self.log_type)
    }
}

/// Classified usage-log types, derived from the raw wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Quota top-up.
    TopUp,
    /// Quota consumption.
    Usage,
    /// Any code this build does not know about.
    Unknown,
}

impl LogKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            constants::LOG_TYPE_TOPUP => LogKind::TopUp,
            constants::LOG_TYPE_USAGE => LogKind::Usage,
            _ => LogKind::Unknown,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::TopUp => "Top-up",
            LogKind::Usage => "Usage",
            LogKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sortable columns of the logs table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSortKey {
    CreatedTime,
    Kind,
    Content,
}

impl PagedItem for Log {
    type SortKey = LogSortKey;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self) {
        self.deleted = true;
    }

    fn sort_text(&self, key: LogSortKey) -> String {
        match key {
            LogSortKey::CreatedTime => self.created_time.to_string(),
            LogSortKey::Kind => self.log_type.to_string(),
            LogSortKey::Content => self.content.clone(),
        }
    }
}

// =============================================================================
// API token
// =============================================================================

/// An API token row as returned by `GET /api/token/`.
///
/// `key` is the secret credential; it is copied to the clipboard on
/// request but never logged.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub id: i64,

    #[serde(default)]
    pub user_id: i64,

    #[serde(default)]
    pub key: String,

    /// Raw status code; see `TokenStatus`.
    #[serde(default)]
    pub status: i32,

    #[serde(default)]
    pub name: String,

    /// Creation time as unix seconds.
    #[serde(default)]
    pub created_time: i64,

    /// Last-used time as unix seconds.
    #[serde(default)]
    pub accessed_time: i64,

    /// Expiry as unix seconds; `TOKEN_NEVER_EXPIRES` (-1) means never.
    #[serde(default)]
    pub expired_time: i64,

    #[serde(default)]
    pub remain_quota: i64,

    #[serde(default)]
    pub unlimited_quota: bool,

    /// Local-only tombstone; see `Log::deleted`.
    #[serde(default)]
    pub deleted: bool,
}

impl Token {
    /// Classified status for display.
    pub fn status_kind(&self) -> TokenStatus {
        TokenStatus::from_code(self.status)
    }

    /// True when this token never expires.
    pub fn never_expires(&self) -> bool {
        self.expired_time == constants::TOKEN_NEVER_EXPIRES
    }

    /// Name for table display; unnamed tokens render a placeholder dash.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "—"
        } else {
            &self.name
        }
    }
}

/// Classified token statuses, derived from the raw wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Enabled,
    Disabled,
    Expired,
    Exhausted,
    Unknown,
}

impl TokenStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            constants::TOKEN_STATUS_ENABLED => TokenStatus::Enabled,
            constants::TOKEN_STATUS_DISABLED => TokenStatus::Disabled,
            constants::TOKEN_STATUS_EXPIRED => TokenStatus::Expired,
            constants::TOKEN_STATUS_EXHAUSTED => TokenStatus::Exhausted,
            _ => TokenStatus::Unknown,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TokenStatus::Enabled => "Enabled",
            TokenStatus::Disabled => "Disabled",
            TokenStatus::Expired => "Expired",
            TokenStatus::Exhausted => "Exhausted",
            TokenStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sortable columns of the tokens table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSortKey {
    Id,
    Name,
    Status,
    CreatedTime,
    AccessedTime,
}

impl PagedItem for Token {
    type SortKey = TokenSortKey;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self) {
        self.deleted = true;
    }

    fn sort_text(&self, key: TokenSortKey) -> String {
        match key {
            TokenSortKey::Id => self.id.to_string(),
            TokenSortKey::Name => self.name.clone(),
            TokenSortKey::Status => self.status.to_string(),
            TokenSortKey::CreatedTime => self.created_time.to_string(),
            TokenSortKey::AccessedTime => self.accessed_time.to_string(),
        }
    }
}

// =============================================================================
// Timestamp formatting
// =============================================================================

/// Render a unix-seconds timestamp for table display.
///
/// Zero and negative values (unset fields, the never-expires sentinel)
/// render as a dash rather than the epoch.
pub fn format_timestamp(secs: i64) -> String {
    if secs <= 0 {
        return "—".to_string();
    }
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "—".to_string(),
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_with_data() {
        let body = r#"{"success": true, "message": "", "data": [{"id": 7, "type": 2, "content": "used 1 quota", "created_time": 1700000000}]}"#;
        let envelope: Envelope<Vec<Log>> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].id, 7);
        assert_eq!(data[0].kind(), LogKind::Usage);
        assert!(!data[0].deleted);
    }

    #[test]
    fn test_envelope_failure_without_data() {
        let body = r#"{"success": false, "message": "no such user"}"#;
        let envelope: Envelope<Vec<Token>> = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "no such user");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_token_decodes_backend_shape() {
        let body = r#"{
            "id": 3, "user_id": 1, "key": "abcdef0123456789abcdef0123456789",
            "status": 1, "name": "ci", "created_time": 1690000000,
            "accessed_time": 1690000500, "expired_time": -1,
            "remain_quota": 100, "unlimited_quota": false
        }"#;
        let token: Token = serde_json::from_str(body).unwrap();
        assert_eq!(token.status_kind(), TokenStatus::Enabled);
        assert!(token.never_expires());
        assert!(!token.deleted);
    }

    #[test]
    fn test_unnamed_token_displays_placeholder() {
        let body = r#"{"id": 5, "key": "k", "status": 1}"#;
        let token: Token = serde_json::from_str(body).unwrap();
        assert_eq!(token.display_name(), "—");

        let body = r#"{"id": 6, "key": "k", "status": 1, "name": "ci"}"#;
        let token: Token = serde_json::from_str(body).unwrap();
        assert_eq!(token.display_name(), "ci");
    }

    #[test]
    fn test_status_codes_round_trip_labels() {
        assert_eq!(TokenStatus::from_code(1).label(), "Enabled");
        assert_eq!(TokenStatus::from_code(2).label(), "Disabled");
        assert_eq!(TokenStatus::from_code(3).label(), "Expired");
        assert_eq!(TokenStatus::from_code(4).label(), "Exhausted");
        assert_eq!(TokenStatus::from_code(99).label(), "Unknown");
        assert_eq!(LogKind::from_code(1), LogKind::TopUp);
        assert_eq!(LogKind::from_code(0), LogKind::Unknown);
    }

    #[test]
    fn test_format_timestamp_handles_sentinels() {
        assert_eq!(format_timestamp(0), "—");
        assert_eq!(format_timestamp(-1), "—");
        assert_eq!(format_timestamp(1700000000), "2023-11-14 22:13:20");
    }
}
