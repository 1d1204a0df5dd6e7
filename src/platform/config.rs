// TokenDeck - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for TokenDeck configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/tokendeck/ or %APPDATA%\TokenDeck\)
    pub config_dir: PathBuf,

    /// Data directory for logs, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[server]` section.
    pub server: ServerSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[server]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Backend base URL.
    pub base_url: Option<String>,
    /// Access token sent as a Bearer header.
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Table rows per page. Must match the backend's page size.
    pub page_size: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Server --
    /// Backend base URL.
    pub base_url: String,
    /// Access token sent as a Bearer header.
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Table rows per page.
    pub page_size: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout_secs: constants::DEFAULT_HTTP_TIMEOUT_SECS,
            dark_mode: true,
            page_size: constants::ITEMS_PER_PAGE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no
/// warnings (first-run). If the file is unparseable, returns defaults
/// with an error warning -- the application still starts but the user
/// is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- Server: base_url --
    if let Some(ref url) = raw.server.base_url {
        if url.starts_with("http://") || url.starts_with("https://") {
            config.base_url = url.trim_end_matches('/').to_string();
        } else {
            warnings.push(format!(
                "[server] base_url = \"{url}\" must start with http:// or https://. \
                 Using default ({}).",
                constants::DEFAULT_BASE_URL,
            ));
        }
    }

    // -- Server: access_token --
    if let Some(ref token) = raw.server.access_token {
        if !token.is_empty() {
            config.access_token = Some(token.clone());
        }
    }

    // -- Server: timeout_seconds --
    if let Some(secs) = raw.server.timeout_seconds {
        if (constants::MIN_HTTP_TIMEOUT_SECS..=constants::MAX_HTTP_TIMEOUT_SECS).contains(&secs) {
            config.timeout_secs = secs;
        } else {
            warnings.push(format!(
                "[server] timeout_seconds = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_HTTP_TIMEOUT_SECS,
                constants::MAX_HTTP_TIMEOUT_SECS,
                constants::DEFAULT_HTTP_TIMEOUT_SECS,
            ));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: page_size --
    if let Some(size) = raw.ui.page_size {
        if (constants::MIN_ITEMS_PER_PAGE..=constants::MAX_ITEMS_PER_PAGE).contains(&size) {
            config.page_size = size;
        } else {
            warnings.push(format!(
                "[ui] page_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_ITEMS_PER_PAGE,
                constants::MAX_ITEMS_PER_PAGE,
                constants::ITEMS_PER_PAGE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
        assert_eq!(config.page_size, constants::ITEMS_PER_PAGE);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [server]
            base_url = "https://api.example.com/"
            access_token = "secret"
            timeout_seconds = 10

            [ui]
            theme = "light"
            page_size = 25

            [logging]
            level = "debug"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.dark_mode);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [server]
            timeout_seconds = 0

            [ui]
            page_size = 0
            theme = "solarized"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3, "warnings: {warnings:?}");
        assert_eq!(config.timeout_secs, constants::DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.page_size, constants::ITEMS_PER_PAGE);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_malformed_toml_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "this is [not toml");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [server]
            base_url = "ftp://example.com"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
    }
}
