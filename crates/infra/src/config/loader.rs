//! Configuration loader
//!
//! Every field has a default, so a missing file is not an error.
//!
//! ## Loading Strategy
//! 1. Probe the standard paths for a config file; use defaults if none
//! 2. Parse it as JSON or TOML (by extension)
//! 3. Apply `BACKOFFICE_*` environment overrides on top
//!
//! ## Environment Variables
//! - `BACKOFFICE_API_BASE_URL`: API base URL
//! - `BACKOFFICE_HTTP_TIMEOUT_MS`: Per-attempt timeout in milliseconds
//! - `BACKOFFICE_MAX_RETRIES`: Extra attempts on retryable statuses
//! - `BACKOFFICE_RETRY_DELAY_MS`: Fixed delay between attempts
//! - `BACKOFFICE_TOKEN_REFRESH`: Whether a 401 may trigger a refresh (true/false)
//! - `BACKOFFICE_LOGIN_ROUTE`: Route to navigate to on session expiry
//! - `BACKOFFICE_LOG`: `tracing` filter directive
//! - `BACKOFFICE_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}`, then `./backoffice.{json,toml}`
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use backoffice_domain::{BackofficeError, Config, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "backoffice.json", "backoffice.toml"];
const PARENT_CONFIG_FILE_NAMES: [&str; 4] =
    ["../config.json", "../config.toml", "../../config.json", "../../config.toml"];

/// Load configuration from the first config file found (or defaults),
/// then apply environment overrides.
///
/// # Errors
/// Returns `BackofficeError::Config` if a config file exists but cannot be
/// parsed, or an environment override has an invalid value.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Defaults plus environment overrides; no file is read.
///
/// # Errors
/// Returns `BackofficeError::Config` for unparsable override values.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `BackofficeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BackofficeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BackofficeError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BackofficeError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Overwrite fields of `config` from `BACKOFFICE_*` variables that are set.
///
/// # Errors
/// Returns `BackofficeError::Config` naming the variable with a bad value.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let http = &mut config.http;

    if let Some(base_url) = env_string("BACKOFFICE_API_BASE_URL") {
        http.base_url = base_url;
    }
    if let Some(timeout_ms) = env_parse("BACKOFFICE_HTTP_TIMEOUT_MS")? {
        http.timeout_ms = timeout_ms;
    }
    if let Some(max_retries) = env_parse("BACKOFFICE_MAX_RETRIES")? {
        http.retry.max_retries = max_retries;
    }
    if let Some(delay_ms) = env_parse("BACKOFFICE_RETRY_DELAY_MS")? {
        http.retry.retry_delay_ms = delay_ms;
    }
    if let Some(enabled) = env_bool("BACKOFFICE_TOKEN_REFRESH") {
        http.token_refresh_enabled = enabled;
    }
    if let Some(route) = env_string("BACKOFFICE_LOGIN_ROUTE") {
        http.session.login_route = route;
    }

    if let Some(filter) = env_string("BACKOFFICE_LOG") {
        config.logging.filter = filter;
    }
    if let Some(json) = env_bool("BACKOFFICE_LOG_JSON") {
        config.logging.json = json;
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BackofficeError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BackofficeError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BackofficeError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
        candidates.extend(PARENT_CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| BackofficeError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset variables yield `None`.
fn env_bool(key: &str) -> Option<bool> {
    env_string(key)
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const OVERRIDE_VARS: [&str; 8] = [
        "BACKOFFICE_API_BASE_URL",
        "BACKOFFICE_HTTP_TIMEOUT_MS",
        "BACKOFFICE_MAX_RETRIES",
        "BACKOFFICE_RETRY_DELAY_MS",
        "BACKOFFICE_TOKEN_REFRESH",
        "BACKOFFICE_LOGIN_ROUTE",
        "BACKOFFICE_LOG",
        "BACKOFFICE_LOG_JSON",
    ];

    fn clear_overrides() {
        for key in OVERRIDE_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "YES", "on"] {
            std::env::set_var("TEST_BACKOFFICE_BOOL", value);
            assert_eq!(env_bool("TEST_BACKOFFICE_BOOL"), Some(true), "value {value}");
        }
        for value in ["0", "false", "no", "off"] {
            std::env::set_var("TEST_BACKOFFICE_BOOL", value);
            assert_eq!(env_bool("TEST_BACKOFFICE_BOOL"), Some(false), "value {value}");
        }

        std::env::remove_var("TEST_BACKOFFICE_BOOL");
        assert_eq!(env_bool("TEST_BACKOFFICE_BOOL"), None);
    }

    #[test]
    fn test_load_from_env_applies_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("BACKOFFICE_API_BASE_URL", "https://api.example.com");
        std::env::set_var("BACKOFFICE_HTTP_TIMEOUT_MS", "1200");
        std::env::set_var("BACKOFFICE_MAX_RETRIES", "1");
        std::env::set_var("BACKOFFICE_RETRY_DELAY_MS", "10");
        std::env::set_var("BACKOFFICE_TOKEN_REFRESH", "false");
        std::env::set_var("BACKOFFICE_LOG_JSON", "true");

        let config = load_from_env().expect("config from env");
        clear_overrides();

        assert_eq!(config.http.base_url, "https://api.example.com");
        assert_eq!(config.http.timeout_ms, 1200);
        assert_eq!(config.http.retry.max_retries, 1);
        assert_eq!(config.http.retry.retry_delay_ms, 10);
        assert!(!config.http.token_refresh_enabled);
        assert!(config.logging.json);
        // untouched fields keep defaults
        assert_eq!(config.http.auth_endpoints.refresh, "/backoffice/auth/refresh-token");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var("BACKOFFICE_HTTP_TIMEOUT_MS", "soon");
        let result = load_from_env();
        clear_overrides();

        let err = result.unwrap_err();
        assert!(
            matches!(&err, BackofficeError::Config(msg) if msg.contains("BACKOFFICE_HTTP_TIMEOUT_MS")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(BackofficeError::Config(_))));
    }

    #[test]
    fn test_parse_config_json() {
        let json_content = r#"{
            "http": {
                "base_url": "https://cms.example.com/api",
                "retry": { "max_retries": 5 }
            }
        }"#;

        let config = parse_config(json_content, Path::new("test.json")).unwrap();
        assert_eq!(config.http.base_url, "https://cms.example.com/api");
        assert_eq!(config.http.retry.max_retries, 5);
        assert_eq!(config.http.retry.retry_delay_ms, 1000);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
[http]
timeout_ms = 750

[http.session]
login_route = "/signin"

[logging]
filter = "debug"
"#;

        let config = parse_config(toml_content, Path::new("test.toml")).unwrap();
        assert_eq!(config.http.timeout_ms, 750);
        assert_eq!(config.http.session.login_route, "/signin");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
