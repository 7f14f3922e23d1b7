//! Configuration management
//!
//! Every section implements `Default` with the values the backoffice API
//! expects, and every struct is `#[serde(default)]` so partial files only
//! override what they name.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_LOGIN_ROUTE, DEFAULT_REDIRECT_DELAY_MS, DEFAULT_TIMEOUT_MS,
    LOGIN_ENDPOINT, REFRESH_ENDPOINT, REGISTER_ENDPOINT, TOKEN_STORAGE_KEY,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: GatewayConfig,
    pub logging: LoggingConfig,
}

/// HTTP gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Per-attempt timeout applied when a request does not set its own
    pub timeout_ms: u64,
    /// Headers sent with every request; caller-supplied headers win
    pub default_headers: BTreeMap<String, String>,
    pub auth_endpoints: AuthEndpoints,
    pub retry: RetryConfig,
    pub token: TokenConfig,
    pub session: SessionConfig,
    /// Whether a 401 may trigger the refresh flow at all
    pub token_refresh_enabled: bool,
}

impl GatewayConfig {
    /// Convenience constructor overriding only the base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_headers,
            auth_endpoints: AuthEndpoints::default(),
            retry: RetryConfig::default(),
            token: TokenConfig::default(),
            session: SessionConfig::default(),
            token_refresh_enabled: true,
        }
    }
}

/// Reserved authentication endpoints, relative to the base URL.
///
/// Requests to these paths never get an access token attached and never
/// trigger the refresh flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEndpoints {
    pub login: String,
    pub register: String,
    pub refresh: String,
}

impl AuthEndpoints {
    /// Whether `path` targets one of the reserved endpoints.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        path == self.login || path == self.register || path == self.refresh
    }
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            login: LOGIN_ENDPOINT.to_string(),
            register: REGISTER_ENDPOINT.to_string(),
            refresh: REFRESH_ENDPOINT.to_string(),
        }
    }
}

/// Retry-on-transient-failure configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay_ms: u64,
    pub retryable_status_codes: Vec<u16>,
}

impl RetryConfig {
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 1000,
            retryable_status_codes: vec![408, 500, 502, 503, 504],
        }
    }
}

/// How access tokens are presented and where the pair is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub header_name: String,
    pub prefix: String,
    pub storage_key: String,
}

impl TokenConfig {
    /// Render the header value for `token`, e.g. `Bearer abc`.
    #[must_use]
    pub fn header_value(&self, token: &str) -> String {
        if self.prefix.is_empty() {
            token.to_string()
        } else {
            format!("{} {}", self.prefix, token)
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            header_name: "Authorization".to_string(),
            prefix: "Bearer".to_string(),
            storage_key: TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

/// What happens after the session expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Route handed to the navigator once the session is gone
    pub login_route: String,
    /// Delay before the redirect so the user can read the warning
    pub redirect_delay_ms: u64,
}

impl SessionConfig {
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info,backoffice_infra=debug`
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.retryable_status_codes, vec![408, 500, 502, 503, 504]);
        assert_eq!(config.token.storage_key, "auth_tokens");
        assert_eq!(
            config.default_headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert!(config.token_refresh_enabled);
    }

    #[test]
    fn auth_endpoints_match_exact_paths_only() {
        let endpoints = AuthEndpoints::default();
        assert!(endpoints.contains("/backoffice/auth/login"));
        assert!(endpoints.contains("/backoffice/auth/refresh-token"));
        assert!(!endpoints.contains("/backoffice/auth/login/extra"));
        assert!(!endpoints.contains("/backoffice/books"));
    }

    #[test]
    fn header_value_uses_prefix() {
        let token = TokenConfig::default();
        assert_eq!(token.header_value("abc"), "Bearer abc");

        let bare = TokenConfig { prefix: String::new(), ..TokenConfig::default() };
        assert_eq!(bare.header_value("abc"), "abc");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "http": { "base_url": "https://api.example.com" } }"#)
                .unwrap();
        assert_eq!(config.http.base_url, "https://api.example.com");
        assert_eq!(config.http.retry, RetryConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[http.retry]
max_retries = 1
"#,
        )
        .unwrap();
        assert_eq!(config.http.retry.max_retries, 1);
        assert_eq!(config.http.retry.retry_delay_ms, 1000);
    }
}
