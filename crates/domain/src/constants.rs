//! Application constants
//!
//! Centralized location for the endpoint paths and defaults shared by the
//! gateway and the resource clients.

// Gateway defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const TOKEN_STORAGE_KEY: &str = "auth_tokens";

// Reserved authentication endpoints
pub const LOGIN_ENDPOINT: &str = "/backoffice/auth/login";
pub const REGISTER_ENDPOINT: &str = "/backoffice/auth/register";
pub const REFRESH_ENDPOINT: &str = "/backoffice/auth/refresh-token";

// Session expiry handling
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

// Resource endpoints
pub const ARTICLES_ENDPOINT: &str = "/backoffice/articles";
pub const BOOKS_ENDPOINT: &str = "/backoffice/books";
pub const SERIES_ENDPOINT: &str = "/backoffice/series";

// Notifications
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;
