//! Per-request options
//!
//! Options are built by value and moved into the gateway call:
//!
//! ```
//! use std::time::Duration;
//! use backoffice_infra::http::RequestOptions;
//!
//! let options = RequestOptions::new()
//!     .query("page", 1)
//!     .query_opt("tag", None::<String>)
//!     .header("X-Trace", "abc")
//!     .timeout(Duration::from_millis(250))
//!     .without_retry();
//! assert!(!options.allow_retry());
//! ```

use std::fmt::Display;
use std::time::Duration;

use backoffice_domain::QueryPairs;

#[derive(Debug, Clone)]
pub struct RequestOptions {
    query: Vec<(String, Option<String>)>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    allow_retry: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { query: Vec::new(), headers: Vec::new(), timeout: None, allow_retry: true }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.push((key.into(), Some(value.to_string())));
        self
    }

    /// Append a query parameter; `None` is omitted from the URL.
    pub fn query_opt<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    /// Append pre-built pairs from a resource query type.
    pub fn query_pairs(mut self, pairs: QueryPairs) -> Self {
        self.query.extend(pairs.into_iter().map(|(key, value)| (key.to_string(), value)));
        self
    }

    /// Set a header; overrides a default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the configured per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable retries on transient status codes.
    pub fn without_retry(mut self) -> Self {
        self.allow_retry = false;
        self
    }

    pub fn allow_retry(&self) -> bool {
        self.allow_retry
    }

    pub(crate) fn query_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    pub(crate) fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_values_are_skipped_and_order_kept() {
        let options = RequestOptions::new()
            .query("page", 1)
            .query_opt("status", None::<&str>)
            .query("limit", 10)
            .query_pairs(vec![("tag", Some("rust".into())), ("bookId", None)]);

        let params: Vec<_> = options.query_params().collect();
        assert_eq!(params, vec![("page", "1"), ("limit", "10"), ("tag", "rust")]);
    }

    #[test]
    fn defaults_allow_retry_without_timeout_override() {
        let options = RequestOptions::default();
        assert!(options.allow_retry());
        assert!(options.timeout_override().is_none());
        assert!(options.headers().is_empty());
    }
}
