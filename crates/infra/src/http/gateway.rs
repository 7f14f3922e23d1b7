//! Authenticated HTTP gateway
//!
//! Every call to the backoffice API goes through [`HttpGateway`]. A single
//! logical request moves through these steps:
//!
//! 1. Build the URL (base URL + path + non-empty query params) and headers
//!    (defaults, then caller headers, then the bearer token).
//! 2. Dispatch one attempt under the per-attempt timeout.
//! 3. On 401 for a refreshable request, refresh the session once and replay
//!    once. The replay result is final for that attempt.
//! 4. On a retryable status, sleep and go back to step 1 while attempts
//!    remain.
//! 5. Decode the body, or notify and propagate the error.
//!
//! Refreshes are serialized behind an async mutex. A task that finds the
//! stored access token already rotated by someone else reuses it instead of
//! calling the refresh endpoint again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use backoffice_core::{
    normalize_token_response, CredentialStore, EncodedCredentialStore, MemoryStorage, Notifier,
    SessionNavigator,
};
use backoffice_domain::constants::SESSION_EXPIRED_MESSAGE;
use backoffice_domain::{CredentialPair, GatewayConfig, RetryConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::{GatewayError, GatewayResult};
use super::options::RequestOptions;
use crate::notify::TracingNotifier;

/// Authenticated HTTP gateway with refresh, retry, and timeout handling
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
    default_headers: HeaderMap,
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Option<Arc<dyn SessionNavigator>>,
    refresh_enabled: AtomicBool,
    refresh_lock: Mutex<()>,
}

struct RequestDescriptor<'a> {
    method: Method,
    path: &'a str,
    body: Option<Value>,
    options: RequestOptions,
    is_public: bool,
}

/// Spans one logical request, including the refresh replay.
struct RetryState {
    attempts_remaining: u32,
    delay: Duration,
    refresh_spent: bool,
}

impl RetryState {
    fn new(retry: &RetryConfig, allow_retry: bool) -> Self {
        Self {
            attempts_remaining: if allow_retry { retry.max_retries } else { 0 },
            delay: retry.retry_delay(),
            refresh_spent: false,
        }
    }
}

struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl RawResponse {
    fn into_result(self) -> GatewayResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            let message = error_message(self.status, &self.body);
            Err(GatewayError::Http { status: self.status, message })
        }
    }

    fn decode<R: DeserializeOwned>(self) -> GatewayResult<R> {
        if self.status == StatusCode::NO_CONTENT || self.body.iter().all(u8::is_ascii_whitespace) {
            return empty_result();
        }
        serde_json::from_slice(&self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

impl HttpGateway {
    /// Create a builder for fluent configuration
    pub fn builder() -> HttpGatewayBuilder {
        HttpGatewayBuilder::default()
    }

    /// Configuration the gateway was built with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The credential store this gateway reads tokens from.
    pub fn credential_store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// Whether a 401 may still trigger a refresh call.
    pub fn is_token_refresh_enabled(&self) -> bool {
        self.refresh_enabled.load(Ordering::Acquire)
    }

    /// Re-enable refresh after a 404 from the refresh endpoint disabled it.
    pub fn enable_token_refresh(&self) {
        self.refresh_enabled.store(true, Ordering::Release);
    }

    /// Authenticated GET.
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> GatewayResult<R> {
        self.execute(self.descriptor(Method::GET, path, None, options, false)).await
    }

    /// Authenticated POST with a JSON body.
    #[instrument(skip(self, body, options), fields(path = %path))]
    pub async fn post<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.execute(self.descriptor(Method::POST, path, Some(body), options, false)).await
    }

    /// Authenticated PUT with a JSON body.
    #[instrument(skip(self, body, options), fields(path = %path))]
    pub async fn put<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.execute(self.descriptor(Method::PUT, path, Some(body), options, false)).await
    }

    /// Authenticated PATCH with a JSON body.
    #[instrument(skip(self, body, options), fields(path = %path))]
    pub async fn patch<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.execute(self.descriptor(Method::PATCH, path, Some(body), options, false)).await
    }

    /// Authenticated DELETE.
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> GatewayResult<R> {
        self.execute(self.descriptor(Method::DELETE, path, None, options, false)).await
    }

    /// Authenticated request with an arbitrary method and optional body.
    #[instrument(skip(self, body, options), fields(method = %method, path = %path))]
    pub async fn request<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(|b| self.encode_body(b)).transpose()?;
        self.execute(self.descriptor(method, path, body, options, false)).await
    }

    /// Issue a request without attaching credentials.
    ///
    /// A 401 on a public request is an ordinary [`GatewayError::Http`].
    #[instrument(skip(self, body, options), fields(method = %method, path = %path))]
    pub async fn public<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> GatewayResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(|b| self.encode_body(b)).transpose()?;
        self.execute(self.descriptor(method, path, body, options, true)).await
    }

    fn descriptor<'a>(
        &self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
        options: RequestOptions,
        is_public: bool,
    ) -> RequestDescriptor<'a> {
        RequestDescriptor { method, path, body, options, is_public }
    }

    fn encode_body<B: Serialize + ?Sized>(&self, body: &B) -> GatewayResult<Value> {
        serde_json::to_value(body).map_err(|e| self.report(GatewayError::Encode(e.to_string())))
    }

    async fn execute<R: DeserializeOwned>(&self, request: RequestDescriptor<'_>) -> GatewayResult<R> {
        let outcome = match self.run(&request).await {
            Ok(response) => response.decode(),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(value) => {
                debug!(method = %request.method, path = request.path, "request succeeded");
                Ok(value)
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Surface a terminal error to the user. Session expiry has already
    /// produced its own warning.
    fn report(&self, err: GatewayError) -> GatewayError {
        if !err.is_session_expired() {
            warn!(error = %err, status = ?err.status(), "request failed");
            self.notifier.error(&err.to_string());
        }
        err
    }

    async fn run(&self, request: &RequestDescriptor<'_>) -> GatewayResult<RawResponse> {
        let mut state = RetryState::new(&self.config.retry, request.options.allow_retry());

        loop {
            match self.attempt(request, &mut state).await {
                Err(err) if state.attempts_remaining > 0 && err.is_retryable(&self.config.retry) => {
                    state.attempts_remaining -= 1;
                    debug!(
                        error = %err,
                        attempts_remaining = state.attempts_remaining,
                        delay_ms = state.delay.as_millis() as u64,
                        "retrying request"
                    );
                    tokio::time::sleep(state.delay).await;
                }
                outcome => return outcome,
            }
        }
    }

    async fn attempt(
        &self,
        request: &RequestDescriptor<'_>,
        state: &mut RetryState,
    ) -> GatewayResult<RawResponse> {
        let token = self.access_token_for(request).await?;
        let response = self.dispatch(request, token.as_deref()).await?;

        if response.status != StatusCode::UNAUTHORIZED
            || !self.is_refreshable(request)
            || state.refresh_spent
        {
            return response.into_result();
        }

        state.refresh_spent = true;
        let token = self.refresh_session(token.as_deref()).await?;

        info!(path = request.path, "replaying request with refreshed credentials");
        self.dispatch(request, Some(&token)).await?.into_result()
    }

    fn is_refreshable(&self, request: &RequestDescriptor<'_>) -> bool {
        let path = request.path.split('?').next().unwrap_or(request.path);
        !request.is_public && !self.config.auth_endpoints.contains(path)
    }

    async fn access_token_for(&self, request: &RequestDescriptor<'_>) -> GatewayResult<Option<String>> {
        if !self.is_refreshable(request) {
            return Ok(None);
        }
        Ok(self.credentials.get().await?.map(|pair| pair.access_token))
    }

    /// Send one attempt and read its body under the timeout. Dropping the
    /// reqwest future on expiry aborts the connection.
    async fn dispatch(
        &self,
        request: &RequestDescriptor<'_>,
        token: Option<&str>,
    ) -> GatewayResult<RawResponse> {
        let url = self.build_url(request.path, &request.options)?;
        let headers = self.build_headers(&request.options, token)?;
        let timeout = request.options.timeout_override().unwrap_or_else(|| self.config.timeout());

        let mut builder = self.client.request(request.method.clone(), url.clone()).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, url = %url, authenticated = token.is_some(), "sending request");

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, GatewayError>(RawResponse { status, body: body.to_vec() })
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => {
                let response = result?;
                debug!(url = %url, status = %response.status, "received response");
                Ok(response)
            }
            Err(_) => {
                warn!(url = %url, timeout_ms = timeout.as_millis() as u64, "request timed out");
                Err(GatewayError::Timeout)
            }
        }
    }

    fn build_url(&self, path: &str, options: &RequestOptions) -> GatewayResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url.trim_end_matches('/'), path))?;

        let mut params = options.query_params().peekable();
        if params.peek().is_some() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    fn build_headers(&self, options: &RequestOptions, token: Option<&str>) -> GatewayResult<HeaderMap> {
        let mut headers = self.default_headers.clone();

        for (name, value) in options.headers() {
            insert_header(&mut headers, name, value).map_err(GatewayError::Encode)?;
        }

        if let Some(token) = token {
            let value = self.config.token.header_value(token);
            insert_header(&mut headers, &self.config.token.header_name, &value)
                .map_err(GatewayError::Encode)?;
        }

        Ok(headers)
    }

    /// Obtain a fresh access token, or expire the session.
    async fn refresh_session(&self, used_token: Option<&str>) -> GatewayResult<String> {
        let _guard = self.refresh_lock.lock().await;

        let stored = match self.credentials.get().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "could not read credentials for refresh");
                None
            }
        };
        let Some(stored) = stored else {
            return Err(self.expire_session("no stored credentials").await);
        };

        if used_token != Some(stored.access_token.as_str()) {
            debug!("access token already rotated; skipping refresh call");
            return Ok(stored.access_token);
        }

        if !self.is_token_refresh_enabled() {
            return Err(self.expire_session("token refresh disabled").await);
        }

        if stored.refresh_token.is_empty() {
            return Err(self.expire_session("no refresh token").await);
        }

        match self.request_refresh(&stored).await {
            Ok(pair) => {
                if let Err(err) = self.credentials.set(&pair).await {
                    warn!(error = %err, "could not persist refreshed credentials");
                    return Err(self.expire_session("credential store rejected refreshed pair").await);
                }
                info!("access token refreshed");
                Ok(pair.access_token)
            }
            Err(err) => {
                if err.status() == Some(StatusCode::NOT_FOUND) {
                    self.refresh_enabled.store(false, Ordering::Release);
                    warn!("refresh endpoint not found; token refresh disabled");
                }
                warn!(error = %err, "token refresh failed");
                Err(self.expire_session("token refresh failed").await)
            }
        }
    }

    /// Single attempt against the refresh endpoint, presenting the refresh
    /// token as the bearer credential.
    async fn request_refresh(&self, stored: &CredentialPair) -> GatewayResult<CredentialPair> {
        let token = &self.config.token;
        let request = RequestDescriptor {
            method: Method::POST,
            path: &self.config.auth_endpoints.refresh,
            body: None,
            options: RequestOptions::new()
                .header(token.header_name.clone(), token.header_value(&stored.refresh_token))
                .without_retry(),
            is_public: true,
        };

        let body: Value = self.dispatch(&request, None).await?.into_result()?.decode()?;
        normalize_token_response(&body, stored.subject.as_deref())
            .ok_or(GatewayError::InvalidAuthResponse)
    }

    async fn expire_session(&self, reason: &str) -> GatewayError {
        warn!(reason, "session expired");

        if let Err(err) = self.credentials.clear().await {
            warn!(error = %err, "failed to clear credentials");
        }
        self.notifier.warning(SESSION_EXPIRED_MESSAGE);
        self.schedule_redirect();

        GatewayError::SessionExpired
    }

    fn schedule_redirect(&self) {
        let Some(navigator) = self.navigator.clone() else {
            debug!("no navigator configured; skipping login redirect");
            return;
        };

        let route = self.config.session.login_route.clone();
        let delay = self.config.session.redirect_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&route);
        });
    }
}

/// Builder for [`HttpGateway`]
///
/// Without an explicit credential store the gateway keeps credentials in
/// process memory; without a notifier, messages go to `tracing`.
#[derive(Default)]
pub struct HttpGatewayBuilder {
    config: Option<GatewayConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn SessionNavigator>>,
}

impl HttpGatewayBuilder {
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn SessionNavigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the gateway
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the base URL or a default header
    /// is invalid, or the HTTP client cannot be created.
    pub fn build(self) -> GatewayResult<HttpGateway> {
        let config = self.config.unwrap_or_default();

        Url::parse(&config.base_url)
            .map_err(|e| GatewayError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            insert_header(&mut default_headers, name, value).map_err(GatewayError::Config)?;
        }

        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;

        let credentials = self.credentials.unwrap_or_else(|| {
            Arc::new(EncodedCredentialStore::new(
                Arc::new(MemoryStorage::new()),
                config.token.storage_key.clone(),
            ))
        });

        Ok(HttpGateway {
            client,
            default_headers,
            credentials,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            navigator: self.navigator,
            refresh_enabled: AtomicBool::new(config.token_refresh_enabled),
            refresh_lock: Mutex::new(()),
            config,
        })
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), String> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| format!("invalid header name {name}: {e}"))?;
    let value =
        HeaderValue::from_str(value).map_err(|e| format!("invalid value for header {name}: {e}"))?;
    headers.insert(name, value);
    Ok(())
}

/// No-content responses read as `{}`, or `null` for targets like `()`.
fn empty_result<R: DeserializeOwned>() -> GatewayResult<R> {
    serde_json::from_value(Value::Object(Map::new()))
        .or_else(|_| serde_json::from_value(Value::Null))
        .map_err(|e| GatewayError::Decode(format!("empty response body: {e}")))
}

/// Human-readable message from a JSON error body, falling back to the
/// status reason phrase.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(message_from_body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

fn message_from_body(body: &Value) -> Option<String> {
    match body.get("message") {
        Some(Value::String(message)) if !message.is_empty() => return Some(message.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if !parts.is_empty() {
                return Some(parts.join(", "));
            }
        }
        _ => {}
    }

    body.get("error").and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_message_prefers_message_then_error_then_reason() {
        let body = json!({ "message": "Title is required" }).to_string();
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body.as_bytes()), "Title is required");

        let body = json!({ "message": ["title too short", "year must be positive"] }).to_string();
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body.as_bytes()),
            "title too short, year must be positive"
        );

        let body = json!({ "error": "Forbidden resource" }).to_string();
        assert_eq!(error_message(StatusCode::FORBIDDEN, body.as_bytes()), "Forbidden resource");

        assert_eq!(error_message(StatusCode::BAD_GATEWAY, b"<html>"), "Bad Gateway");
        assert_eq!(error_message(StatusCode::NOT_FOUND, b""), "Not Found");
    }

    #[test]
    fn empty_bodies_decode_to_empty_object_or_unit() {
        let value: Value = empty_result().unwrap();
        assert_eq!(value, json!({}));

        let unit: () = empty_result().unwrap();
        assert_eq!(unit, ());

        let missing: Option<String> = empty_result().unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn no_content_skips_json_parsing() {
        let response = RawResponse { status: StatusCode::NO_CONTENT, body: b"not json".to_vec() };
        let value: Value = response.decode().unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn retry_state_respects_allow_retry() {
        let retry = RetryConfig::default();
        assert_eq!(RetryState::new(&retry, true).attempts_remaining, retry.max_retries);
        assert_eq!(RetryState::new(&retry, false).attempts_remaining, 0);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let result = HttpGateway::builder().config(GatewayConfig::with_base_url("not a url")).build();
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn caller_headers_override_defaults_and_token_is_last() {
        let gateway = HttpGateway::builder().build().unwrap();
        let options = RequestOptions::new()
            .header("Accept", "text/plain")
            .header("Authorization", "Custom x");

        let headers = gateway.build_headers(&options, Some("tok")).unwrap();
        assert_eq!(headers["accept"], "text/plain");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["authorization"], "Bearer tok");

        let headers = gateway.build_headers(&options, None).unwrap();
        assert_eq!(headers["authorization"], "Custom x");
    }

    #[test]
    fn url_omits_empty_query() {
        let gateway = HttpGateway::builder().build().unwrap();
        let url = gateway.build_url("/books", &RequestOptions::new()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/books");

        let options = RequestOptions::new().query("q", "a b&c").query_opt("x", None::<u8>);
        let url = gateway.build_url("/books", &options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/books?q=a+b%26c");
    }
}
