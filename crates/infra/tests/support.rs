//! Shared fixtures for gateway integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use backoffice_core::{CredentialStore, EncodedCredentialStore, MemoryStorage};
use backoffice_domain::{CredentialPair, GatewayConfig, Notification, NotificationLevel};
use backoffice_infra::{ChannelNavigator, HttpGateway, NotificationCenter};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::MockServer;

pub const REFRESH_PATH: &str = "/backoffice/auth/refresh-token";
pub const LOGIN_PATH: &str = "/backoffice/auth/login";
pub const REGISTER_PATH: &str = "/backoffice/auth/register";

/// Gateway wired to a mock server with in-memory collaborators.
pub struct Harness {
    pub server: MockServer,
    pub gateway: Arc<HttpGateway>,
    pub storage: MemoryStorage,
    pub credentials: Arc<dyn CredentialStore>,
    pub notifications: NotificationCenter,
    pub routes: UnboundedReceiver<String>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Fast retry and redirect delays; `customize` runs last.
    pub async fn with_config(customize: impl FnOnce(&mut GatewayConfig)) -> Self {
        let server = MockServer::start().await;

        let mut config = GatewayConfig::with_base_url(server.uri());
        config.retry.retry_delay_ms = 20;
        config.session.redirect_delay_ms = 10;
        customize(&mut config);

        let storage = MemoryStorage::new();
        let credentials: Arc<dyn CredentialStore> = Arc::new(EncodedCredentialStore::new(
            Arc::new(storage.clone()),
            config.token.storage_key.clone(),
        ));
        let notifications = NotificationCenter::new();
        let (navigator, routes) = ChannelNavigator::new();

        let gateway = HttpGateway::builder()
            .config(config)
            .credentials(Arc::clone(&credentials))
            .notifier(Arc::new(notifications.clone()))
            .navigator(Arc::new(navigator))
            .build()
            .expect("gateway should build");

        Self { server, gateway: Arc::new(gateway), storage, credentials, notifications, routes }
    }

    pub async fn sign_in(&self, access: &str, refresh: &str, email: Option<&str>) {
        let pair = CredentialPair::new(access, refresh, email.map(str::to_string));
        self.credentials.set(&pair).await.expect("credentials should be stored");
    }

    pub async fn stored(&self) -> Option<CredentialPair> {
        self.credentials.get().await.expect("credential store should be readable")
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.map(|r| r.len()).unwrap_or_default()
    }

    pub fn notifications_at(&self, level: NotificationLevel) -> Vec<Notification> {
        self.notifications.list().into_iter().filter(|n| n.level == level).collect()
    }

    /// Wait briefly for the scheduled login redirect.
    pub async fn next_route(&mut self) -> Option<String> {
        tokio::time::timeout(Duration::from_secs(2), self.routes.recv()).await.ok().flatten()
    }
}

/// Unsigned JWT carrying `claims`.
pub fn jwt(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}
