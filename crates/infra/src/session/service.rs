//! Login, registration, and local session inspection
//!
//! Login and register go through the gateway as public requests, so a bad
//! password surfaces as an ordinary [`GatewayError::Http`] rather than
//! triggering the refresh flow.

use std::sync::Arc;

use backoffice_core::{check_token_validity, is_well_formed_jwt, normalize_token_response, CredentialStore};
use backoffice_domain::{CredentialPair, TokenInfo};
use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::http::{GatewayError, GatewayResult, HttpGateway, RequestOptions};

#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Session operations for the signed-in user
pub struct SessionService {
    gateway: Arc<HttpGateway>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionService {
    /// Use the gateway's own credential store.
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        let credentials = gateway.credential_store();
        Self { gateway, credentials }
    }

    /// Sign in and persist the issued credential pair.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidAuthResponse`] when the response carries no
    /// access token; otherwise whatever the gateway reports.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> GatewayResult<CredentialPair> {
        let endpoint = self.gateway.config().auth_endpoints.login.clone();
        self.authenticate(&endpoint, email, password).await
    }

    /// Create an account and persist the issued credential pair.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> GatewayResult<CredentialPair> {
        let endpoint = self.gateway.config().auth_endpoints.register.clone();
        self.authenticate(&endpoint, email, password).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> GatewayResult<CredentialPair> {
        let body: Value = self
            .gateway
            .public(Method::POST, endpoint, Some(&AuthRequest { email, password }), RequestOptions::new())
            .await?;

        let Some(mut pair) = normalize_token_response(&body, Some(email)) else {
            warn!(endpoint, "authentication response carried no access token");
            return Err(GatewayError::InvalidAuthResponse);
        };
        pair.subject = Some(email.to_string());

        self.credentials.set(&pair).await?;
        info!(endpoint, "session established");
        Ok(pair)
    }

    /// Forget the stored credentials.
    pub async fn logout(&self) -> GatewayResult<()> {
        self.credentials.clear().await?;
        info!("session cleared");
        Ok(())
    }

    pub async fn stored_credentials(&self) -> GatewayResult<Option<CredentialPair>> {
        Ok(self.credentials.get().await?)
    }

    /// A stored access token that is a well-formed, unexpired JWT.
    pub async fn is_authenticated(&self) -> GatewayResult<bool> {
        let Some(pair) = self.credentials.get().await? else {
            return Ok(false);
        };
        Ok(is_well_formed_jwt(&pair.access_token)
            && check_token_validity(&pair.access_token, Utc::now()).is_valid)
    }

    /// Validity and expiry of the stored access token, or `None` when
    /// signed out.
    pub async fn token_info(&self) -> GatewayResult<Option<TokenInfo>> {
        Ok(self.credentials.get().await?.map(|pair| {
            check_token_validity(&pair.access_token, Utc::now()).with_email(pair.subject)
        }))
    }

    pub async fn current_user_email(&self) -> GatewayResult<Option<String>> {
        Ok(self.credentials.get().await?.and_then(|pair| pair.subject))
    }
}
