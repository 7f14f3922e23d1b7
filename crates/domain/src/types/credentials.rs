//! Credential pair persisted by the credential store
//!
//! Field names on the wire (`token`, `refreshToken`, `email`) are kept
//! compatible with blobs written by earlier clients under the same storage
//! key.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair plus the subject it was issued to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Token sent on every authenticated request
    #[serde(rename = "token")]
    pub access_token: String,

    /// Token presented to the refresh endpoint
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,

    /// Subject identifier (the account email)
    #[serde(rename = "email", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl CredentialPair {
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        subject: Option<String>,
    ) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into(), subject }
    }
}

// Tokens never reach logs through Debug.
impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

/// Summary of the stored access token for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub is_valid: bool,
    /// Seconds until the `exp` claim, when the token carries one
    pub expires_in: Option<i64>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_legacy_field_names() {
        let pair = CredentialPair::new("a", "r", Some("ana@example.com".into()));
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({
            "token": "a",
            "refreshToken": "r",
            "email": "ana@example.com"
        }));
    }

    #[test]
    fn subject_is_optional_on_the_wire() {
        let pair: CredentialPair =
            serde_json::from_str(r#"{"token":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(pair.subject, None);
    }

    #[test]
    fn debug_redacts_tokens() {
        let pair = CredentialPair::new("secret-access", "secret-refresh", None);
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
