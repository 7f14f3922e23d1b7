//! Unverified JWT inspection
//!
//! The client never validates signatures; it only peeks at the payload to
//! decide whether a stored token is worth sending.

use backoffice_domain::TokenInfo;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Validity verdict for an access token at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenValidity {
    pub is_valid: bool,
    /// Seconds until `exp`; `Some(0)` once expired, `None` without `exp`
    pub expires_in: Option<i64>,
}

impl TokenValidity {
    const INVALID: Self = Self { is_valid: false, expires_in: None };

    /// Attach the subject to build a [`TokenInfo`].
    #[must_use]
    pub fn with_email(self, email: Option<String>) -> TokenInfo {
        TokenInfo { is_valid: self.is_valid, expires_in: self.expires_in, email }
    }
}

/// A compact JWS has exactly three dot-separated segments.
#[must_use]
pub fn is_well_formed_jwt(token: &str) -> bool {
    token.split('.').count() == 3
}

/// Decode the payload segment without verifying the signature.
#[must_use]
pub fn decode_jwt_claims(token: &str) -> Option<Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Check `token` against `now` using its `exp` claim.
#[must_use]
pub fn check_token_validity(token: &str, now: DateTime<Utc>) -> TokenValidity {
    if token.is_empty() {
        return TokenValidity::INVALID;
    }

    let Some(claims) = decode_jwt_claims(token) else {
        return TokenValidity::INVALID;
    };

    let now = now.timestamp();
    #[allow(clippy::cast_possible_truncation)]
    let exp = claims
        .get("exp")
        .and_then(|exp| exp.as_i64().or_else(|| exp.as_f64().map(|f| f.floor() as i64)));

    match exp {
        Some(exp) if exp < now => TokenValidity { is_valid: false, expires_in: Some(0) },
        Some(exp) => TokenValidity { is_valid: true, expires_in: Some(exp - now) },
        None => TokenValidity { is_valid: true, expires_in: None },
    }
}
