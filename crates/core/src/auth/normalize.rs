//! Tolerant parsing of token-issuing responses
//!
//! Login, register, and refresh responses come in several shapes depending
//! on the backend version. Precedence, first match wins:
//!
//! 1. Envelope: `body.data` when it is a JSON object, otherwise `body`.
//! 2. Access token: `token`, `access_token`, `accessToken`.
//! 3. Refresh token: `refreshToken`, `refresh_token`, then the access token
//!    itself (some backends issue a single token).
//! 4. Subject: `email` inside the envelope, then the caller's fallback.
//!
//! Empty strings count as absent.

use backoffice_domain::CredentialPair;
use serde_json::Value;

const ACCESS_TOKEN_FIELDS: [&str; 3] = ["token", "access_token", "accessToken"];
const REFRESH_TOKEN_FIELDS: [&str; 2] = ["refreshToken", "refresh_token"];
const SUBJECT_FIELD: &str = "email";

/// Extract a credential pair from a token response body.
///
/// Returns `None` when no access token can be found.
#[must_use]
pub fn normalize_token_response(
    body: &Value,
    fallback_subject: Option<&str>,
) -> Option<CredentialPair> {
    let envelope = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };

    let access_token = first_string(envelope, &ACCESS_TOKEN_FIELDS)?;
    let refresh_token =
        first_string(envelope, &REFRESH_TOKEN_FIELDS).unwrap_or_else(|| access_token.clone());
    let subject = first_string(envelope, &[SUBJECT_FIELD])
        .or_else(|| fallback_subject.map(str::to_string));

    Some(CredentialPair { access_token, refresh_token, subject })
}

fn first_string(value: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| value.get(*field).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_flat_body() {
        let pair = normalize_token_response(
            &json!({ "token": "a", "refreshToken": "r", "email": "e@x.io" }),
            None,
        )
        .unwrap();
        assert_eq!(pair, CredentialPair::new("a", "r", Some("e@x.io".into())));
    }

    #[test]
    fn prefers_data_envelope_over_top_level() {
        let pair = normalize_token_response(
            &json!({ "token": "outer", "data": { "token": "inner", "refreshToken": "r" } }),
            None,
        )
        .unwrap();
        assert_eq!(pair.access_token, "inner");
        assert_eq!(pair.refresh_token, "r");
    }

    #[test]
    fn ignores_non_object_data_field() {
        let pair =
            normalize_token_response(&json!({ "data": "ok", "token": "flat" }), None).unwrap();
        assert_eq!(pair.access_token, "flat");
    }

    #[test]
    fn accepts_snake_and_camel_alternates_in_order() {
        let snake =
            normalize_token_response(&json!({ "access_token": "a", "refresh_token": "r" }), None)
                .unwrap();
        assert_eq!((snake.access_token.as_str(), snake.refresh_token.as_str()), ("a", "r"));

        let camel = normalize_token_response(&json!({ "accessToken": "c" }), None).unwrap();
        assert_eq!(camel.access_token, "c");

        let both = normalize_token_response(
            &json!({ "access_token": "second", "token": "first" }),
            None,
        )
        .unwrap();
        assert_eq!(both.access_token, "first");
    }

    #[test]
    fn falls_back_to_access_token_for_refresh() {
        let pair = normalize_token_response(&json!({ "token": "only" }), None).unwrap();
        assert_eq!(pair.refresh_token, "only");
    }

    #[test]
    fn subject_falls_back_to_caller_value() {
        let pair =
            normalize_token_response(&json!({ "token": "a" }), Some("prev@x.io")).unwrap();
        assert_eq!(pair.subject.as_deref(), Some("prev@x.io"));

        let own = normalize_token_response(
            &json!({ "token": "a", "email": "own@x.io" }),
            Some("prev@x.io"),
        )
        .unwrap();
        assert_eq!(own.subject.as_deref(), Some("own@x.io"));
    }

    #[test]
    fn missing_or_empty_access_token_yields_none() {
        assert!(normalize_token_response(&json!({}), None).is_none());
        assert!(normalize_token_response(&json!({ "token": "" }), None).is_none());
        assert!(normalize_token_response(&json!({ "token": 42 }), None).is_none());
        assert!(normalize_token_response(&json!(null), None).is_none());
    }
}
