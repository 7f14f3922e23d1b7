//! Opaque credential blob codec
//!
//! The blob is base64 over the JSON form of [`CredentialPair`]. It is a
//! reversible encoding that keeps tokens out of casual view in storage; it
//! is not encryption and must not be treated as a security boundary.

use backoffice_domain::{CredentialPair, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode `pair` into the storage blob.
///
/// # Errors
/// Returns `BackofficeError::Serialization` if the pair cannot be rendered
/// as JSON.
pub fn encode_tokens(pair: &CredentialPair) -> Result<String> {
    let json = serde_json::to_vec(pair)?;
    Ok(STANDARD.encode(json))
}

/// Decode a storage blob. Malformed input yields `None`.
#[must_use]
pub fn decode_tokens(encoded: &str) -> Option<CredentialPair> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}
