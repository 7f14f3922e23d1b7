//! # Backoffice Core
//!
//! Pure session logic and port interfaces - no HTTP or filesystem code.
//!
//! This crate contains:
//! - Port/adapter interfaces (credential storage, notifications, navigation)
//! - The credential blob codec and the encoded credential store
//! - Tolerant token-response normalization
//! - Unverified JWT claim inspection
//!
//! ## Architecture Principles
//! - Only depends on `backoffice-domain`
//! - All external effects via traits
//! - Pure, testable logic

pub mod auth;
pub mod ui;

pub use auth::codec::{decode_tokens, encode_tokens};
pub use auth::jwt::{check_token_validity, decode_jwt_claims, is_well_formed_jwt, TokenValidity};
pub use auth::memory::MemoryStorage;
pub use auth::normalize::normalize_token_response;
pub use auth::ports::{CredentialStore, KeyValueStore};
pub use auth::store::EncodedCredentialStore;
pub use ui::ports::{Notifier, SessionNavigator};
