//! Port interfaces for credential persistence
//!
//! These traits define the boundary between session logic and the storage
//! backend that actually holds the encoded credential blob.

use async_trait::async_trait;
use backoffice_domain::{CredentialPair, Result};

/// String key/value storage, the shape of browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (idempotent)
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Owner of the persisted credential pair.
///
/// The gateway only reads and writes credentials through this trait and
/// never touches the backing storage directly.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current pair, or `None` when nothing usable is stored
    async fn get(&self) -> Result<Option<CredentialPair>>;

    /// Replace the stored pair
    async fn set(&self, pair: &CredentialPair) -> Result<()>;

    /// Forget the stored pair
    async fn clear(&self) -> Result<()>;
}
