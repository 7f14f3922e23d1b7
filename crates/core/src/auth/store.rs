//! Credential store backed by an encoded blob under a single storage key

use std::sync::Arc;

use async_trait::async_trait;
use backoffice_domain::{CredentialPair, Result};
use tracing::{debug, warn};

use super::codec::{decode_tokens, encode_tokens};
use super::ports::{CredentialStore, KeyValueStore};

/// [`CredentialStore`] that keeps the pair as an opaque blob in any
/// [`KeyValueStore`].
///
/// A blob that fails to decode, or decodes to an empty access token, reads
/// as "no credentials" rather than an error.
pub struct EncodedCredentialStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl EncodedCredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl CredentialStore for EncodedCredentialStore {
    async fn get(&self) -> Result<Option<CredentialPair>> {
        let Some(blob) = self.storage.get_item(&self.key).await? else {
            return Ok(None);
        };

        match decode_tokens(&blob) {
            Some(pair) if !pair.access_token.is_empty() => Ok(Some(pair)),
            Some(_) => {
                debug!(key = %self.key, "stored credentials carry no access token");
                Ok(None)
            }
            None => {
                warn!(key = %self.key, "stored credential blob is malformed; ignoring");
                Ok(None)
            }
        }
    }

    async fn set(&self, pair: &CredentialPair) -> Result<()> {
        let blob = encode_tokens(pair)?;
        self.storage.set_item(&self.key, &blob).await?;
        debug!(key = %self.key, "credentials stored");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key).await?;
        debug!(key = %self.key, "credentials cleared");
        Ok(())
    }
}
