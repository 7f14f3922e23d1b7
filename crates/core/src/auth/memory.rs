//! Process-local key/value storage
//!
//! Holds values for the lifetime of the process only. Useful for sessions
//! that should not outlive the program and as a test double.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use backoffice_domain::Result;
use parking_lot::Mutex;

use super::ports::KeyValueStore;

/// In-memory [`KeyValueStore`]; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing the async interface.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().remove(key);
        Ok(())
    }
}
