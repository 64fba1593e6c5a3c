use std::sync::Arc;

use anyhow::Result;

/// Minimal key-value interface the credential blob lives behind.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

pub type KeyValueStoreBox = Arc<dyn KeyValueStore + Send + Sync>;
