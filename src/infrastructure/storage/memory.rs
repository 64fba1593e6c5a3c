use anyhow::Result;
use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

#[derive(Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.values.get(key).map(|e| return e.value().to_string()));
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        return Ok(());
    }
}
