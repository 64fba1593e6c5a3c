#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::domain::models::KeyValueStore;

/// Persists values as a single JSON object on disk. Every call goes to the
/// file, so a value written by another process is seen on the next `get`.
pub struct FileStore {
    pub file_path: PathBuf,
}

impl FileStore {
    pub fn new(file_path: PathBuf) -> FileStore {
        return FileStore { file_path };
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(&self.file_path)?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        return Ok(serde_json::from_str(&payload)?);
    }

    /// Values to build the next write on. An unreadable file is replaced
    /// rather than blocking the write, and every key in it is lost.
    fn read_for_write(&self) -> BTreeMap<String, String> {
        match self.read_all() {
            Ok(values) => return values,
            Err(err) => {
                tracing::warn!(
                    path = ?self.file_path,
                    error = ?err,
                    "Discarding unreadable store file"
                );
                return BTreeMap::new();
            }
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.file_path, serde_json::to_string_pretty(values)?)?;
        return Ok(());
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.read_all()?.remove(key));
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_for_write();
        values.insert(key.to_string(), value.to_string());
        return self.write_all(&values);
    }

    fn clear(&self, key: &str) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let mut values = self.read_for_write();
        values.remove(key);
        if values.is_empty() {
            fs::remove_file(&self.file_path)?;
            return Ok(());
        }

        return self.write_all(&values);
    }
}
