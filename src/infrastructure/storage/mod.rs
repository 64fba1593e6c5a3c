mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Credential;
use crate::domain::models::KeyValueStoreBox;
use crate::domain::services::Credentials;

pub struct StorageManager {}

impl StorageManager {
    /// A token passed through flags or env wins and lives only in memory for
    /// this process. Otherwise the credentials file is used.
    pub fn from_config() -> Result<KeyValueStoreBox> {
        let token = Config::get(ConfigKey::Token);
        if !token.is_empty() {
            let store: KeyValueStoreBox = Arc::new(MemoryStore::default());
            Credentials::new(store.clone()).save(&Credential::new(&token))?;
            return Ok(store);
        }

        let file_path = PathBuf::from(Config::get(ConfigKey::CredentialsFile));
        return Ok(Arc::new(FileStore::new(file_path)));
    }
}
