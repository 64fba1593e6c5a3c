#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Credential;
use crate::domain::models::KeyValueStoreBox;
use crate::domain::models::CREDENTIAL_KEY;

/// Reads and writes the serialized credential blob. Reads never fail: a
/// missing, unreadable or corrupt blob is treated as "not logged in".
#[derive(Clone)]
pub struct Credentials {
    store: KeyValueStoreBox,
}

impl Credentials {
    pub fn new(store: KeyValueStoreBox) -> Credentials {
        return Credentials { store };
    }

    pub fn load(&self) -> Option<Credential> {
        let blob = match self.store.get(CREDENTIAL_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read stored credential");
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&blob) {
            Ok(credential) => {
                if credential.token.is_empty() {
                    return None;
                }
                return Some(credential);
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to parse stored credential");
                return None;
            }
        }
    }

    pub fn save(&self, credential: &Credential) -> Result<()> {
        let blob = serde_json::to_string(credential)?;
        self.store.set(CREDENTIAL_KEY, &blob)?;

        return Ok(());
    }

    pub fn clear(&self) -> Result<()> {
        return self.store.clear(CREDENTIAL_KEY);
    }
}
