use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

pub const CREDENTIAL_KEY: &str = "access-token";

/// Bearer token plus whatever else the login response handed back
/// (account id, expiry, ...). Only `token` is ever read by the client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Credential {
    pub fn new(token: &str) -> Credential {
        return Credential {
            token: token.to_string(),
            metadata: Map::new(),
        };
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Credential {
        self.metadata.insert(key.to_string(), value);
        return self;
    }

    pub fn bearer(&self) -> String {
        return format!("Bearer {}", self.token);
    }
}
