#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use std::sync::Arc;

use serde_json::Value;

use super::Credentials;
use crate::domain::models::Failure;
use crate::domain::models::HttpRequest;
use crate::domain::models::HttpResponse;
use crate::domain::models::Method;
use crate::domain::models::TransportBox;

fn failure_message(res: &HttpResponse) -> String {
    for key in ["message", "error", "detail"] {
        if let Some(message) = res.body.get(key).and_then(|e| return e.as_str()) {
            return message.to_string();
        }
    }

    if let Some(text) = res.body.as_str() {
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }

    return format!("Request failed with status {}", res.status);
}

/// Attaches the stored bearer credential to every outgoing request and turns
/// non-2xx answers into `Failure::Server`. No retries, no backoff.
pub struct Gateway {
    transport: TransportBox,
    credentials: Credentials,
}

pub type GatewayRef = Arc<Gateway>;

impl Gateway {
    pub fn new(transport: TransportBox, credentials: Credentials) -> Gateway {
        return Gateway {
            transport,
            credentials,
        };
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, Failure> {
        let mut req = HttpRequest::new(method, path, body);

        // Read fresh every time, a login or logout between two requests must
        // be picked up.
        if let Some(credential) = self.credentials.load() {
            req = req.with_header("Authorization", &credential.bearer());
        }

        tracing::debug!(
            method = method.to_string(),
            path = path,
            authenticated = req.header("Authorization").is_some(),
            "Sending request"
        );

        let res = match self.transport.send(req).await {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(method = method.to_string(), path = path, error = ?err, "Request failed");
                return Err(err);
            }
        };

        if !res.is_success() {
            tracing::error!(
                method = method.to_string(),
                path = path,
                status = res.status,
                "Server rejected request"
            );
            return Err(Failure::server(res.status, failure_message(&res)));
        }

        return Ok(res.body);
    }

    pub async fn get(&self, path: &str) -> Result<Value, Failure> {
        return self.request(Method::Get, path, None).await;
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, Failure> {
        return self.request(Method::Post, path, Some(body)).await;
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, Failure> {
        return self.request(Method::Patch, path, Some(body)).await;
    }

    pub async fn delete(&self, path: &str) -> Result<Value, Failure> {
        return self.request(Method::Delete, path, None).await;
    }
}

#[cfg(test)]
impl Gateway {
    /// Gateway over a real HTTP transport pointed at `url`, with an in-memory
    /// credential store optionally holding `token`.
    pub fn with_url(url: &str, token: Option<&str>) -> GatewayRef {
        use std::time::Duration;

        use crate::domain::models::Credential;
        use crate::infrastructure::storage::MemoryStore;
        use crate::infrastructure::transports::HttpTransport;

        let credentials = Credentials::new(Arc::new(MemoryStore::default()));
        if let Some(token) = token {
            credentials.save(&Credential::new(token)).unwrap();
        }

        return Arc::new(Gateway::new(
            Box::new(HttpTransport::new(url, Duration::from_millis(2000))),
            credentials,
        ));
    }
}
