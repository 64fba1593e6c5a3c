use async_trait::async_trait;
use serde_json::Value;

use super::Failure;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: Method, path: &str, body: Option<Value>) -> HttpRequest {
        return HttpRequest {
            method,
            path: path.to_string(),
            body,
            headers: vec![],
        };
    }

    pub fn with_header(mut self, name: &str, value: &str) -> HttpRequest {
        self.headers.push((name.to_string(), value.to_string()));
        return self;
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        return self
            .headers
            .iter()
            .find(|(key, _)| return key.eq_ignore_ascii_case(name))
            .map(|(_, value)| return value.as_str());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        return (200..300).contains(&self.status);
    }
}

#[async_trait]
pub trait Transport {
    /// Performs one request/response exchange. Implementations return `Ok`
    /// for every status code the server answered with, and only fail with
    /// `Failure::Transport` when no answer arrived at all (network error,
    /// timeout) or with `Failure::Decode` when a successful answer was not
    /// JSON.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Failure>;
}

pub type TransportBox = Box<dyn Transport + Send + Sync>;
