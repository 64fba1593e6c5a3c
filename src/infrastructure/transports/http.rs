#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Failure;
use crate::domain::models::HttpRequest;
use crate::domain::models::HttpResponse;
use crate::domain::models::Method;
use crate::domain::models::Transport;

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => return reqwest::Method::GET,
        Method::Post => return reqwest::Method::POST,
        Method::Patch => return reqwest::Method::PATCH,
        Method::Delete => return reqwest::Method::DELETE,
    }
}

pub struct HttpTransport {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> HttpTransport {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        return HttpTransport::new(
            &Config::get(ConfigKey::ApiURL),
            Duration::from_millis(timeout),
        );
    }
}

impl HttpTransport {
    pub fn new(url: &str, timeout: Duration) -> HttpTransport {
        return HttpTransport {
            url: url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}/{path}", url = self.url, path = path.trim_start_matches('/'));
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[allow(clippy::implicit_return)]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Failure> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), self.endpoint(&request.path))
            .timeout(self.timeout)
            .header("Accept", "application/json");

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder.send().await.map_err(Failure::transport)?;
        let status = res.status().as_u16();
        let text = res.text().await.map_err(Failure::transport)?;

        if text.trim().is_empty() {
            return Ok(HttpResponse {
                status,
                body: Value::Null,
            });
        }

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(err) => {
                if (200..300).contains(&status) {
                    tracing::error!(status = status, error = ?err, "Response body is not JSON");
                    return Err(Failure::decode(err));
                }
                Value::String(text)
            }
        };

        return Ok(HttpResponse { status, body });
    }
}
