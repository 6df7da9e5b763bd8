use super::transport::{HttpError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// Blocking reqwest-backed transport
///
/// One client is shared by every component so connections are pooled for the whole run.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("launchpad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        debug!(timeout_secs = timeout.as_secs(), "HTTP client ready");
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| HttpError::Network {
            url: request.url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(|e| HttpError::Decode {
            url: request.url.clone(),
            message: e.to_string(),
        })?;

        debug!(status, url = %request.url, bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
