use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised by the transport layer
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// The server answered with a status >= 400
    #[error("HTTP {status} {url}\n{body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The response body could not be decoded as expected
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl HttpError {
    /// HTTP status of the failed call, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// An outbound request with an optional JSON body
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully buffered response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// A response carrying a JSON document
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(
            status,
            Some("application/json".to_string()),
            body.to_string(),
        )
    }

    /// A response carrying plain text
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some("text/plain".to_string()), body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    /// Converts a status >= 400 into [`HttpError::Status`], keeping the body for diagnosis
    pub fn error_for_status(self, url: &str) -> Result<Self, HttpError> {
        if self.status >= 400 {
            return Err(HttpError::Status {
                status: self.status,
                url: url.to_string(),
                body: self.body,
            });
        }
        Ok(self)
    }

    /// Parses the body as JSON regardless of the declared content type
    pub fn json_body(&self, url: &str) -> Result<Value, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Blocking request/response exchange
pub trait HttpTransport: Send + Sync {
    /// Sends a request and returns the buffered response, whatever its status
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;

    /// Sends a request and fails on any status >= 400
    fn send_checked(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.send(request)?.error_for_status(&request.url)
    }
}
