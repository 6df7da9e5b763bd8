use super::transport::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use std::sync::Mutex;

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync>;

/// In-memory transport for tests
///
/// Every request is recorded; the reply is computed by the responder closure.
pub struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport that answers every request with the same response
    pub fn always(response: HttpResponse) -> Self {
        Self::new(move |_| Ok(response.clone()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// URLs of every recorded request, in call order
    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn test_records_requests() {
        let transport = MockTransport::always(HttpResponse::text(200, "ok"));

        let response = transport.send(&HttpRequest::get("https://a/1")).unwrap();
        transport.send(&HttpRequest::put("https://a/2")).unwrap();

        assert_eq!(response.body, "ok");
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.urls(), vec!["https://a/1", "https://a/2"]);
        assert_eq!(transport.requests()[1].method, HttpMethod::Put);
    }

    #[test]
    fn test_send_checked_rejects_errors() {
        let transport = MockTransport::always(HttpResponse::text(500, "boom"));
        let err = transport
            .send_checked(&HttpRequest::get("https://a/1"))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
