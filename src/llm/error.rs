use thiserror::Error;

/// Errors returned by a text-generation backend
///
/// None of these are retried by the client itself.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The backend answered with a non-success status
    #[error("LLM call failed: HTTP {status}\n{body}")]
    Http { status: u16, body: String },

    /// The request never reached the backend or timed out
    #[error("LLM call failed: {message}")]
    Transport { message: String },

    /// The reply had no completion text where one was expected
    #[error("Invalid response from LLM: {message}")]
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    #[error("LLM error: {message}")]
    Other { message: String },
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_status_and_body() {
        let err = ProviderError::Http {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("HTTP 401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ProviderError::Transport {
            message: "connection refused".to_string(),
        };
        assert!(err.status().is_none());
    }
}
