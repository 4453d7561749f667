//! API Errors
//!
//! Every REST helper returns `ApiResult`; UI code shows the `Display` text in a toast.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-2xx response, message is the body text (or status text)
    #[error("Request failed [{status}]: {message}")]
    Status { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Invalid request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a failed response, preferring body text over status text
    pub fn from_response(status: u16, body: &str, status_text: &str) -> Self {
        let message = [body.trim(), status_text.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown error")
            .to_string();
        ApiError::Status { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_prefers_body() {
        let err = ApiError::from_response(409, "name already exists", "Conflict");
        assert_eq!(err.to_string(), "Request failed [409]: name already exists");
    }

    #[test]
    fn test_from_response_falls_back() {
        let err = ApiError::from_response(500, "", "Internal Server Error");
        assert_eq!(err.to_string(), "Request failed [500]: Internal Server Error");

        let err = ApiError::from_response(502, "  ", "");
        assert_eq!(err.to_string(), "Request failed [502]: Unknown error");
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_response(401, "token expired", "").is_unauthorized());
        assert!(!ApiError::from_response(403, "", "").is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
        assert_eq!(ApiError::Network("x".into()).status(), None);
    }
}
