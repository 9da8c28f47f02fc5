use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    RateLimited,
    Unavailable,
    Internal,
}

/// Error body a catalog server may attach to a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Parses an error body, returning `None` for anything that is not an `ApiError`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_error_body() {
        let body = br#"{"code":"rate_limited","message":"slow down"}"#;
        let parsed = ApiError::from_body(body).expect("api error");
        assert_eq!(parsed, ApiError::new(ErrorCode::RateLimited, "slow down"));
    }

    #[test]
    fn ignores_non_api_error_bodies() {
        assert!(ApiError::from_body(b"<html>502 Bad Gateway</html>").is_none());
        assert!(ApiError::from_body(br#"{"error":"nope"}"#).is_none());
    }
}
