//! HTTP client error types.

use shop_commerce::ServiceError;
use thiserror::Error;

/// Errors that can occur when talking to the storefront service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The GraphQL response carried errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphqlErrors(Vec<String>),

    /// The GraphQL response had neither data nor errors.
    #[error("GraphQL response has no data")]
    MissingData,
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for ServiceError {
    fn from(e: FetchError) -> Self {
        let message = e.to_string();
        match e {
            FetchError::RequestError(_) | FetchError::InvalidUrl(_) | FetchError::Timeout => {
                ServiceError::Transport(message)
            }
            FetchError::HttpError { .. } | FetchError::GraphqlErrors(_) => {
                ServiceError::Rejected(message)
            }
            FetchError::ParseError(_) | FetchError::JsonError(_) | FetchError::MissingData => {
                ServiceError::Decode(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_service_error() {
        assert!(matches!(
            ServiceError::from(FetchError::Timeout),
            ServiceError::Transport(_)
        ));
        assert_eq!(
            ServiceError::from(FetchError::GraphqlErrors(vec!["Out of stock".to_string()])),
            ServiceError::Rejected("GraphQL errors: Out of stock".to_string())
        );
        assert!(matches!(
            ServiceError::from(FetchError::MissingData),
            ServiceError::Decode(_)
        ));
    }
}
