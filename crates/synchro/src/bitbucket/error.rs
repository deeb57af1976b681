//! Error types for Bitbucket API operations.

use chrono::Utc;
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the Bitbucket API.
#[derive(Debug, Error)]
pub enum BitbucketError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BitbucketError {
    /// Whether this error is a platform 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<BitbucketError> for PlatformError {
    fn from(err: BitbucketError) -> Self {
        match err {
            BitbucketError::Http(message) => PlatformError::Network { message },
            BitbucketError::Json(e) => PlatformError::Internal {
                message: format!("JSON parse error: {}", e),
            },
            BitbucketError::Api { status, message } => {
                if status == 401 || status == 403 {
                    PlatformError::AuthRequired
                } else if status == 404 {
                    PlatformError::NotFound { resource: message }
                } else if status == 429 {
                    PlatformError::RateLimited {
                        reset_at: Utc::now() + chrono::Duration::minutes(1),
                    }
                } else {
                    PlatformError::Api { message }
                }
            }
            BitbucketError::Config(msg) => PlatformError::Internal { message: msg },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_404_to_platform_error() {
        let err = BitbucketError::Api {
            status: 404,
            message: "no such repository".to_string(),
        };
        assert!(err.is_not_found());
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::NotFound { .. }));
    }

    #[test]
    fn test_api_403_to_platform_error() {
        let err = BitbucketError::Api {
            status: 403,
            message: "forbidden".to_string(),
        };
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::AuthRequired));
    }
}
