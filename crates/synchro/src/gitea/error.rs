//! Error types for Gitea API operations.

use chrono::Utc;
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the Gitea API.
#[derive(Debug, Error)]
pub enum GiteaError {
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

impl GiteaError {
    /// Whether this error is a platform 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<GiteaError> for PlatformError {
    fn from(err: GiteaError) -> Self {
        match err {
            GiteaError::Http(message) => PlatformError::Network { message },
            GiteaError::Json(e) => PlatformError::Internal {
                message: format!("JSON parse error: {}", e),
            },
            GiteaError::Api { status, message } => {
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
            GiteaError::Config(msg) => PlatformError::Internal { message: msg },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_404_to_platform_error() {
        let err = GiteaError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert!(err.is_not_found());
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::NotFound { .. }));
    }

    #[test]
    fn test_api_401_to_platform_error() {
        let err = GiteaError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::AuthRequired));
    }

    #[test]
    fn test_api_429_to_platform_error() {
        let err = GiteaError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::RateLimited { .. }));
    }

    #[test]
    fn test_http_to_platform_error() {
        let err = GiteaError::Http("connection refused".to_string());
        let platform_err: PlatformError = err.into();
        assert!(matches!(platform_err, PlatformError::Network { .. }));
    }
}
