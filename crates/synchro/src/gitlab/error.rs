//! GitLab API error types.

use chrono::Utc;
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitLab API.
#[derive(Debug, Error)]
pub enum GitLabError {
    #[error("GitLab API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Endpoint builder error: {0}")]
    Builder(String),
}

impl GitLabError {
    /// Classify an error from the gitlab crate's query layer.
    ///
    /// The crate surfaces HTTP failures as formatted messages, so
    /// classification is by message content.
    pub fn from_api_error(e: impl std::error::Error) -> Self {
        let msg = e.to_string();
        if message_is_not_found(&msg) {
            Self::NotFound(msg)
        } else if msg.contains("401") || msg.contains("Unauthorized") {
            Self::Auth(msg)
        } else if msg.contains("429") || msg.contains("rate limit") {
            Self::RateLimited
        } else {
            Self::Api(msg)
        }
    }

    /// Whether this error is a platform 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

fn message_is_not_found(msg: &str) -> bool {
    msg.contains("404") || msg.contains("Not Found")
}

impl From<GitLabError> for PlatformError {
    fn from(err: GitLabError) -> Self {
        match err {
            GitLabError::Api(msg) => PlatformError::api(msg),
            GitLabError::Auth(_) => PlatformError::AuthRequired,
            GitLabError::NotFound(msg) => PlatformError::not_found(msg),
            GitLabError::RateLimited => PlatformError::RateLimited {
                reset_at: Utc::now() + chrono::Duration::minutes(1),
            },
            GitLabError::Builder(msg) => PlatformError::internal(msg),
        }
    }
}
