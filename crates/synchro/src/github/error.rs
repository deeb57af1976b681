//! GitHub API error types.

use chrono::Utc;
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GitHubError {
    /// Whether this error is a platform 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(e) => status_of(e) == Some(404),
            Self::Config(_) => false,
        }
    }
}

/// HTTP status of an octocrab error, when it carries one.
fn status_of(e: &octocrab::Error) -> Option<u16> {
    match e {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

impl From<GitHubError> for PlatformError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Api(e) => match status_of(&e) {
                Some(401) => PlatformError::AuthRequired,
                Some(404) => PlatformError::not_found(e.to_string()),
                Some(429) => PlatformError::RateLimited {
                    reset_at: Utc::now() + chrono::Duration::minutes(1),
                },
                _ => PlatformError::api(e.to_string()),
            },
            GitHubError::Config(msg) => PlatformError::Internal { message: msg },
        }
    }
}
