//! Platform-agnostic trait for code forge clients.
//!
//! This module defines the `PlatformClient` trait that provides a unified
//! interface for interacting with different code hosting platforms
//! (GitHub, Gitea, GitLab, Bitbucket), plus the factory that picks the
//! right adapter from a URL or an explicit type.
//!
//! # Example
//!
//! ```ignore
//! use synchro::platform::{PlatformSpec, create_client};
//!
//! let spec = PlatformSpec::new("https://github.com");
//! let client = create_client(&spec).await?;
//! for repo in client.list_repos("rust-lang").await? {
//!     println!("{repo}");
//! }
//! ```

mod errors;
mod factory;
mod types;

pub use errors::{PlatformError, Result, check_org, check_repo, short_error_message};
pub use factory::{PlatformSpec, create_client};
pub use types::{
    Credentials, DEFAULT_REPO_DESCRIPTION, PlatformClient, PlatformKind, RefMap,
};

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_platform_error_api() {
        let err = PlatformError::api("Something went wrong");
        assert!(err.to_string().contains("API error"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_platform_error_not_found() {
        let err = PlatformError::not_found("org/repo");
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("org/repo"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_platform_error_rate_limited() {
        let err = PlatformError::RateLimited {
            reset_at: Utc::now(),
        };
        assert!(err.to_string().contains("Rate limit"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_platform_error_network() {
        let err = PlatformError::network("connection refused");
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_platform_error_unsupported() {
        let err = PlatformError::unsupported("no proxy support");
        assert!(err.to_string().contains("Unsupported"));
        assert!(err.to_string().contains("no proxy support"));
    }

    #[test]
    fn test_check_org_rejects_empty() {
        assert!(check_org("rust-lang").is_ok());
        let err = check_org("").expect_err("empty org should be rejected");
        assert!(matches!(err, PlatformError::InvalidArgument { .. }));
        assert!(err.to_string().contains("organization"));
    }

    #[test]
    fn test_check_repo_rejects_empty() {
        assert!(check_repo("rust").is_ok());
        let err = check_repo("").expect_err("empty repo should be rejected");
        assert!(matches!(err, PlatformError::InvalidArgument { .. }));
        assert!(err.to_string().contains("repository"));
    }

    #[test]
    fn test_kind_detect_from_url() {
        assert_eq!(
            PlatformKind::detect_from_url("https://github.com"),
            Some(PlatformKind::GitHub)
        );
        assert_eq!(
            PlatformKind::detect_from_url("https://gitea.example.com"),
            Some(PlatformKind::Gitea)
        );
        assert_eq!(
            PlatformKind::detect_from_url("https://GitLab.example.com"),
            Some(PlatformKind::GitLab)
        );
        assert_eq!(
            PlatformKind::detect_from_url("https://bitbucket.example.com"),
            Some(PlatformKind::Bitbucket)
        );
        assert_eq!(PlatformKind::detect_from_url("https://example.com"), None);
    }

    #[test]
    fn test_kind_from_str_is_case_insensitive() {
        assert_eq!(
            "GitHub".parse::<PlatformKind>().unwrap(),
            PlatformKind::GitHub
        );
        assert_eq!(
            "bitbucket".parse::<PlatformKind>().unwrap(),
            PlatformKind::Bitbucket
        );
        assert!("subversion".parse::<PlatformKind>().is_err());
    }

    #[test]
    fn test_spec_resolve_kind_prefers_explicit() {
        let mut spec = PlatformSpec::new("https://github.example.com");
        spec.kind = Some(PlatformKind::Gitea);
        assert_eq!(spec.resolve_kind().unwrap(), PlatformKind::Gitea);
    }

    #[test]
    fn test_spec_resolve_kind_detects_from_url() {
        let spec = PlatformSpec::new("https://gitea.example.com");
        assert_eq!(spec.resolve_kind().unwrap(), PlatformKind::Gitea);
    }

    #[test]
    fn test_spec_resolve_kind_unknown_is_error() {
        let spec = PlatformSpec::new("https://example.com");
        let err = spec.resolve_kind().expect_err("should not resolve");
        assert!(matches!(err, PlatformError::Unsupported { .. }));
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn test_credentials_is_present() {
        assert!(!Credentials::default().is_present());
        let creds = Credentials {
            login: Some("user".to_string()),
            secret: None,
        };
        assert!(creds.is_present());
    }

    #[test]
    fn test_short_error_message_single_line() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(short_error_message(&err), "file not found");
    }

    #[test]
    fn test_short_error_message_multiline() {
        let err = std::io::Error::other("first line\nsecond line\nthird line");
        assert_eq!(short_error_message(&err), "first line");
    }
}
