use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use super::errors::{PlatformError, Result};

/// Placeholder description for repositories created without one.
pub const DEFAULT_REPO_DESCRIPTION: &str = "TODO - Provide a description for this repository.";

/// Mapping from ref name (branch or tag) to commit identifier.
pub type RefMap = BTreeMap<String, String>;

/// The kind of code hosting platform a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    GitHub,
    Gitea,
    GitLab,
    Bitbucket,
}

impl PlatformKind {
    /// All supported kinds, used for URL detection and error messages.
    pub const ALL: [PlatformKind; 4] = [
        PlatformKind::GitHub,
        PlatformKind::Gitea,
        PlatformKind::GitLab,
        PlatformKind::Bitbucket,
    ];

    /// Lowercase name as it appears in URLs and CLI arguments.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKind::GitHub => "github",
            PlatformKind::Gitea => "gitea",
            PlatformKind::GitLab => "gitlab",
            PlatformKind::Bitbucket => "bitbucket",
        }
    }

    /// Detect the platform kind from a URL substring (case-insensitive).
    ///
    /// `https://github.example.com` detects as GitHub, `https://gitea.io`
    /// as Gitea, and so on. Returns `None` when no known platform name
    /// appears in the URL.
    #[must_use]
    pub fn detect_from_url(url: &str) -> Option<Self> {
        let lowered = url.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lowered.contains(kind.as_str()))
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| {
                PlatformError::invalid_argument(format!("unknown platform type: {s:?}"))
            })
    }
}

/// Credentials for a platform API and its git remotes.
///
/// `login` holds either a username or a personal access token; adapters
/// decide which based on the token's shape and whether a `secret` is set.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Username or token.
    pub login: Option<String>,
    /// Password, when `login` is a username.
    pub secret: Option<String>,
}

impl Credentials {
    /// Whether any credential material is present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.login.is_some() || self.secret.is_some()
    }
}

/// Trait for code hosting platform clients.
///
/// This trait provides a unified interface for the handful of read and
/// create operations the synchronization engine needs, implemented for
/// GitHub, GitLab, Gitea-based forges, and Bitbucket.
///
/// # Implementation Notes
///
/// Implementors should:
/// - Handle pagination internally for list operations
/// - Convert platform-specific errors to `PlatformError`
/// - Map a platform 404 on `has_repo` to `Ok(false)`
/// - Reject empty `org`/`repo` arguments with `InvalidArgument`
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// The platform kind this client connects to.
    fn kind(&self) -> PlatformKind;

    /// The base URL this client is configured for.
    fn base_url(&self) -> &str;

    /// List repository names in an organization (or user namespace).
    async fn list_repos(&self, org: &str) -> Result<Vec<String>>;

    /// Check whether a repository exists.
    async fn has_repo(&self, org: &str, repo: &str) -> Result<bool>;

    /// Get the repository description, if any.
    async fn repo_description(&self, org: &str, repo: &str) -> Result<Option<String>>;

    /// Get the HTTP clone URL of a repository.
    async fn repo_clone_url(&self, org: &str, repo: &str) -> Result<String>;

    /// List branches as a name -> commit map.
    async fn list_branches(&self, org: &str, repo: &str) -> Result<RefMap>;

    /// List tags as a name -> commit map.
    async fn list_tags(&self, org: &str, repo: &str) -> Result<RefMap>;

    /// Create an uninitialized repository.
    async fn create_repo(&self, org: &str, repo: &str, description: &str) -> Result<()>;
}
