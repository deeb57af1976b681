//! Gitea API data types.

use serde::Deserialize;

/// Gitea repository - fields we need from the API response.
///
/// This struct is used to deserialize Gitea API responses. We define only
/// the fields we need, which makes the code resilient to API changes.
///
/// API docs: https://docs.gitea.com/api/1.20/#tag/repository
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaRepo {
    /// Repository name.
    pub name: String,
    /// Repository description.
    pub description: Option<String>,
    /// HTTP clone URL.
    pub clone_url: Option<String>,
}

/// Gitea branch with the commit it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaBranch {
    /// Branch name.
    pub name: String,
    /// Tip commit.
    pub commit: GiteaCommitRef,
}

/// Commit reference inside a branch payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaCommitRef {
    /// Commit SHA.
    pub id: String,
}

/// Gitea tag.
///
/// The `id` field carries the commit identifier the tag resolves to.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaTag {
    /// Tag name.
    pub name: String,
    /// Commit SHA.
    pub id: String,
}
