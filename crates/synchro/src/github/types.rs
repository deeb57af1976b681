//! GitHub API data types.
//!
//! Minimal payload shapes for the endpoints the sync engine needs; octocrab
//! deserializes straight into these.

use serde::Deserialize;

/// GitHub repository - fields we need from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    /// Repository name.
    pub name: String,
    /// Repository description.
    pub description: Option<String>,
    /// HTTP clone URL.
    pub clone_url: Option<String>,
}

/// GitHub branch with the commit it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubBranch {
    /// Branch name.
    pub name: String,
    /// Tip commit.
    pub commit: GitHubCommitRef,
}

/// GitHub tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTag {
    /// Tag name.
    pub name: String,
    /// Commit the tag resolves to.
    pub commit: GitHubCommitRef,
}

/// Commit reference inside branch and tag payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitRef {
    /// Commit SHA.
    pub sha: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_deserializes_from_api_payload() {
        let json = r#"{
            "id": 1296269,
            "name": "spring-petclinic",
            "full_name": "spring-projects/spring-petclinic",
            "description": "A sample Spring-based application",
            "clone_url": "https://github.com/spring-projects/spring-petclinic.git"
        }"#;
        let repo: GitHubRepo = serde_json::from_str(json).expect("deserialize");
        assert_eq!(repo.name, "spring-petclinic");
        assert!(repo.clone_url.as_deref().unwrap().ends_with(".git"));
    }

    #[test]
    fn branch_deserializes_commit_sha() {
        let json = r#"{
            "name": "main",
            "commit": {"sha": "6148ddd9671ccab86a3f0ae2dfa77d833b713ee8", "url": "x"},
            "protected": true
        }"#;
        let branch: GitHubBranch = serde_json::from_str(json).expect("deserialize");
        assert_eq!(branch.name, "main");
        assert_eq!(branch.commit.sha, "6148ddd9671ccab86a3f0ae2dfa77d833b713ee8");
    }

    #[test]
    fn tag_deserializes_commit_sha() {
        let json = r#"{
            "name": "v1.0.0",
            "commit": {"sha": "abc123", "url": "x"},
            "zipball_url": "x",
            "tarball_url": "x"
        }"#;
        let tag: GitHubTag = serde_json::from_str(json).expect("deserialize");
        assert_eq!(tag.name, "v1.0.0");
        assert_eq!(tag.commit.sha, "abc123");
    }
}
