//! GitLab API data types.

use serde::Deserialize;

/// GitLab project - fields we need from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: Option<String>,
    /// HTTP clone URL.
    pub http_url_to_repo: Option<String>,
}

/// GitLab branch with the commit it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabBranch {
    /// Branch name.
    pub name: String,
    /// Tip commit.
    pub commit: GitLabCommit,
}

/// GitLab tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabTag {
    /// Tag name.
    pub name: String,
    /// Commit the tag resolves to.
    pub commit: GitLabCommit,
}

/// Commit reference inside branch and tag payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabCommit {
    /// Commit SHA.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_deserializes_from_api_payload() {
        let json = r#"{
            "id": 278964,
            "name": "spring-petclinic",
            "path_with_namespace": "myorg/spring-petclinic",
            "description": "A sample application",
            "http_url_to_repo": "https://gitlab.example.com/myorg/spring-petclinic.git"
        }"#;
        let project: GitLabProject = serde_json::from_str(json).expect("deserialize");
        assert_eq!(project.name, "spring-petclinic");
        assert!(project.http_url_to_repo.as_deref().unwrap().ends_with(".git"));
    }

    #[test]
    fn branch_deserializes_commit_id() {
        let json = r#"{
            "name": "main",
            "commit": {"id": "6148ddd9671ccab86a3f0ae2dfa77d833b713ee8", "short_id": "6148ddd9"}
        }"#;
        let branch: GitLabBranch = serde_json::from_str(json).expect("deserialize");
        assert_eq!(branch.name, "main");
        assert_eq!(branch.commit.id, "6148ddd9671ccab86a3f0ae2dfa77d833b713ee8");
    }

    #[test]
    fn tag_deserializes_commit_id() {
        let json = r#"{
            "name": "v1.0.0",
            "commit": {"id": "abc123"},
            "message": null
        }"#;
        let tag: GitLabTag = serde_json::from_str(json).expect("deserialize");
        assert_eq!(tag.name, "v1.0.0");
        assert_eq!(tag.commit.id, "abc123");
    }
}
