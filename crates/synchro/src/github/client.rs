//! GitHub API client.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{GitHubBranch, GitHubRepo, GitHubTag};
use crate::platform::{
    self, Credentials, PlatformClient, PlatformError, PlatformKind, RefMap, check_org, check_repo,
};

/// Page size for list endpoints.
const PAGE_SIZE: usize = 100;

/// Whether a credential looks like a GitHub token (`ghp_`, `gho_`, ...).
fn looks_like_token(login: &str) -> bool {
    // gh + one type letter + underscore, then the token body.
    let re = regex::Regex::new(r"^gh._\w+$").expect("token pattern is valid");
    re.is_match(login)
}

/// GitHub API client implementing the `PlatformClient` trait.
///
/// This wraps an [`Octocrab`] instance. The stock https://github.com host
/// uses octocrab's default API endpoint; any other URL is treated as a
/// GitHub Enterprise API base.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Octocrab,
    host: String,
}

impl GitHubClient {
    /// Create a new GitHub client.
    ///
    /// A credential matching the GitHub token shape authenticates as a
    /// personal access token; a login plus password uses basic auth;
    /// anything else is anonymous.
    pub fn new(
        url: &str,
        credentials: &Credentials,
        proxy: Option<&str>,
    ) -> Result<Self, PlatformError> {
        if proxy.is_some() {
            // octocrab offers no per-client proxy configuration.
            return Err(PlatformError::unsupported(
                "proxy is not supported for GitHub; use the HTTP_PROXY/HTTPS_PROXY/NO_PROXY \
                 environment variables",
            ));
        }

        let host = url.trim_end_matches('/').to_string();
        let mut builder = Octocrab::builder();

        if !host.to_lowercase().contains("github.com") {
            builder = builder
                .base_uri(host.clone())
                .map_err(|e| GitHubError::Config(e.to_string()))?;
        }

        match (&credentials.login, &credentials.secret) {
            (Some(login), _) if looks_like_token(login) => {
                builder = builder.personal_token(login.clone());
            }
            (Some(login), Some(secret)) => {
                builder = builder.basic_auth(login.clone(), secret.clone());
            }
            _ => {}
        }

        let inner = builder
            .build()
            .map_err(|e| PlatformError::from(GitHubError::Api(e)))?;

        Ok(Self { inner, host })
    }

    async fn get<T: DeserializeOwned>(&self, route: String) -> Result<T, GitHubError> {
        self.inner
            .get(route, None::<&()>)
            .await
            .map_err(GitHubError::Api)
    }

    /// Fetch all pages of a list endpoint until a short page.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        route_base: &str,
    ) -> Result<Vec<T>, GitHubError> {
        let mut items: Vec<T> = Vec::new();
        let mut page = 1u32;

        loop {
            let route = format!("{route_base}?per_page={PAGE_SIZE}&page={page}");
            let batch: Vec<T> = self.get(route).await?;
            let count = batch.len();
            items.extend(batch);
            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn get_repo(&self, org: &str, repo: &str) -> Result<GitHubRepo, GitHubError> {
        self.get(format!("/repos/{org}/{repo}")).await
    }
}

#[async_trait]
impl PlatformClient for GitHubClient {
    fn kind(&self) -> PlatformKind {
        PlatformKind::GitHub
    }

    fn base_url(&self) -> &str {
        &self.host
    }

    async fn list_repos(&self, org: &str) -> platform::Result<Vec<String>> {
        check_org(org)?;
        // /users/{org}/repos works for both orgs and plain users.
        let repos: Vec<GitHubRepo> = self
            .get_paginated(&format!("/users/{org}/repos"))
            .await
            .map_err(PlatformError::from)?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    async fn has_repo(&self, org: &str, repo: &str) -> platform::Result<bool> {
        check_org(org)?;
        check_repo(repo)?;
        match self.get_repo(org, repo).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn repo_description(&self, org: &str, repo: &str) -> platform::Result<Option<String>> {
        check_org(org)?;
        check_repo(repo)?;
        let repo = self.get_repo(org, repo).await.map_err(PlatformError::from)?;
        Ok(repo.description.filter(|d| !d.is_empty()))
    }

    async fn repo_clone_url(&self, org: &str, repo: &str) -> platform::Result<String> {
        check_org(org)?;
        check_repo(repo)?;
        let name = repo;
        let repo = self.get_repo(org, repo).await.map_err(PlatformError::from)?;
        repo.clone_url
            .ok_or_else(|| PlatformError::api(format!("no clone URL for {org}/{name}")))
    }

    async fn list_branches(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let branches: Vec<GitHubBranch> = self
            .get_paginated(&format!("/repos/{org}/{repo}/branches"))
            .await
            .map_err(PlatformError::from)?;
        Ok(branches
            .into_iter()
            .map(|b| (b.name, b.commit.sha))
            .collect())
    }

    async fn list_tags(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let tags: Vec<GitHubTag> = self
            .get_paginated(&format!("/repos/{org}/{repo}/tags"))
            .await
            .map_err(PlatformError::from)?;
        Ok(tags.into_iter().map(|t| (t.name, t.commit.sha)).collect())
    }

    async fn create_repo(&self, org: &str, repo: &str, description: &str) -> platform::Result<()> {
        check_org(org)?;
        check_repo(repo)?;

        let body = serde_json::json!({
            "name": repo,
            "description": description,
            "auto_init": false,
        });

        // /orgs/{org}/repos 404s when the namespace is a plain user; the
        // authenticated-user endpoint covers that case.
        let result: Result<serde_json::Value, GitHubError> = self
            .inner
            .post(format!("/orgs/{org}/repos"), Some(&body))
            .await
            .map_err(GitHubError::Api);

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                let _: serde_json::Value = self
                    .inner
                    .post("/user/repos".to_string(), Some(&body))
                    .await
                    .map_err(GitHubError::Api)
                    .map_err(PlatformError::from)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_token() {
        assert!(looks_like_token("ghp_abcdef1234567890"));
        assert!(looks_like_token("ghu_foo1234567890abcdef"));
        assert!(looks_like_token("gho_1234"));
        assert!(!looks_like_token("my-username"));
        assert!(!looks_like_token("ghp-not-a-token"));
        assert!(!looks_like_token(""));
    }

    #[test]
    fn test_proxy_is_rejected() {
        let err = GitHubClient::new(
            "https://github.com",
            &Credentials::default(),
            Some("http://proxy.example.com:8080"),
        )
        .expect_err("proxy should be rejected");
        assert!(matches!(err, PlatformError::Unsupported { .. }));
        assert!(err.to_string().contains("HTTP_PROXY"));
    }

    #[tokio::test]
    async fn test_anonymous_client_builds() {
        let client = GitHubClient::new("https://github.com", &Credentials::default(), None)
            .expect("anonymous client");
        assert_eq!(client.kind(), PlatformKind::GitHub);
        assert_eq!(client.base_url(), "https://github.com");
    }

    #[test]
    fn test_github_client_is_a_platform_client() {
        fn assert_platform_client<T: PlatformClient>() {}
        assert_platform_client::<GitHubClient>();
    }
}
