//! GitLab API client.

use std::sync::Arc;

use async_trait::async_trait;
use gitlab::api::{self, AsyncQuery, Pagination};
use gitlab::{AsyncGitlab, GitlabBuilder};
use tokio::sync::Mutex;

use super::error::GitLabError;
use super::types::{GitLabBranch, GitLabProject, GitLabTag};
use crate::platform::{
    self, Credentials, PlatformClient, PlatformError, PlatformKind, RefMap, check_org, check_repo,
};

/// GitLab API client wrapper with Arc<Mutex<>> for cloneability.
///
/// Wraps the `AsyncGitlab` client from the gitlab crate in an
/// `Arc<Mutex<>>` to enable cloning. Most time is spent on network I/O,
/// not holding the lock.
#[derive(Clone, Debug)]
pub struct GitLabClient {
    inner: Arc<Mutex<AsyncGitlab>>,
    host: String,
}

impl GitLabClient {
    /// Create a new GitLab client.
    ///
    /// Authentication is by personal access token only; the login is used
    /// as the token. Construction performs an authentication round-trip.
    pub async fn new(
        url: &str,
        credentials: &Credentials,
        proxy: Option<&str>,
    ) -> Result<Self, PlatformError> {
        if proxy.is_some() {
            return Err(PlatformError::unsupported(
                "proxy is not supported for GitLab; use the HTTP_PROXY/HTTPS_PROXY/NO_PROXY \
                 environment variables",
            ));
        }
        // A "glpat-" login is a personal access token even when a password
        // was supplied alongside it.
        let token = match (&credentials.login, &credentials.secret) {
            (Some(login), _) if login.starts_with("glpat-") => login.as_str(),
            (Some(login), None) => login.as_str(),
            (Some(_), Some(_)) => {
                return Err(PlatformError::unsupported(
                    "GitLab basic auth is not supported; pass a personal access token as the login",
                ));
            }
            (None, _) => {
                return Err(PlatformError::unsupported(
                    "GitLab requires a personal access token",
                ));
            }
        };

        // The gitlab crate expects a bare hostname and adds https:// itself.
        let host_only = url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        let inner = GitlabBuilder::new(host_only, token)
            .build_async()
            .await
            .map_err(|e| PlatformError::from(GitLabError::Auth(e.to_string())))?;

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
            host: format!("https://{host_only}"),
        })
    }

    async fn get_project(&self, org: &str, repo: &str) -> Result<GitLabProject, GitLabError> {
        let endpoint = gitlab::api::projects::Project::builder()
            .project(format!("{org}/{repo}"))
            .build()
            .map_err(|e| GitLabError::Builder(e.to_string()))?;

        let client = self.inner.lock().await;
        endpoint
            .query_async(&*client)
            .await
            .map_err(GitLabError::from_api_error)
    }

    async fn list_group_projects(&self, org: &str) -> Result<Vec<GitLabProject>, GitLabError> {
        let endpoint = gitlab::api::groups::projects::GroupProjects::builder()
            .group(org)
            .include_subgroups(true)
            .build()
            .map_err(|e| GitLabError::Builder(e.to_string()))?;

        let paged = api::paged(endpoint, Pagination::All);
        let client = self.inner.lock().await;
        paged
            .query_async(&*client)
            .await
            .map_err(GitLabError::from_api_error)
    }

    async fn list_user_projects(&self, org: &str) -> Result<Vec<GitLabProject>, GitLabError> {
        let endpoint = gitlab::api::users::UserProjects::builder()
            .user(org)
            .build()
            .map_err(|e| GitLabError::Builder(e.to_string()))?;

        let paged = api::paged(endpoint, Pagination::All);
        let client = self.inner.lock().await;
        paged
            .query_async(&*client)
            .await
            .map_err(GitLabError::from_api_error)
    }
}

#[async_trait]
impl PlatformClient for GitLabClient {
    fn kind(&self) -> PlatformKind {
        PlatformKind::GitLab
    }

    fn base_url(&self) -> &str {
        &self.host
    }

    async fn list_repos(&self, org: &str) -> platform::Result<Vec<String>> {
        check_org(org)?;
        // Groups and users are different endpoints; try the group first and
        // fall back when the namespace turns out to be a user.
        let projects = match self.list_group_projects(org).await {
            Ok(projects) => projects,
            Err(e) if e.is_not_found() => {
                self.list_user_projects(org).await.map_err(PlatformError::from)?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(projects.into_iter().map(|p| p.name).collect())
    }

    async fn has_repo(&self, org: &str, repo: &str) -> platform::Result<bool> {
        check_org(org)?;
        check_repo(repo)?;
        match self.get_project(org, repo).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn repo_description(&self, org: &str, repo: &str) -> platform::Result<Option<String>> {
        check_org(org)?;
        check_repo(repo)?;
        let project = self
            .get_project(org, repo)
            .await
            .map_err(PlatformError::from)?;
        Ok(project.description.filter(|d| !d.is_empty()))
    }

    async fn repo_clone_url(&self, org: &str, repo: &str) -> platform::Result<String> {
        check_org(org)?;
        check_repo(repo)?;
        let name = repo;
        let project = self
            .get_project(org, repo)
            .await
            .map_err(PlatformError::from)?;
        project
            .http_url_to_repo
            .ok_or_else(|| PlatformError::api(format!("no clone URL for {org}/{name}")))
    }

    async fn list_branches(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let endpoint = gitlab::api::projects::repository::branches::Branches::builder()
            .project(format!("{org}/{repo}"))
            .build()
            .map_err(|e| PlatformError::from(GitLabError::Builder(e.to_string())))?;

        let paged = api::paged(endpoint, Pagination::All);
        let client = self.inner.lock().await;
        let branches: Vec<GitLabBranch> = paged
            .query_async(&*client)
            .await
            .map_err(|e| PlatformError::from(GitLabError::from_api_error(e)))?;

        Ok(branches
            .into_iter()
            .map(|b| (b.name, b.commit.id))
            .collect())
    }

    async fn list_tags(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let endpoint = gitlab::api::projects::repository::tags::Tags::builder()
            .project(format!("{org}/{repo}"))
            .build()
            .map_err(|e| PlatformError::from(GitLabError::Builder(e.to_string())))?;

        let paged = api::paged(endpoint, Pagination::All);
        let client = self.inner.lock().await;
        let tags: Vec<GitLabTag> = paged
            .query_async(&*client)
            .await
            .map_err(|e| PlatformError::from(GitLabError::from_api_error(e)))?;

        Ok(tags.into_iter().map(|t| (t.name, t.commit.id)).collect())
    }

    async fn create_repo(&self, org: &str, repo: &str, description: &str) -> platform::Result<()> {
        check_org(org)?;
        check_repo(repo)?;

        // Created in the authenticated user's namespace, like the API
        // default when no namespace is given.
        let endpoint = gitlab::api::projects::CreateProject::builder()
            .name(repo)
            .description(description)
            .visibility(gitlab::api::common::VisibilityLevel::Private)
            .build()
            .map_err(|e| PlatformError::from(GitLabError::Builder(e.to_string())))?;

        let client = self.inner.lock().await;
        api::ignore(endpoint)
            .query_async(&*client)
            .await
            .map_err(|e| PlatformError::from(GitLabError::from_api_error(e)))
    }
}
