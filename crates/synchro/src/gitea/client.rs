//! Gitea API client.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::de::DeserializeOwned;

use super::error::GiteaError;
use super::types::{GiteaBranch, GiteaRepo, GiteaTag};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::platform::{
    self, Credentials, PlatformClient, PlatformError, PlatformKind, RefMap, check_org, check_repo,
};

/// Page size for list endpoints.
///
/// Pages are fetched until an empty page comes back, so a server-side
/// limit lower than this stays correct.
const PAGE_SIZE: u32 = 50;

/// Gitea API client.
///
/// Works against Gitea, Forgejo, Codeberg, and other Gitea-compatible
/// forges. All I/O goes through the [`HttpTransport`] seam.
#[derive(Clone)]
pub struct GiteaClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    auth_header: Option<String>,
}

impl GiteaClient {
    /// Create a new Gitea client.
    ///
    /// A credential with a secret authenticates with HTTP basic auth;
    /// a lone login is sent as a `token` authorization header.
    pub fn new(
        host: &str,
        credentials: &Credentials,
        proxy: Option<&str>,
    ) -> Result<Self, PlatformError> {
        let transport = ReqwestTransport::with_proxy(proxy)
            .map_err(|e| GiteaError::Config(e.to_string()))?;
        Ok(Self::new_with_transport(
            host,
            credentials,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        host: &str,
        credentials: &Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let auth_header = match (&credentials.login, &credentials.secret) {
            (Some(login), Some(secret)) => Some(format!(
                "Basic {}",
                BASE64.encode(format!("{login}:{secret}"))
            )),
            (Some(token), None) => Some(format!("token {token}")),
            _ => None,
        };

        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            auth_header,
        }
    }

    fn request(&self, method: HttpMethod, path: &str, body: Vec<u8>) -> HttpRequest {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "synchro".to_string()),
        ];
        if !body.is_empty() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(auth) = &self.auth_header {
            headers.push(("Authorization".to_string(), auth.clone()));
        }

        HttpRequest {
            method,
            url: format!("{}/api/v1{}", self.host, path),
            headers,
            body,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GiteaError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| GiteaError::Http(e.to_string()))?;

        if !(200..300).contains(&response.status) {
            let message = String::from_utf8_lossy(&response.body).to_string();
            return Err(GiteaError::Api {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }

    /// Make an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GiteaError> {
        let response = self.send(self.request(HttpMethod::Get, path, Vec::new())).await?;
        serde_json::from_slice(&response.body).map_err(GiteaError::Json)
    }

    /// Make an authenticated POST request with a JSON body.
    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<(), GiteaError> {
        let body = serde_json::to_vec(body)?;
        self.send(self.request(HttpMethod::Post, path, body)).await?;
        Ok(())
    }

    /// Fetch all pages of a list endpoint until an empty page.
    async fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GiteaError> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let route = format!("{path}?page={page}&limit={PAGE_SIZE}");
            let batch: Vec<T> = self.get(&route).await?;
            if batch.is_empty() {
                break;
            }
            items.extend(batch);
            page += 1;
        }

        Ok(items)
    }

    async fn get_repo(&self, org: &str, repo: &str) -> Result<GiteaRepo, GiteaError> {
        self.get(&format!("/repos/{org}/{repo}")).await
    }
}

#[async_trait]
impl PlatformClient for GiteaClient {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Gitea
    }

    fn base_url(&self) -> &str {
        &self.host
    }

    async fn list_repos(&self, org: &str) -> platform::Result<Vec<String>> {
        check_org(org)?;
        let repos: Vec<GiteaRepo> = self
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
        let branches: Vec<GiteaBranch> = self
            .get_paginated(&format!("/repos/{org}/{repo}/branches"))
            .await
            .map_err(PlatformError::from)?;
        Ok(branches.into_iter().map(|b| (b.name, b.commit.id)).collect())
    }

    async fn list_tags(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let tags: Vec<GiteaTag> = self
            .get_paginated(&format!("/repos/{org}/{repo}/tags"))
            .await
            .map_err(PlatformError::from)?;
        Ok(tags.into_iter().map(|t| (t.name, t.id)).collect())
    }

    async fn create_repo(&self, org: &str, repo: &str, description: &str) -> platform::Result<()> {
        check_org(org)?;
        check_repo(repo)?;

        let body = serde_json::json!({
            "name": repo,
            "description": description,
            "auto_init": false,
        });

        // The org endpoint 404s when the namespace is a plain user; fall
        // back to creating under the authenticated user.
        match self.post(&format!("/orgs/{org}/repos"), &body).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                self.post("/user/repos", &body).await.map_err(PlatformError::from)
            }
            Err(e) => Err(e.into()),
        }
    }
}
