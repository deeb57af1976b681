//! Bitbucket Server API client.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::de::DeserializeOwned;

use super::error::BitbucketError;
use super::types::{BitbucketPage, BitbucketRef, BitbucketRepo};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::platform::{
    self, Credentials, PlatformClient, PlatformError, PlatformKind, RefMap, check_org, check_repo,
};

/// Page size for list endpoints.
const PAGE_SIZE: u32 = 50;

/// Bitbucket Server / Data Center API client (REST 1.0).
///
/// Organizations map to Bitbucket project keys; repository names are the
/// URL-safe slugs. All I/O goes through the [`HttpTransport`] seam.
#[derive(Clone)]
pub struct BitbucketClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    auth_header: Option<String>,
}

impl BitbucketClient {
    /// Create a new Bitbucket client using HTTP basic auth.
    pub fn new(
        host: &str,
        credentials: &Credentials,
        proxy: Option<&str>,
    ) -> Result<Self, PlatformError> {
        let transport = ReqwestTransport::with_proxy(proxy)
            .map_err(|e| BitbucketError::Config(e.to_string()))?;
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
        let auth_header = credentials.login.as_ref().map(|login| {
            let secret = credentials.secret.as_deref().unwrap_or("");
            format!("Basic {}", BASE64.encode(format!("{login}:{secret}")))
        });

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
            url: format!("{}/rest/api/1.0{}", self.host, path),
            headers,
            body,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BitbucketError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| BitbucketError::Http(e.to_string()))?;

        if !(200..300).contains(&response.status) {
            let message = String::from_utf8_lossy(&response.body).to_string();
            return Err(BitbucketError::Api {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BitbucketError> {
        let response = self.send(self.request(HttpMethod::Get, path, Vec::new())).await?;
        serde_json::from_slice(&response.body).map_err(BitbucketError::Json)
    }

    async fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), BitbucketError> {
        let body = serde_json::to_vec(body)?;
        self.send(self.request(method, path, body)).await?;
        Ok(())
    }

    /// Fetch all pages of a paged endpoint, following `nextPageStart`.
    async fn get_paged<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, BitbucketError> {
        let mut items = Vec::new();
        let mut start = 0u32;

        loop {
            let route = format!("{path}?start={start}&limit={PAGE_SIZE}");
            let page: BitbucketPage<T> = self.get(&route).await?;
            items.extend(page.values);
            if page.is_last_page {
                break;
            }
            // A server that claims more pages but gives no start index
            // would loop forever otherwise.
            match page.next_page_start {
                Some(next) => start = next,
                None => break,
            }
        }

        Ok(items)
    }

    async fn get_repo(&self, org: &str, repo: &str) -> Result<BitbucketRepo, BitbucketError> {
        self.get(&format!("/projects/{org}/repos/{repo}")).await
    }
}

#[async_trait]
impl PlatformClient for BitbucketClient {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Bitbucket
    }

    fn base_url(&self) -> &str {
        &self.host
    }

    async fn list_repos(&self, org: &str) -> platform::Result<Vec<String>> {
        check_org(org)?;
        let repos: Vec<BitbucketRepo> = self
            .get_paged(&format!("/projects/{org}/repos"))
            .await
            .map_err(PlatformError::from)?;
        Ok(repos.into_iter().map(|r| r.slug).collect())
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
        repo.links
            .clone
            .into_iter()
            .find(|link| link.name == "http")
            .map(|link| link.href)
            .ok_or_else(|| {
                PlatformError::api(format!("no http clone link for {org}/{name}"))
            })
    }

    async fn list_branches(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let refs: Vec<BitbucketRef> = self
            .get_paged(&format!("/projects/{org}/repos/{repo}/branches"))
            .await
            .map_err(PlatformError::from)?;
        Ok(refs
            .into_iter()
            .map(|r| (r.display_id, r.latest_commit))
            .collect())
    }

    async fn list_tags(&self, org: &str, repo: &str) -> platform::Result<RefMap> {
        check_org(org)?;
        check_repo(repo)?;
        let refs: Vec<BitbucketRef> = self
            .get_paged(&format!("/projects/{org}/repos/{repo}/tags"))
            .await
            .map_err(PlatformError::from)?;
        Ok(refs
            .into_iter()
            .map(|r| (r.display_id, r.latest_commit))
            .collect())
    }

    async fn create_repo(&self, org: &str, repo: &str, description: &str) -> platform::Result<()> {
        check_org(org)?;
        check_repo(repo)?;

        // Creation does not accept a description; set it with a follow-up
        // update like the web UI does.
        self.send_json(
            HttpMethod::Post,
            &format!("/projects/{org}/repos"),
            &serde_json::json!({"name": repo, "scmId": "git"}),
        )
        .await
        .map_err(PlatformError::from)?;

        self.send_json(
            HttpMethod::Put,
            &format!("/projects/{org}/repos/{repo}"),
            &serde_json::json!({"description": description}),
        )
        .await
        .map_err(PlatformError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    const HOST: &str = "https://bitbucket.example.com";

    fn client(transport: &MockTransport) -> BitbucketClient {
        BitbucketClient::new_with_transport(
            HOST,
            &Credentials {
                login: Some("foo".to_string()),
                secret: Some("bar".to_string()),
            },
            Arc::new(transport.clone()),
        )
    }

    #[tokio::test]
    async fn list_repos_follows_next_page_start() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos?start=0&limit=50"),
            r#"{"isLastPage": false, "nextPageStart": 50, "values": [{"slug": "alpha"}]}"#,
        );
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos?start=50&limit=50"),
            r#"{"isLastPage": true, "values": [{"slug": "beta"}]}"#,
        );

        let repos = client(&transport).list_repos("MY").await.expect("repos");
        assert_eq!(repos, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[tokio::test]
    async fn requests_carry_basic_auth() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos?start=0&limit=50"),
            r#"{"isLastPage": true, "values": []}"#,
        );

        client(&transport).list_repos("MY").await.expect("repos");

        let requests = transport.requests();
        let auth = requests[0]
            .headers
            .iter()
            .find(|(k, _)| k == "Authorization")
            .map(|(_, v)| v.as_str());
        // base64("foo:bar")
        assert_eq!(auth, Some("Basic Zm9vOmJhcg=="));
    }

    #[tokio::test]
    async fn has_repo_maps_404_to_false() {
        let transport = MockTransport::new();
        transport.push_status(
            HttpMethod::Get,
            format!("{HOST}/rest/api/1.0/projects/MY/repos/missing"),
            404,
        );

        assert!(!client(&transport)
            .has_repo("MY", "missing")
            .await
            .expect("has_repo"));
    }

    #[tokio::test]
    async fn clone_url_picks_the_http_link() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos/app"),
            r#"{
                "slug": "app",
                "links": {"clone": [
                    {"href": "ssh://git@bitbucket.example.com/my/app.git", "name": "ssh"},
                    {"href": "https://bitbucket.example.com/scm/my/app.git", "name": "http"}
                ]}
            }"#,
        );

        let url = client(&transport)
            .repo_clone_url("MY", "app")
            .await
            .expect("clone url");
        assert_eq!(url, "https://bitbucket.example.com/scm/my/app.git");
    }

    #[tokio::test]
    async fn clone_url_missing_http_link_is_an_error() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos/app"),
            r#"{"slug": "app", "links": {"clone": [
                {"href": "ssh://git@bitbucket.example.com/my/app.git", "name": "ssh"}
            ]}}"#,
        );

        let err = client(&transport)
            .repo_clone_url("MY", "app")
            .await
            .expect_err("no http link");
        assert!(err.to_string().contains("no http clone link"));
    }

    #[tokio::test]
    async fn list_branches_maps_display_id_to_latest_commit() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{HOST}/rest/api/1.0/projects/MY/repos/app/branches?start=0&limit=50"),
            r#"{"isLastPage": true, "values": [
                {"displayId": "main", "latestCommit": "aaa111"},
                {"displayId": "develop", "latestCommit": "bbb222"}
            ]}"#,
        );

        let branches = client(&transport)
            .list_branches("MY", "app")
            .await
            .expect("branches");
        assert_eq!(branches.get("main").map(String::as_str), Some("aaa111"));
        assert_eq!(branches.get("develop").map(String::as_str), Some("bbb222"));
    }

    #[tokio::test]
    async fn create_repo_creates_then_sets_description() {
        let transport = MockTransport::new();
        transport.push_status(
            HttpMethod::Post,
            format!("{HOST}/rest/api/1.0/projects/MY/repos"),
            201,
        );
        transport.push_status(
            HttpMethod::Put,
            format!("{HOST}/rest/api/1.0/projects/MY/repos/new-repo"),
            200,
        );

        client(&transport)
            .create_repo("MY", "new-repo", "A new repository")
            .await
            .expect("create");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let create_body: serde_json::Value =
            serde_json::from_slice(&requests[0].body).expect("json");
        assert_eq!(create_body["scmId"], "git");
        let update_body: serde_json::Value =
            serde_json::from_slice(&requests[1].body).expect("json");
        assert_eq!(update_body["description"], "A new repository");
    }
}
