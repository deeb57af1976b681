use std::sync::Arc;

use super::errors::{PlatformError, Result};
use super::types::{Credentials, PlatformClient, PlatformKind};

/// Everything needed to construct a client for one side of a sync run.
#[derive(Debug, Clone)]
pub struct PlatformSpec {
    /// Platform base URL (e.g. "https://github.com", "https://gitea.example.com").
    pub url: String,
    /// Explicit platform kind; when absent the kind is detected from the URL.
    pub kind: Option<PlatformKind>,
    /// API and git credentials.
    pub credentials: Credentials,
    /// Optional HTTP(S) proxy URL, with embedded credentials if needed.
    pub proxy: Option<String>,
}

impl PlatformSpec {
    /// Create a spec with no credentials and no proxy.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: None,
            credentials: Credentials::default(),
            proxy: None,
        }
    }

    /// Resolve the platform kind: explicit value first, URL detection second.
    pub fn resolve_kind(&self) -> Result<PlatformKind> {
        if let Some(kind) = self.kind {
            return Ok(kind);
        }
        PlatformKind::detect_from_url(&self.url).ok_or_else(|| {
            PlatformError::unsupported(format!(
                "platform type not given and not detected from URL {:?}",
                self.url
            ))
        })
    }
}

/// Build a platform client from a spec.
///
/// The concrete adapter is chosen by [`PlatformSpec::resolve_kind`]. GitLab
/// client construction performs a network round-trip for authentication,
/// which is why this function is async.
pub async fn create_client(spec: &PlatformSpec) -> Result<Arc<dyn PlatformClient>> {
    let kind = spec.resolve_kind()?;

    match kind {
        #[cfg(feature = "github")]
        PlatformKind::GitHub => {
            let client = crate::github::GitHubClient::new(
                &spec.url,
                &spec.credentials,
                spec.proxy.as_deref(),
            )?;
            Ok(Arc::new(client))
        }
        #[cfg(feature = "gitea")]
        PlatformKind::Gitea => {
            let client = crate::gitea::GiteaClient::new(
                &spec.url,
                &spec.credentials,
                spec.proxy.as_deref(),
            )?;
            Ok(Arc::new(client))
        }
        #[cfg(feature = "gitlab")]
        PlatformKind::GitLab => {
            let client = crate::gitlab::GitLabClient::new(
                &spec.url,
                &spec.credentials,
                spec.proxy.as_deref(),
            )
            .await?;
            Ok(Arc::new(client))
        }
        #[cfg(feature = "bitbucket")]
        PlatformKind::Bitbucket => {
            let client = crate::bitbucket::BitbucketClient::new(
                &spec.url,
                &spec.credentials,
                spec.proxy.as_deref(),
            )?;
            Ok(Arc::new(client))
        }
        #[allow(unreachable_patterns)]
        other => Err(PlatformError::unsupported(format!(
            "support for {other} is not compiled in"
        ))),
    }
}
