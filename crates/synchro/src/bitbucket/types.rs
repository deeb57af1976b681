//! Bitbucket Server API data types.
//!
//! Shapes follow the Bitbucket Server / Data Center REST 1.0 API, which
//! wraps every list endpoint in a paged envelope.

use serde::Deserialize;

/// Paged envelope around Bitbucket list responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitbucketPage<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    /// Whether this is the last page.
    pub is_last_page: bool,
    /// Start index of the next page, when there is one.
    pub next_page_start: Option<u32>,
}

/// Bitbucket repository - fields we need from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketRepo {
    /// URL-safe repository identifier.
    pub slug: String,
    /// Repository description.
    pub description: Option<String>,
    /// Link collections, including clone URLs.
    #[serde(default)]
    pub links: BitbucketLinks,
}

/// Repository link collections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitbucketLinks {
    /// Clone links, one per protocol.
    #[serde(default)]
    pub clone: Vec<BitbucketCloneLink>,
}

/// A single clone link (`name` is the protocol, e.g. "http" or "ssh").
#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketCloneLink {
    pub href: String,
    pub name: String,
}

/// A branch or tag: Bitbucket uses the same shape for both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitbucketRef {
    /// Human-readable ref name.
    pub display_id: String,
    /// Commit the ref points at.
    pub latest_commit: String,
}
