//! GitLab adapter.
//!
//! Client for gitlab.com and self-hosted GitLab instances built on the
//! `gitlab` crate's endpoint builders.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitLab API operations
//! - [`types`] - Deserialized API payloads
//! - [`client`] - The [`GitLabClient`] implementing `PlatformClient`

mod client;
mod error;
mod types;

pub use client::GitLabClient;
pub use error::GitLabError;
pub use types::{GitLabBranch, GitLabCommit, GitLabProject, GitLabTag};
