//! GitHub adapter.
//!
//! Client for github.com and GitHub Enterprise built on the `octocrab`
//! SDK.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Deserialized API payloads
//! - [`client`] - The [`GitHubClient`] implementing `PlatformClient`

mod client;
mod error;
mod types;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use types::{GitHubBranch, GitHubCommitRef, GitHubRepo, GitHubTag};
