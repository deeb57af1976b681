//! Gitea adapter.
//!
//! Client for Gitea-based forges (Gitea, Forgejo, Codeberg) speaking the
//! `/api/v1` REST API through the internal HTTP transport.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for Gitea API operations
//! - [`types`] - Deserialized API payloads
//! - [`client`] - The [`GiteaClient`] implementing `PlatformClient`

mod client;
mod error;
mod types;

pub use client::GiteaClient;
pub use error::GiteaError;
pub use types::{GiteaBranch, GiteaCommitRef, GiteaRepo, GiteaTag};
