//! Bitbucket adapter.
//!
//! Client for Bitbucket Server / Data Center speaking the REST 1.0 API
//! through the internal HTTP transport. Organizations map to Bitbucket
//! project keys.

mod client;
mod error;
mod types;

pub use client::BitbucketClient;
pub use error::BitbucketError;
pub use types::{BitbucketCloneLink, BitbucketLinks, BitbucketPage, BitbucketRef, BitbucketRepo};
