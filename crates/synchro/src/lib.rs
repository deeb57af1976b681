//! Synchro - repository synchronization between Git hosting platforms.
//!
//! This library synchronizes repositories (existence, branches, tags)
//! between two platforms - GitHub, Gitea/Forgejo/Codeberg, GitLab, and
//! Bitbucket Server - using each platform's REST API to enumerate state
//! and the `git` binary to mirror or push content.
//!
//! # Features
//!
//! Each platform adapter sits behind a cargo feature (`github`, `gitea`,
//! `gitlab`, `bitbucket`); all are enabled by default.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use synchro::git::{CommandGit, DEFAULT_CLONE_DIR};
//! use synchro::platform::{PlatformSpec, create_client};
//! use synchro::sync::{SyncEngine, SyncOptions};
//!
//! let source = create_client(&PlatformSpec::new("https://github.com")).await?;
//! let target = create_client(&PlatformSpec::new("https://gitea.example.com")).await?;
//! let git = CommandGit::new(
//!     DEFAULT_CLONE_DIR,
//!     &Default::default(),
//!     &Default::default(),
//! )?;
//!
//! let options = SyncOptions::new("spring-projects", "MyOrg");
//! let engine = SyncEngine::new(source, target, Arc::new(git), options)?;
//! let summary = engine.run(None).await?;
//! println!("updated {} repositories", summary.repos_updated);
//! ```

pub mod git;
pub mod http;
pub mod platform;
pub mod sync;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "gitea")]
pub mod gitea;

#[cfg(feature = "gitlab")]
pub mod gitlab;

#[cfg(feature = "bitbucket")]
pub mod bitbucket;

pub use git::{CloneOutcome, CommandGit, DEFAULT_CLONE_DIR, GitError, GitRunner};
pub use platform::{
    Credentials, PlatformClient, PlatformError, PlatformKind, PlatformSpec, RefMap, create_client,
};
pub use sync::{SyncEngine, SyncError, SyncOptions, SyncProgress, SyncSummary};
