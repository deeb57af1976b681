//! Git subprocess execution.
//!
//! Content synchronization (clone, push) shells out to the `git` binary.
//! The [`GitRunner`] trait is the seam between the sync engine and the
//! actual subprocess work, so engine tests can record git operations
//! instead of running them.
//!
//! A single transient clone directory is reused opportunistically: when it
//! already holds a clone of the repository being synchronized (same origin
//! URL, same bare-ness) it is fetched instead of re-cloned; anything else
//! in its place is deleted.

mod askpass;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::platform::Credentials;

pub use askpass::Askpass;

/// Default transient clone directory, relative to the working directory.
pub const DEFAULT_CLONE_DIR: &str = "tmp-git-repo";

/// Errors from git subprocess execution.
#[derive(Debug, Error)]
pub enum GitError {
    /// A git command exited with a non-zero status.
    #[error("git {command} failed ({status}): {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },

    /// Spawning git or touching the clone directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of preparing the local clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    /// A fresh clone was made.
    Cloned,
    /// The existing clone directory matched and was fetched instead.
    Reused,
}

/// Seam between the sync engine and git subprocess work.
///
/// Clone and fetch operations authenticate as the source platform, push
/// operations as the target platform.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Ensure the clone directory holds an up-to-date clone of `url`.
    async fn clone_or_reuse(&self, url: &str, mirror: bool) -> Result<CloneOutcome, GitError>;

    /// Push all refs to `url` (`git push --mirror`).
    async fn push_mirror(&self, url: &str) -> Result<(), GitError>;

    /// Push a single branch to `url`.
    async fn push_branch(&self, url: &str, branch: &str) -> Result<(), GitError>;

    /// Push all tags to `url` (`git push --tags`).
    async fn push_tags(&self, url: &str) -> Result<(), GitError>;
}

/// Production [`GitRunner`] shelling out to the `git` binary.
pub struct CommandGit {
    clone_dir: PathBuf,
    source_auth: Option<Askpass>,
    target_auth: Option<Askpass>,
}

impl CommandGit {
    /// Create a runner over `clone_dir`.
    ///
    /// Credentials are wired into git through a generated `GIT_ASKPASS`
    /// helper; anonymous access needs none.
    pub fn new(
        clone_dir: impl Into<PathBuf>,
        source: &Credentials,
        target: &Credentials,
    ) -> Result<Self, GitError> {
        Ok(Self {
            clone_dir: clone_dir.into(),
            source_auth: Askpass::new(source)?,
            target_auth: Askpass::new(target)?,
        })
    }

    /// The transient clone directory this runner manages.
    #[must_use]
    pub fn clone_dir(&self) -> &Path {
        &self.clone_dir
    }

    async fn run(&self, args: &[&str], auth: Option<&Askpass>) -> Result<String, GitError> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        // Fail fast instead of hanging on an interactive credential prompt.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        if let Some(askpass) = auth {
            askpass.apply(&mut cmd);
        }

        tracing::debug!(command = %format!("git {}", args.join(" ")), "Running git");
        let output = cmd.output().await?;

        if !output.status.success() {
            // The subcommand follows the "-C <dir>" pair when present.
            let subcommand = if args.first() == Some(&"-C") {
                args.get(2)
            } else {
                args.first()
            };
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Command {
                command: subcommand.copied().unwrap_or("git").to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.lines().last().unwrap_or("").trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn run_in_clone(&self, args: &[&str], auth: Option<&Askpass>) -> Result<String, GitError> {
        let dir = self.clone_dir.to_string_lossy().into_owned();
        let mut full: Vec<&str> = vec!["-C", dir.as_str()];
        full.extend_from_slice(args);
        self.run(&full, auth).await
    }

    /// Check whether the existing clone directory is a clone of `url` with
    /// the expected bare-ness. Any failure to inspect it counts as a
    /// mismatch and forces a re-clone.
    async fn existing_clone_matches(&self, url: &str, mirror: bool) -> bool {
        let origin = match self.run_in_clone(&["config", "--get", "remote.origin.url"], None).await
        {
            Ok(origin) => origin,
            Err(_) => return false,
        };
        if origin != url {
            return false;
        }

        match self.run_in_clone(&["rev-parse", "--is-bare-repository"], None).await {
            Ok(bare) => (bare == "true") == mirror,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl GitRunner for CommandGit {
    async fn clone_or_reuse(&self, url: &str, mirror: bool) -> Result<CloneOutcome, GitError> {
        if self.clone_dir.exists() {
            if self.existing_clone_matches(url, mirror).await {
                let fetch_args: &[&str] = if mirror {
                    &["fetch", "--prune", "origin"]
                } else {
                    &["fetch", "--prune", "--tags", "origin"]
                };
                self.run_in_clone(fetch_args, self.source_auth.as_ref())
                    .await?;
                return Ok(CloneOutcome::Reused);
            }
            std::fs::remove_dir_all(&self.clone_dir)?;
        }

        let dir = self.clone_dir.to_string_lossy().into_owned();
        let args: Vec<&str> = if mirror {
            vec!["clone", "--mirror", url, dir.as_str()]
        } else {
            vec!["clone", url, dir.as_str()]
        };
        self.run(&args, self.source_auth.as_ref()).await?;
        Ok(CloneOutcome::Cloned)
    }

    async fn push_mirror(&self, url: &str) -> Result<(), GitError> {
        self.run_in_clone(&["push", "--mirror", url], self.target_auth.as_ref())
            .await?;
        Ok(())
    }

    async fn push_branch(&self, url: &str, branch: &str) -> Result<(), GitError> {
        let refspec = format!("refs/remotes/origin/{branch}:refs/heads/{branch}");
        self.run_in_clone(&["push", url, &refspec], self.target_auth.as_ref())
            .await?;
        Ok(())
    }

    async fn push_tags(&self, url: &str) -> Result<(), GitError> {
        self.run_in_clone(&["push", "--tags", url], self.target_auth.as_ref())
            .await?;
        Ok(())
    }
}
