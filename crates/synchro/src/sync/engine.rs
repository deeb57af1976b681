//! The synchronization engine.
//!
//! A sequential driver over a source client, a target client, and a git
//! runner: repositories are processed one at a time, branches compared by
//! commit equality, and the first error aborts the run.

use std::sync::Arc;

use thiserror::Error;

use super::filter::NameFilter;
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{SyncOptions, SyncSummary};
use crate::git::{CloneOutcome, GitError, GitRunner};
use crate::platform::{DEFAULT_REPO_DESCRIPTION, PlatformClient, PlatformError};

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A platform API call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A git command failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// An include/exclude pattern did not compile.
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Sequential synchronization driver.
pub struct SyncEngine {
    source: Arc<dyn PlatformClient>,
    target: Arc<dyn PlatformClient>,
    git: Arc<dyn GitRunner>,
    options: SyncOptions,
    repo_filter: NameFilter,
    branch_filter: NameFilter,
}

impl SyncEngine {
    /// Build an engine, compiling the name filters up front.
    pub fn new(
        source: Arc<dyn PlatformClient>,
        target: Arc<dyn PlatformClient>,
        git: Arc<dyn GitRunner>,
        options: SyncOptions,
    ) -> Result<Self, SyncError> {
        let repo_filter = NameFilter::new(
            options.repos_include.as_deref(),
            options.repos_exclude.as_deref(),
        )?;
        let branch_filter = NameFilter::new(
            options.branches_include.as_deref(),
            options.branches_exclude.as_deref(),
        )?;

        Ok(Self {
            source,
            target,
            git,
            options,
            repo_filter,
            branch_filter,
        })
    }

    /// Run the synchronization, returning the final counters.
    pub async fn run(
        &self,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<SyncSummary, SyncError> {
        let source_org = &self.options.source_org;
        let mut summary = SyncSummary::default();

        emit(
            on_progress,
            SyncProgress::ListingRepos {
                org: source_org.clone(),
            },
        );
        let all_repos = self.source.list_repos(source_org).await?;
        let total = all_repos.len();
        let repos = self.repo_filter.apply(all_repos);
        emit(
            on_progress,
            SyncProgress::ReposListed {
                org: source_org.clone(),
                total,
                matched: repos.len(),
            },
        );

        for repo in &repos {
            summary.repos_processed += 1;
            self.sync_repo(repo, &mut summary, on_progress).await?;
        }

        emit(on_progress, SyncProgress::Complete { summary });
        Ok(summary)
    }

    /// Synchronize a single repository.
    async fn sync_repo(
        &self,
        repo: &str,
        summary: &mut SyncSummary,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), SyncError> {
        let source_org = &self.options.source_org;
        let target_org = &self.options.target_org;

        emit(
            on_progress,
            SyncProgress::RepoStarted {
                repo: repo.to_string(),
            },
        );

        if !self.target.has_repo(target_org, repo).await? {
            emit(
                on_progress,
                SyncProgress::RepoMissingOnTarget {
                    repo: repo.to_string(),
                },
            );
            self.mirror(repo, true, on_progress).await?;
            summary.repos_updated += 1;
            return Ok(());
        }

        let source_branches = self.source.list_branches(source_org, repo).await?;
        if source_branches.is_empty() {
            emit(
                on_progress,
                SyncProgress::SourceHasNoBranches {
                    repo: repo.to_string(),
                },
            );
            return Ok(());
        }

        let target_branches = self.target.list_branches(target_org, repo).await?;
        if target_branches.is_empty() {
            emit(
                on_progress,
                SyncProgress::TargetHasNoBranches {
                    repo: repo.to_string(),
                },
            );
            self.mirror(repo, false, on_progress).await?;
            summary.repos_updated += 1;
            return Ok(());
        }

        let mut out_of_sync = Vec::new();
        for (branch, source_commit) in &source_branches {
            if !self.branch_filter.matches(branch) {
                continue;
            }
            summary.branches_compared += 1;
            let target_commit = target_branches.get(branch);
            let in_sync = target_commit == Some(source_commit);
            emit(
                on_progress,
                SyncProgress::BranchCompared {
                    repo: repo.to_string(),
                    branch: branch.clone(),
                    source_commit: source_commit.clone(),
                    target_commit: target_commit.cloned(),
                    in_sync,
                },
            );
            if !in_sync {
                out_of_sync.push(branch.clone());
            }
        }

        if !out_of_sync.is_empty() {
            self.push_branches(repo, &out_of_sync, on_progress).await?;
            summary.branches_updated += out_of_sync.len();
            summary.repos_updated += 1;
            return Ok(());
        }

        let source_tags = self.source.list_tags(source_org, repo).await?;
        let target_tags = self.target.list_tags(target_org, repo).await?;
        if source_tags != target_tags {
            emit(
                on_progress,
                SyncProgress::TagsOnly {
                    repo: repo.to_string(),
                },
            );
            self.push_tags(repo, on_progress).await?;
            summary.repos_updated += 1;
            return Ok(());
        }

        emit(
            on_progress,
            SyncProgress::RepoInSync {
                repo: repo.to_string(),
            },
        );
        Ok(())
    }

    /// Mirror the repository to the target, creating it there first when
    /// requested.
    async fn mirror(
        &self,
        repo: &str,
        create: bool,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), SyncError> {
        if self.options.dry_run {
            return Ok(());
        }

        if create {
            let description = self
                .source
                .repo_description(&self.options.source_org, repo)
                .await?
                .unwrap_or_else(|| DEFAULT_REPO_DESCRIPTION.to_string());
            self.target
                .create_repo(&self.options.target_org, repo, &description)
                .await?;
        }

        self.clone_source(repo, true, on_progress).await?;

        let target_url = self
            .target
            .repo_clone_url(&self.options.target_org, repo)
            .await?;
        emit(
            on_progress,
            SyncProgress::PushingMirror {
                repo: repo.to_string(),
            },
        );
        self.git.push_mirror(&target_url).await?;
        Ok(())
    }

    /// Push the out-of-sync branches individually.
    async fn push_branches(
        &self,
        repo: &str,
        branches: &[String],
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), SyncError> {
        if self.options.dry_run {
            for branch in branches {
                emit(
                    on_progress,
                    SyncProgress::PushingBranch {
                        repo: repo.to_string(),
                        branch: branch.clone(),
                    },
                );
            }
            return Ok(());
        }

        self.clone_source(repo, false, on_progress).await?;
        let target_url = self
            .target
            .repo_clone_url(&self.options.target_org, repo)
            .await?;

        for branch in branches {
            emit(
                on_progress,
                SyncProgress::PushingBranch {
                    repo: repo.to_string(),
                    branch: branch.clone(),
                },
            );
            self.git.push_branch(&target_url, branch).await?;
        }
        Ok(())
    }

    /// Push tags from a fresh (or reused) worktree clone.
    async fn push_tags(
        &self,
        repo: &str,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), SyncError> {
        if self.options.dry_run {
            emit(
                on_progress,
                SyncProgress::PushingTags {
                    repo: repo.to_string(),
                },
            );
            return Ok(());
        }

        self.clone_source(repo, false, on_progress).await?;
        let target_url = self
            .target
            .repo_clone_url(&self.options.target_org, repo)
            .await?;
        emit(
            on_progress,
            SyncProgress::PushingTags {
                repo: repo.to_string(),
            },
        );
        self.git.push_tags(&target_url).await?;
        Ok(())
    }

    async fn clone_source(
        &self,
        repo: &str,
        mirror: bool,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<(), SyncError> {
        let source_url = self
            .source
            .repo_clone_url(&self.options.source_org, repo)
            .await?;
        match self.git.clone_or_reuse(&source_url, mirror).await? {
            CloneOutcome::Cloned => emit(
                on_progress,
                SyncProgress::Cloned {
                    url: source_url,
                    mirror,
                },
            ),
            CloneOutcome::Reused => emit(
                on_progress,
                SyncProgress::ReusedClone { url: source_url },
            ),
        }
        Ok(())
    }
}
