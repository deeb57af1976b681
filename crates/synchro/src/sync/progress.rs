//! Progress reporting types for sync operations.
//!
//! The engine emits these events through an optional callback; reporters
//! (the CLI's logging reporter, test recorders) decide how to render them.
//! The engine itself never prints.

use super::types::SyncSummary;

/// Progress events emitted during a synchronization run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Listing repositories on the source platform.
    ListingRepos {
        /// The source org being listed.
        org: String,
    },

    /// Repository listing finished and the name filter was applied.
    ReposListed {
        /// The source org that was listed.
        org: String,
        /// Repositories found before filtering.
        total: usize,
        /// Repositories that passed the filter.
        matched: usize,
    },

    /// Started processing one repository.
    RepoStarted {
        /// Repository name.
        repo: String,
    },

    /// The repository does not exist on the target; it will be created
    /// and synchronized as a mirror.
    RepoMissingOnTarget { repo: String },

    /// The repository has no branches on the source; nothing to push.
    SourceHasNoBranches { repo: String },

    /// The repository exists on the target but has no branches; it will
    /// be synchronized as a mirror.
    TargetHasNoBranches { repo: String },

    /// Compared one branch between source and target.
    BranchCompared {
        repo: String,
        branch: String,
        /// Source commit.
        source_commit: String,
        /// Target commit, when the branch exists there.
        target_commit: Option<String>,
        /// Whether the commits matched.
        in_sync: bool,
    },

    /// All branches were in sync but tags differ; pushing tags only.
    TagsOnly { repo: String },

    /// Branches and tags are all in sync; nothing to do.
    RepoInSync { repo: String },

    /// A fresh clone of the source repository was made.
    Cloned {
        /// Clone URL.
        url: String,
        /// Whether it was a mirror clone.
        mirror: bool,
    },

    /// The existing clone directory matched and was reused.
    ReusedClone {
        /// Clone URL.
        url: String,
    },

    /// Pushing all refs to the target.
    PushingMirror { repo: String },

    /// Pushing a single branch to the target.
    PushingBranch { repo: String, branch: String },

    /// Pushing tags to the target.
    PushingTags { repo: String },

    /// The run finished.
    Complete { summary: SyncSummary },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
