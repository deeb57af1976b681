//! Shared sync types.

/// Options for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Organization (or user namespace) on the source platform.
    pub source_org: String,
    /// Organization (or user namespace) on the target platform.
    pub target_org: String,
    /// Comma-separated regex patterns of repository names to include.
    pub repos_include: Option<String>,
    /// Comma-separated regex patterns of repository names to exclude.
    pub repos_exclude: Option<String>,
    /// Comma-separated regex patterns of branch names to include.
    pub branches_include: Option<String>,
    /// Comma-separated regex patterns of branch names to exclude.
    pub branches_exclude: Option<String>,
    /// Report what would be synchronized without creating, cloning, or
    /// pushing anything.
    pub dry_run: bool,
}

impl SyncOptions {
    /// Options with no filters and dry-run off.
    #[must_use]
    pub fn new(source_org: impl Into<String>, target_org: impl Into<String>) -> Self {
        Self {
            source_org: source_org.into(),
            target_org: target_org.into(),
            repos_include: None,
            repos_exclude: None,
            branches_include: None,
            branches_exclude: None,
            dry_run: false,
        }
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Repositories that passed the filter and were processed.
    pub repos_processed: usize,
    /// Repositories that needed any synchronization work.
    pub repos_updated: usize,
    /// Branches compared between the two platforms.
    pub branches_compared: usize,
    /// Branches that were out of sync and pushed.
    pub branches_updated: usize,
}
