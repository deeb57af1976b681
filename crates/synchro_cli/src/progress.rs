use synchro::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::ListingRepos { org } => {
                tracing::info!(org = %org, "Listing repositories on source platform");
            }

            SyncProgress::ReposListed {
                org,
                total,
                matched,
            } => {
                tracing::info!(org = %org, total, matched, "Repositories listed");
            }

            SyncProgress::RepoStarted { repo } => {
                tracing::info!(repo = %repo, "Repository");
            }

            SyncProgress::RepoMissingOnTarget { repo } => {
                tracing::info!(
                    repo = %repo,
                    "Repository does not exist on target platform, creating as mirror"
                );
            }

            SyncProgress::SourceHasNoBranches { repo } => {
                tracing::info!(
                    repo = %repo,
                    "Repository has no branches on source platform, skipping"
                );
            }

            SyncProgress::TargetHasNoBranches { repo } => {
                tracing::info!(
                    repo = %repo,
                    "Repository has no branches on target platform, synchronizing as mirror"
                );
            }

            SyncProgress::BranchCompared {
                repo,
                branch,
                source_commit,
                target_commit,
                in_sync,
            } => {
                if in_sync {
                    tracing::info!(
                        repo = %repo,
                        branch = %branch,
                        commit = %source_commit,
                        "Branch already synchronized"
                    );
                } else {
                    tracing::info!(
                        repo = %repo,
                        branch = %branch,
                        source_commit = %source_commit,
                        target_commit = ?target_commit,
                        "Branch out of sync"
                    );
                }
            }

            SyncProgress::TagsOnly { repo } => {
                tracing::info!(
                    repo = %repo,
                    "All branches already synchronized, pushing tags only"
                );
            }

            SyncProgress::RepoInSync { repo } => {
                tracing::info!(repo = %repo, "Already synchronized");
            }

            SyncProgress::Cloned { url, mirror } => {
                tracing::info!(url = %url, mirror, "Cloned repository");
            }

            SyncProgress::ReusedClone { url } => {
                tracing::info!(url = %url, "Reusing existing cloned repo");
            }

            SyncProgress::PushingMirror { repo } => {
                tracing::info!(repo = %repo, "Pushing all refs to target");
            }

            SyncProgress::PushingBranch { repo, branch } => {
                tracing::info!(repo = %repo, branch = %branch, "Synchronizing branch");
            }

            SyncProgress::PushingTags { repo } => {
                tracing::info!(repo = %repo, "Pushing tags to target");
            }

            SyncProgress::Complete { summary } => {
                tracing::debug!(?summary, "Run complete");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
