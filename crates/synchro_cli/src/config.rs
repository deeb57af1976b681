//! Command-line arguments and their mapping onto library types.

use std::path::PathBuf;

use clap::Parser;

use synchro::git::DEFAULT_CLONE_DIR;
use synchro::platform::{Credentials, PlatformKind, PlatformSpec};
use synchro::sync::SyncOptions;

/// Default exclude pattern: names containing a literal dot are skipped
/// unless explicitly included.
const DEFAULT_EXCLUDE: &str = r"\.";

#[derive(Debug, Parser)]
#[command(name = "synchro")]
#[command(version)]
#[command(about = "Synchronize repositories between two Git hosting platforms")]
#[command(
    long_about = "Synchro mirrors repositories, branches, and tags from a source (\"from\") \
platform to a target (\"to\") platform. Supported platforms: GitHub, Gitea/Forgejo/Codeberg, \
GitLab, and Bitbucket Server. Missing repositories are created and mirrored; existing ones are \
updated branch by branch, with a tags-only push when only tags differ."
)]
#[command(after_long_help = r#"EXAMPLES
    Mirror an organization from GitHub to a Gitea instance:
        $ synchro --from-url https://github.com --from-org spring-projects \
                  --to-url https://gitea.example.com --to-login me --to-password "$TOKEN" \
                  --to-org MyOrg

    Limit the run to one repository and two branches:
        $ synchro ... --repos-include spring-petclinic --branches-include main,springboot3

    See what would happen without pushing anything:
        $ synchro ... --dry-run

ENVIRONMENT VARIABLES
    SYNCHRO_FROM_LOGIN        Source platform login or token
    SYNCHRO_FROM_PASSWORD     Source platform password
    SYNCHRO_TO_LOGIN          Target platform login or token
    SYNCHRO_TO_PASSWORD       Target platform password
    RUST_LOG                  Overrides --log-level with a tracing filter
"#)]
pub struct Args {
    /// Source platform URL
    #[arg(long)]
    pub from_url: String,

    /// Source platform type (github, gitea, gitlab, bitbucket); detected
    /// from the URL when omitted
    #[arg(long)]
    pub from_type: Option<PlatformKind>,

    /// Source platform login or token
    #[arg(long, env = "SYNCHRO_FROM_LOGIN")]
    pub from_login: Option<String>,

    /// Source platform password
    #[arg(long, env = "SYNCHRO_FROM_PASSWORD", hide_env_values = true)]
    pub from_password: Option<String>,

    /// Source organization (or project, or user namespace)
    #[arg(long)]
    pub from_org: String,

    /// Source proxy URL, with credentials if needed
    #[arg(long)]
    pub from_proxy: Option<String>,

    /// Target platform URL
    #[arg(long)]
    pub to_url: String,

    /// Target platform type (github, gitea, gitlab, bitbucket); detected
    /// from the URL when omitted
    #[arg(long)]
    pub to_type: Option<PlatformKind>,

    /// Target platform login or token
    #[arg(long, env = "SYNCHRO_TO_LOGIN")]
    pub to_login: String,

    /// Target platform password
    #[arg(long, env = "SYNCHRO_TO_PASSWORD", hide_env_values = true)]
    pub to_password: String,

    /// Target organization (or project, or user namespace)
    #[arg(long)]
    pub to_org: String,

    /// Target proxy URL, with credentials if needed
    #[arg(long)]
    pub to_proxy: Option<String>,

    /// Repository name patterns to include (comma-separated regexes)
    #[arg(long)]
    pub repos_include: Option<String>,

    /// Repository name patterns to exclude (comma-separated regexes)
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    pub repos_exclude: String,

    /// Branch name patterns to include (comma-separated regexes)
    #[arg(long)]
    pub branches_include: Option<String>,

    /// Branch name patterns to exclude (comma-separated regexes)
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    pub branches_exclude: String,

    /// Analyse what would be synchronized without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Transient clone directory
    #[arg(long, default_value = DEFAULT_CLONE_DIR)]
    pub clone_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn source_credentials(&self) -> Credentials {
        Credentials {
            login: self.from_login.clone(),
            secret: self.from_password.clone(),
        }
    }

    pub fn target_credentials(&self) -> Credentials {
        Credentials {
            login: Some(self.to_login.clone()),
            secret: Some(self.to_password.clone()),
        }
    }

    pub fn source_spec(&self) -> PlatformSpec {
        PlatformSpec {
            url: self.from_url.clone(),
            kind: self.from_type,
            credentials: self.source_credentials(),
            proxy: self.from_proxy.clone(),
        }
    }

    pub fn target_spec(&self) -> PlatformSpec {
        PlatformSpec {
            url: self.to_url.clone(),
            kind: self.to_type,
            credentials: self.target_credentials(),
            proxy: self.to_proxy.clone(),
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            source_org: self.from_org.clone(),
            target_org: self.to_org.clone(),
            repos_include: self.repos_include.clone(),
            repos_exclude: Some(self.repos_exclude.clone()),
            branches_include: self.branches_include.clone(),
            branches_exclude: Some(self.branches_exclude.clone()),
            dry_run: self.dry_run,
        }
    }

    /// Log the effective arguments; secrets are reported as present/absent.
    pub fn log(&self) {
        tracing::info!(url = %self.from_url, org = %self.from_org, kind = ?self.from_type, "Source platform");
        tracing::info!(
            login = ?self.from_login,
            password_set = self.from_password.is_some(),
            proxy_set = self.from_proxy.is_some(),
            "Source auth"
        );
        tracing::info!(url = %self.to_url, org = %self.to_org, kind = ?self.to_type, "Target platform");
        tracing::info!(
            login = %self.to_login,
            password_set = !self.to_password.is_empty(),
            proxy_set = self.to_proxy.is_some(),
            "Target auth"
        );
        tracing::info!(
            repos_include = ?self.repos_include,
            repos_exclude = %self.repos_exclude,
            branches_include = ?self.branches_include,
            branches_exclude = %self.branches_exclude,
            "Filters"
        );
        tracing::info!(
            dry_run = self.dry_run,
            clone_dir = %self.clone_dir.display(),
            "Run options"
        );
    }
}
