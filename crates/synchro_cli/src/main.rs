//! Synchro CLI - synchronize repositories between Git hosting platforms.

mod config;
mod progress;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use synchro::git::CommandGit;
use synchro::platform::create_client;
use synchro::sync::{ProgressCallback, SyncEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = config::Args::parse();

    // RUST_LOG wins over --log-level.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!(
            "synchro={level},synchro_cli={level}",
            level = args.log_level
        )),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    tracing::info!("Starting Git platforms synchronization");
    args.log();

    let source = create_client(&args.source_spec()).await?;
    let target = create_client(&args.target_spec()).await?;
    let git = CommandGit::new(
        &args.clone_dir,
        &args.source_credentials(),
        &args.target_credentials(),
    )?;

    let engine = SyncEngine::new(source, target, Arc::new(git), args.sync_options())?;

    let reporter = progress::LoggingReporter::new();
    let callback: ProgressCallback = Box::new(move |event| reporter.handle(event));
    let summary = engine.run(Some(&callback)).await?;

    tracing::info!(
        repos_updated = summary.repos_updated,
        repos_processed = summary.repos_processed,
        branches_updated = summary.branches_updated,
        branches_compared = summary.branches_compared,
        "Git platforms synchronization finished successfully"
    );

    Ok(())
}
