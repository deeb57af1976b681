//! Synchronization engine and its supporting types.
//!
//! The engine is platform-agnostic: it drives two [`PlatformClient`]s and
//! a [`GitRunner`](crate::git::GitRunner), so any source platform can be
//! synchronized to any target platform.
//!
//! [`PlatformClient`]: crate::platform::PlatformClient

mod engine;
mod filter;
mod progress;
mod types;

pub use engine::{SyncEngine, SyncError};
pub use filter::NameFilter;
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use types::{SyncOptions, SyncSummary};
