//! # ghlabel
//!
//! Replicates a reference repository's GitHub issue labels across a user or
//! organization's repositories
//!
//! ## Features
//! - One canonical reference repository, any number of targets
//! - Minimal create/update/delete reconciliation plans
//! - Dry-run by default; apply only on request
//! - Per-repository failure isolation with a bounded worker pool

pub mod config;
pub mod diff;
pub mod error;
pub mod github;
pub mod label;
pub mod resolve;
pub mod sync;

pub use config::{RepoSelector, SyncConfig};
pub use diff::{diff, Operation, Plan};
pub use error::{Error, Result};
pub use github::{GitHubClient, LabelStore, RepoId};
pub use label::{Label, LabelSet};
pub use sync::{LabelSyncer, RepoSync, SyncOutcome, SyncSummary};

/// Reconcile labels from a reference repository onto the selected targets
///
/// Convenience wrapper around [`GitHubClient`] and [`LabelSyncer`] for
/// library callers.
///
/// # Examples
///
/// ```rust,no_run
/// use ghlabel::{RepoSelector, SyncConfig, LabelSyncer, GitHubClient};
///
/// #[tokio::main]
/// async fn main() -> ghlabel::Result<()> {
///     let config = SyncConfig {
///         access_token: "your_github_token".to_string(),
///         reference: "acme/label-templates".to_string(),
///         selector: RepoSelector::Org { owner: "acme".to_string() },
///         apply: false,
///         concurrency: 4,
///     };
///
///     let client = GitHubClient::new(&config.access_token).await?;
///     let syncer = LabelSyncer::new(client, config)?;
///     for result in syncer.run().await? {
///         println!("{}: {:?}", result.repo, result.outcome);
///     }
///     Ok(())
/// }
/// ```
pub async fn sync_labels(config: SyncConfig) -> Result<Vec<RepoSync>> {
    let client = GitHubClient::new(&config.access_token).await?;
    let syncer = LabelSyncer::new(client, config)?;
    syncer.run().await
}
