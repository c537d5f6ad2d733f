//! Label Synchronization
//!
//! Reconciliation orchestrator: fetches the reference label set once, then
//! fetches, diffs, and optionally reconciles every target repository

use futures::{stream, StreamExt};
use serde::Serialize;

use crate::config::SyncConfig;
use crate::diff::{diff, Operation, Plan};
use crate::error::{Error, Result};
use crate::github::{LabelStore, RepoId};
use crate::label::LabelSet;
use crate::resolve::resolve_targets;

/// Result of executing one operation against the gateway
#[derive(Debug, Clone, Serialize)]
pub struct OpResult {
    /// The operation that was attempted
    pub operation: Operation,

    /// Failure message, if the gateway call failed
    pub error: Option<String>,
}

impl OpResult {
    /// Whether the operation succeeded
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of reconciling one target repository
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The target's labels could not be fetched; nothing was attempted
    Skipped { error: String },

    /// Dry run: the computed plan, nothing was mutated
    Planned { plan: Plan },

    /// Apply run: every operation was attempted, in plan order
    Applied { results: Vec<OpResult> },
}

/// Per-repository reconciliation result
#[derive(Debug, Clone, Serialize)]
pub struct RepoSync {
    /// The target repository
    pub repo: RepoId,

    /// What happened to it
    pub outcome: SyncOutcome,
}

impl RepoSync {
    /// Whether anything went wrong for this repository
    pub fn has_failures(&self) -> bool {
        match &self.outcome {
            SyncOutcome::Skipped { .. } => true,
            SyncOutcome::Planned { .. } => false,
            SyncOutcome::Applied { results } => results.iter().any(|r| !r.succeeded()),
        }
    }
}

/// Aggregate counters over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Targets processed
    pub repos: usize,

    /// Targets already matching the reference
    pub in_sync: usize,

    /// Targets skipped because their labels could not be fetched
    pub skipped: usize,

    /// Labels created (or planned for creation in a dry run)
    pub created: usize,

    /// Labels updated
    pub updated: usize,

    /// Labels deleted
    pub deleted: usize,

    /// Operations that failed during an apply run
    pub failed_operations: usize,
}

impl SyncSummary {
    /// Tally a run's results
    pub fn of(results: &[RepoSync]) -> Self {
        let mut summary = Self {
            repos: results.len(),
            ..Self::default()
        };

        for result in results {
            match &result.outcome {
                SyncOutcome::Skipped { .. } => summary.skipped += 1,
                SyncOutcome::Planned { plan } => {
                    if plan.is_empty() {
                        summary.in_sync += 1;
                    }
                    summary.created += plan.created();
                    summary.updated += plan.updated();
                    summary.deleted += plan.deleted();
                }
                SyncOutcome::Applied { results } => {
                    if results.is_empty() {
                        summary.in_sync += 1;
                    }
                    for op_result in results {
                        if !op_result.succeeded() {
                            summary.failed_operations += 1;
                            continue;
                        }
                        match &op_result.operation {
                            Operation::Create { .. } => summary.created += 1,
                            Operation::Update { .. } => summary.updated += 1,
                            Operation::Delete { .. } => summary.deleted += 1,
                        }
                    }
                }
            }
        }

        summary
    }

    /// Whether any target was skipped or any operation failed
    pub fn has_failures(&self) -> bool {
        self.skipped > 0 || self.failed_operations > 0
    }
}

/// Label Synchronization Engine
///
/// Replicates the reference repository's labels onto every resolved target.
pub struct LabelSyncer<S> {
    store: S,
    config: SyncConfig,
}

impl<S: LabelStore> LabelSyncer<S> {
    /// Create a new label synchronization engine
    ///
    /// # Arguments
    /// - `store`: Gateway to the remote label store
    /// - `config`: Run configuration
    ///
    /// # Errors
    /// Returns an error if configuration validation fails
    pub fn new(store: S, config: SyncConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Reconcile all targets against the reference repository
    ///
    /// The reference label set is fetched exactly once; failure there is
    /// fatal. Each target is then processed independently through a bounded
    /// worker pool — a failed fetch or a failed operation is recorded in
    /// that target's result and never stops the others. Results come back
    /// sorted by repository regardless of completion order.
    ///
    /// # Errors
    /// Returns an error if the reference fetch or target resolution fails
    pub async fn run(&self) -> Result<Vec<RepoSync>> {
        let (ref_owner, ref_repo) = self.config.parse_reference()?;
        let reference_id = RepoId::new(ref_owner, ref_repo);

        let reference = self
            .fetch_label_set(&reference_id)
            .await
            .map_err(|e| Error::reference_fetch(self.config.reference.clone(), e))?;

        let targets = resolve_targets(&self.store, &self.config.selector).await?;

        let mut results: Vec<RepoSync> = stream::iter(targets)
            .map(|repo| self.reconcile(&reference, repo))
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        results.sort_by(|a, b| a.repo.cmp(&b.repo));
        Ok(results)
    }

    /// Fetch a repository's labels as a validated snapshot
    async fn fetch_label_set(&self, repo: &RepoId) -> Result<LabelSet> {
        let labels = self.store.list_labels(repo).await?;
        LabelSet::from_labels(labels, &repo.to_string())
    }

    /// Reconcile a single target repository
    async fn reconcile(&self, reference: &LabelSet, repo: RepoId) -> RepoSync {
        let target = match self.fetch_label_set(&repo).await {
            Ok(set) => set,
            Err(e) => {
                return RepoSync {
                    repo,
                    outcome: SyncOutcome::Skipped {
                        error: e.to_string(),
                    },
                }
            }
        };

        let plan = diff(reference, &target);

        if !self.config.apply {
            return RepoSync {
                repo,
                outcome: SyncOutcome::Planned { plan },
            };
        }

        let mut results = Vec::with_capacity(plan.len());
        for operation in plan {
            // One failed operation does not abort the rest of the plan
            let error = self
                .execute(&repo, &operation)
                .await
                .err()
                .map(|e| e.to_string());
            results.push(OpResult { operation, error });
        }

        RepoSync {
            repo,
            outcome: SyncOutcome::Applied { results },
        }
    }

    /// Execute one operation against the gateway
    async fn execute(&self, repo: &RepoId, operation: &Operation) -> Result<()> {
        match operation {
            Operation::Create { label } => self.store.create_label(repo, label).await,
            Operation::Update { name, new, .. } => {
                self.store.update_label(repo, name, new).await
            }
            Operation::Delete { name } => self.store.delete_label(repo, name).await,
        }
    }
}
