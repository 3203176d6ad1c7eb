//! ChecklistEditor — reconciliation between the locally-editable checklist
//! and the remote check collection.
//!
//! `save()` never fails as a whole: per-item mutation errors are collected
//! in `SaveOutcome.failures`, and the post-save refetch runs regardless of
//! how the mutation batches went.

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use tokio::sync::Mutex as TokioMutex;

use crate::api::checks::{fetch_all_checks, CheckGateway};
use crate::error::GatewayError;
use crate::types::{CheckStatus, CheckType, CreateTenancyCheck, TenancyCheckModel, UpdateTenancyCheck};

use super::diff::{partition, ChangeSet};
use super::row::{CheckRow, RowIdentity, RowKey};

// ============================================================================
// Outcome types
// ============================================================================

/// Which mutation bucket a failed item belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Delete,
    Update,
}

/// One failed item within a save cycle. Siblings in the same batch are
/// unaffected; stale-token rejections arrive here shaped like any other
/// failure and are distinguished by `is_conflict`.
#[derive(Debug)]
pub struct ItemFailure {
    pub op: MutationOp,
    pub check_id: Option<String>,
    pub description: String,
    pub error: GatewayError,
}

impl ItemFailure {
    fn new(op: MutationOp, row: &CheckRow, error: GatewayError) -> Self {
        Self {
            op,
            check_id: row.check_id.clone(),
            description: row.description.clone(),
            error,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.error.is_conflict()
    }
}

/// Aggregated result of one save cycle. Per-item failures are warnings,
/// not a save-level error: the checklist has been resynced either way.
#[derive(Debug, Default)]
pub struct SaveOutcome {
    pub created: usize,
    pub deleted: usize,
    pub updated: usize,
    pub failures: Vec<ItemFailure>,
    /// Set when the post-save refetch itself failed; the live snapshot was
    /// re-seeded from the previous baseline instead of fresh server state.
    pub refetch_error: Option<GatewayError>,
}

impl SaveOutcome {
    /// True when local state now mirrors freshly fetched server state.
    pub fn refreshed(&self) -> bool {
        self.refetch_error.is_none()
    }

    /// True when every item committed and the resync succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.refreshed()
    }
}

// ============================================================================
// ChecklistEditor
// ============================================================================

struct EditorState {
    /// Mirrors server state as of the last successful fetch; all persisted.
    last_synced: Vec<CheckRow>,
    /// What the UI edits; seeded from `last_synced`, diverges until save.
    live: Vec<CheckRow>,
    /// Persisted rows removed from `live`, awaiting the next save.
    staged_deletions: Vec<CheckRow>,
    next_key: u64,
}

impl EditorState {
    fn new() -> Self {
        Self {
            last_synced: Vec::new(),
            live: Vec::new(),
            staged_deletions: Vec::new(),
            next_key: 0,
        }
    }

    fn mint_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Replace both snapshots with fresh server state and drop staged
    /// deletions. Rows get fresh keys; stale keys held by a caller simply
    /// stop resolving.
    fn seed(&mut self, models: &[TenancyCheckModel]) {
        let rows: Vec<CheckRow> = models
            .iter()
            .map(|m| {
                let key = self.mint_key();
                CheckRow::from_model(key, m)
            })
            .collect();
        self.last_synced = rows.clone();
        self.live = rows;
        self.staged_deletions.clear();
    }
}

pub struct ChecklistEditor {
    gateway: Arc<dyn CheckGateway>,
    tenancy_id: String,
    state: Mutex<EditorState>,
    /// Serializes `save()` — a re-entrant call waits, then diffs against the
    /// refreshed baseline and degenerates to a refetch.
    save_lock: TokioMutex<()>,
}

impl ChecklistEditor {
    pub fn new(gateway: Arc<dyn CheckGateway>, tenancy_id: impl Into<String>) -> Self {
        Self {
            gateway,
            tenancy_id: tenancy_id.into(),
            state: Mutex::new(EditorState::new()),
            save_lock: TokioMutex::new(()),
        }
    }

    pub fn tenancy_id(&self) -> &str {
        &self.tenancy_id
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Fetch the full check collection (every page), keep the pre-tenancy
    /// kind, and seed both snapshots. On error the existing state is left
    /// untouched; there is no automatic retry.
    pub async fn load(&self) -> Result<(), GatewayError> {
        let models = self.fetch_pre_tenancy_checks().await?;
        self.state.lock().seed(&models);
        Ok(())
    }

    async fn fetch_pre_tenancy_checks(&self) -> Result<Vec<TenancyCheckModel>, GatewayError> {
        let mut models = fetch_all_checks(self.gateway.as_ref(), &self.tenancy_id).await?;
        models.retain(|m| m.check_type == CheckType::PreTenancy);
        Ok(models)
    }

    // -----------------------------------------------------------------------
    // Local edits
    // -----------------------------------------------------------------------

    /// Append a blank pending-create row and return its key. No network.
    pub fn add_row(&self) -> RowKey {
        let mut state = self.state.lock();
        let key = state.mint_key();
        state.live.push(CheckRow::new_pending(key));
        key
    }

    /// Remove a row. Pending-create rows vanish; persisted rows move to the
    /// staged-deletion set until the next save. Unknown keys are a no-op.
    pub fn remove_row(&self, key: RowKey) {
        let mut state = self.state.lock();
        let Some(pos) = state.live.iter().position(|r| r.key == key) else {
            return;
        };
        let row = state.live.remove(pos);
        if row.identity == RowIdentity::Persisted {
            state.staged_deletions.push(row);
        }
    }

    pub fn set_description(&self, key: RowKey, description: impl Into<String>) {
        let mut state = self.state.lock();
        if let Some(row) = state.live.iter_mut().find(|r| r.key == key) {
            row.description = description.into();
        }
    }

    pub fn set_status(&self, key: RowKey, status: CheckStatus) {
        let mut state = self.state.lock();
        if let Some(row) = state.live.iter_mut().find(|r| r.key == key) {
            row.status = status;
        }
    }

    /// Ordered copy of the live snapshot for rendering.
    pub fn rows(&self) -> Vec<CheckRow> {
        self.state.lock().live.clone()
    }

    pub fn staged_deletion_count(&self) -> usize {
        self.state.lock().staged_deletions.len()
    }

    /// True when a save would submit at least one mutation.
    pub fn is_dirty(&self) -> bool {
        let state = self.state.lock();
        !partition(&state.live, &state.last_synced, &state.staged_deletions).is_empty()
    }

    // -----------------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------------

    /// Commit local edits: diff against the last-synced baseline, fire the
    /// create, delete, and update batches (each settle-all), then refetch
    /// the collection and reset both snapshots regardless of outcome.
    pub async fn save(&self) -> SaveOutcome {
        let _guard = self.save_lock.lock().await;

        let (baseline, current, staged) = {
            let state = self.state.lock();
            (
                state.last_synced.clone(),
                state.live.clone(),
                state.staged_deletions.clone(),
            )
        };
        let changes = partition(&current, &baseline, &staged);

        let mut outcome = SaveOutcome::default();
        self.run_batches(&changes, &mut outcome).await;

        if !outcome.failures.is_empty() {
            tracing::warn!(
                tenancy_id = %self.tenancy_id,
                failed = outcome.failures.len(),
                submitted = changes.len(),
                "some checklist mutations failed; resyncing"
            );
        }

        // Unconditional resync — runs on success, partial failure, and total
        // failure alike. Staged deletions clear either way.
        match self.fetch_pre_tenancy_checks().await {
            Ok(models) => {
                self.state.lock().seed(&models);
            }
            Err(error) => {
                tracing::warn!(
                    tenancy_id = %self.tenancy_id,
                    error = %error,
                    "post-save refetch failed; reverting to last-synced baseline"
                );
                let mut state = self.state.lock();
                state.live = state.last_synced.clone();
                state.staged_deletions.clear();
                outcome.refetch_error = Some(error);
            }
        }

        outcome
    }

    /// Create, delete, and update batches in that order. Within a batch the
    /// per-item requests run concurrently and all settle before the batch
    /// resolves; one item's failure neither cancels nor blocks its siblings.
    async fn run_batches(&self, changes: &ChangeSet, outcome: &mut SaveOutcome) {
        let create_results = join_all(changes.to_create.iter().map(|row| {
            let body = CreateTenancyCheck {
                description: row.description.clone(),
                check_type: CheckType::PreTenancy,
                status: row.status,
            };
            async move {
                self.gateway
                    .create_check(&self.tenancy_id, &body)
                    .await
                    .map(|_| ())
                    .map_err(|e| ItemFailure::new(MutationOp::Create, row, e))
            }
        }))
        .await;
        Self::collect(create_results, &mut outcome.created, &mut outcome.failures);

        let delete_results = join_all(
            changes
                .to_delete
                .iter()
                .filter_map(|row| row.check_id.as_deref().map(|id| (id, row)))
                .map(|(id, row)| async move {
                    self.gateway
                        .delete_check(&self.tenancy_id, id)
                        .await
                        .map_err(|e| ItemFailure::new(MutationOp::Delete, row, e))
                }),
        )
        .await;
        Self::collect(delete_results, &mut outcome.deleted, &mut outcome.failures);

        let update_results = join_all(
            changes
                .to_update
                .iter()
                .filter_map(|row| match (row.check_id.as_deref(), row.etag.as_deref()) {
                    (Some(id), Some(etag)) => Some((id, etag, row)),
                    _ => None,
                })
                .map(|(id, etag, row)| {
                    let body = UpdateTenancyCheck {
                        description: row.description.clone(),
                        status: row.status,
                    };
                    async move {
                        self.gateway
                            .update_check(&self.tenancy_id, id, etag, &body)
                            .await
                            .map_err(|e| ItemFailure::new(MutationOp::Update, row, e))
                    }
                }),
        )
        .await;
        Self::collect(update_results, &mut outcome.updated, &mut outcome.failures);
    }

    fn collect(
        results: Vec<Result<(), ItemFailure>>,
        committed: &mut usize,
        failures: &mut Vec<ItemFailure>,
    ) {
        for result in results {
            match result {
                Ok(()) => *committed += 1,
                Err(failure) => failures.push(failure),
            }
        }
    }
}
