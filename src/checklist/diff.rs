//! Partition of the live checklist against the last-synced baseline into
//! the three mutation sets a save submits.

use std::collections::HashMap;

use super::row::{CheckRow, RowIdentity};

/// The three disjoint mutation sets for one save cycle.
///
/// `to_create` rows carry no `check_id`; `to_delete` and `to_update` can
/// never share one because a row is either in the live snapshot or in the
/// staged-deletion set, not both.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub to_create: Vec<CheckRow>,
    pub to_update: Vec<CheckRow>,
    pub to_delete: Vec<CheckRow>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }
}

/// Compute the mutation sets from the live snapshot, the last-synced
/// baseline, and the staged deletions.
///
/// Updates match live rows to baseline rows by `check_id`; a live persisted
/// row with no baseline counterpart (a stale baseline race) is excluded
/// rather than matched by position.
pub fn partition(
    live: &[CheckRow],
    baseline: &[CheckRow],
    staged_deletions: &[CheckRow],
) -> ChangeSet {
    let baseline_by_id: HashMap<&str, &CheckRow> = baseline
        .iter()
        .filter_map(|row| row.check_id.as_deref().map(|id| (id, row)))
        .collect();

    let mut changes = ChangeSet::default();

    for row in live {
        match row.identity {
            RowIdentity::PendingCreate => changes.to_create.push(row.clone()),
            RowIdentity::Persisted => {
                let Some(id) = row.check_id.as_deref() else {
                    continue;
                };
                if let Some(before) = baseline_by_id.get(id) {
                    if row_changed(row, before) {
                        changes.to_update.push(row.clone());
                    }
                }
            }
        }
    }

    changes.to_delete = staged_deletions
        .iter()
        .filter(|row| row.check_id.is_some())
        .cloned()
        .collect();

    changes
}

fn row_changed(current: &CheckRow, before: &CheckRow) -> bool {
    current.status != before.status || current.description != before.description
}
