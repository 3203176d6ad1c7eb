//! Partition tests — which rows land in which mutation set.

use std::collections::HashSet;

use tenancy_sync::checklist::diff::partition;
use tenancy_sync::checklist::{CheckRow, RowIdentity, RowKey};
use tenancy_sync::types::CheckStatus;

fn persisted(key: u64, id: &str, status: CheckStatus, description: &str) -> CheckRow {
    CheckRow {
        key: RowKey(key),
        check_id: Some(id.to_string()),
        identity: RowIdentity::Persisted,
        description: description.to_string(),
        status,
        etag: Some(format!("\"etag-{id}\"")),
    }
}

fn pending(key: u64, status: CheckStatus, description: &str) -> CheckRow {
    CheckRow {
        key: RowKey(key),
        check_id: None,
        identity: RowIdentity::PendingCreate,
        description: description.to_string(),
        status,
        etag: None,
    }
}

#[test]
fn changed_status_lands_in_to_update() {
    let baseline = vec![persisted(0, "a", CheckStatus::Needed, "Gas safety")];
    let live = vec![persisted(0, "a", CheckStatus::Completed, "Gas safety")];

    let changes = partition(&live, &baseline, &[]);

    assert_eq!(changes.to_update.len(), 1);
    assert_eq!(changes.to_update[0].check_id.as_deref(), Some("a"));
    assert!(changes.to_create.is_empty());
    assert!(changes.to_delete.is_empty());
}

#[test]
fn changed_description_lands_in_to_update() {
    let baseline = vec![persisted(0, "a", CheckStatus::Needed, "Gas safety")];
    let live = vec![persisted(0, "a", CheckStatus::Needed, "Gas safety certificate")];

    let changes = partition(&live, &baseline, &[]);

    assert_eq!(changes.to_update.len(), 1);
}

#[test]
fn unchanged_row_is_excluded() {
    let baseline = vec![
        persisted(0, "a", CheckStatus::Needed, "Gas safety"),
        persisted(1, "b", CheckStatus::Completed, "References"),
    ];
    let live = baseline.clone();

    let changes = partition(&live, &baseline, &[]);

    assert!(changes.is_empty());
}

#[test]
fn row_missing_from_baseline_is_excluded_from_updates() {
    // Stale-baseline race: the live row names an id the baseline has never
    // seen. It must be skipped, not matched by position.
    let baseline = vec![persisted(0, "a", CheckStatus::Needed, "Gas safety")];
    let live = vec![
        persisted(0, "a", CheckStatus::Needed, "Gas safety"),
        persisted(1, "ghost", CheckStatus::Completed, "Unknown"),
    ];

    let changes = partition(&live, &baseline, &[]);

    assert!(changes.to_update.is_empty());
}

#[test]
fn pending_rows_land_in_to_create_only() {
    let baseline = vec![persisted(0, "a", CheckStatus::Needed, "Gas safety")];
    let live = vec![
        persisted(0, "a", CheckStatus::Needed, "Gas safety"),
        pending(1, CheckStatus::Arranged, "Inventory"),
    ];

    let changes = partition(&live, &baseline, &[]);

    assert_eq!(changes.to_create.len(), 1);
    assert_eq!(changes.to_create[0].description, "Inventory");
    assert!(changes.to_create[0].check_id.is_none());
    assert!(changes.to_update.is_empty());
}

#[test]
fn staged_rows_without_an_id_are_dropped_from_to_delete() {
    let staged = vec![pending(5, CheckStatus::Needed, "never persisted")];

    let changes = partition(&[], &[], &staged);

    assert!(changes.to_delete.is_empty());
}

#[test]
fn staged_persisted_rows_land_in_to_delete() {
    let staged = vec![persisted(3, "b", CheckStatus::Completed, "References")];

    let changes = partition(&[], &[], &staged);

    assert_eq!(changes.to_delete.len(), 1);
    assert_eq!(changes.to_delete[0].check_id.as_deref(), Some("b"));
}

#[test]
fn mutation_sets_never_share_a_check_id() {
    let baseline = vec![
        persisted(0, "a", CheckStatus::Needed, "Gas safety"),
        persisted(1, "b", CheckStatus::Completed, "References"),
        persisted(2, "c", CheckStatus::Needed, "Inventory"),
    ];
    // b staged for deletion, a edited, one new row added.
    let live = vec![
        persisted(0, "a", CheckStatus::Completed, "Gas safety"),
        persisted(2, "c", CheckStatus::Needed, "Inventory"),
        pending(3, CheckStatus::Needed, "Deposit registration"),
    ];
    let staged = vec![persisted(1, "b", CheckStatus::Completed, "References")];

    let changes = partition(&live, &baseline, &staged);

    assert_eq!(changes.to_create.len(), 1);
    assert_eq!(changes.to_update.len(), 1);
    assert_eq!(changes.to_delete.len(), 1);
    assert_eq!(changes.len(), 3);

    let mut seen = HashSet::new();
    for row in changes
        .to_update
        .iter()
        .chain(changes.to_delete.iter())
        .chain(changes.to_create.iter())
    {
        if let Some(id) = row.check_id.as_deref() {
            assert!(seen.insert(id.to_string()), "check id {id} in two sets");
        }
    }
}
