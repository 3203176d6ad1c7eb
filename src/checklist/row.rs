//! Row identity model for the editable checklist.

use crate::types::{CheckStatus, TenancyCheckModel};

/// Stable per-editor row key for UI binding. Minted once per row and never
/// reused within an editor; unrelated to position in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

/// How a row should be treated during the next save.
///
/// There is no `PendingDelete` variant: a persisted row staged for deletion
/// leaves the live snapshot and sits in the editor's staged-deletion set
/// until the save commits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIdentity {
    /// Mirrors a server record; carries its id and concurrency token.
    Persisted,
    /// Added locally, not yet created on the server.
    PendingCreate,
}

/// One pre-tenancy check row.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRow {
    pub key: RowKey,
    pub check_id: Option<String>,
    pub identity: RowIdentity,
    pub description: String,
    pub status: CheckStatus,
    /// Concurrency token captured at load/refetch; forwarded unchanged on
    /// update, never fabricated. Always present on persisted rows.
    pub etag: Option<String>,
}

impl CheckRow {
    pub(crate) fn from_model(key: RowKey, model: &TenancyCheckModel) -> Self {
        Self {
            key,
            check_id: Some(model.id.clone()),
            identity: RowIdentity::Persisted,
            description: model.description.clone().unwrap_or_default(),
            status: model.status,
            etag: Some(model.etag.clone()),
        }
    }

    pub(crate) fn new_pending(key: RowKey) -> Self {
        Self {
            key,
            check_id: None,
            identity: RowIdentity::PendingCreate,
            description: String::new(),
            status: CheckStatus::default(),
            etag: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.identity == RowIdentity::Persisted
    }
}
