pub mod diff;
pub mod editor;
pub mod row;

pub use diff::ChangeSet;
pub use editor::{ChecklistEditor, ItemFailure, MutationOp, SaveOutcome};
pub use row::{CheckRow, RowIdentity, RowKey};
