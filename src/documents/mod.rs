pub mod presence;

pub use presence::{fetch_all_documents_for, has_document, DocumentPresence};
