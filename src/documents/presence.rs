//! Document association resolver — which checks have at least one
//! attached document.

use std::collections::HashSet;

use crate::api::documents::DocumentGateway;
use crate::error::GatewayError;
use crate::types::{DocumentModel, DocumentQuery};

/// Fetch every page of documents attached to the given checks, following
/// the `next` link until the server stops reporting one. Never assumes a
/// fixed page count.
pub async fn fetch_all_documents_for(
    gateway: &dyn DocumentGateway,
    check_ids: &[String],
) -> Result<Vec<DocumentModel>, GatewayError> {
    let query = DocumentQuery::tenancy_checks(check_ids.iter().cloned());
    let mut page_number = 1;
    let mut all = Vec::new();
    loop {
        let page = gateway.list_documents(&query, page_number).await?;
        let next = page.next_page_number();
        all.extend(page.embedded);
        match next {
            Some(n) => page_number = n,
            None => break,
        }
    }
    Ok(all)
}

/// True iff any document in the set is associated with the given check.
pub fn has_document(check_id: &str, documents: &[DocumentModel]) -> bool {
    documents
        .iter()
        .any(|d| d.associated_id.as_deref() == Some(check_id))
}

/// Indexed presence lookup over a fetched document set, for repeated
/// queries across a whole checklist.
#[derive(Debug, Clone, Default)]
pub struct DocumentPresence {
    by_check: HashSet<String>,
}

impl DocumentPresence {
    pub fn from_documents(documents: &[DocumentModel]) -> Self {
        let by_check = documents
            .iter()
            .filter_map(|d| d.associated_id.clone())
            .collect();
        Self { by_check }
    }

    /// Fetch all pages for the given checks and index the result.
    pub async fn fetch(
        gateway: &dyn DocumentGateway,
        check_ids: &[String],
    ) -> Result<Self, GatewayError> {
        let documents = fetch_all_documents_for(gateway, check_ids).await?;
        Ok(Self::from_documents(&documents))
    }

    pub fn has_document(&self, check_id: &str) -> bool {
        self.by_check.contains(check_id)
    }

    pub fn checks_with_documents(&self) -> usize {
        self.by_check.len()
    }
}
