//! Documents collection gateway and CRUD surface.
//!
//! The association resolver only needs `list_documents`; the remaining
//! operations (create with a base64 payload, edit, delete, binary
//! download) are concrete methods on `PlatformClient`.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::GatewayError;
use crate::types::{CreateDocument, DocumentModel, DocumentQuery, PagedResult, UpdateDocument};

use super::client::{urls, PlatformClient};

#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// One page of documents matching the association filter.
    async fn list_documents(
        &self,
        query: &DocumentQuery,
        page_number: u32,
    ) -> Result<PagedResult<DocumentModel>, GatewayError>;
}

#[async_trait]
impl DocumentGateway for PlatformClient {
    async fn list_documents(
        &self,
        query: &DocumentQuery,
        page_number: u32,
    ) -> Result<PagedResult<DocumentModel>, GatewayError> {
        self.get_json(urls::DOCUMENTS, &query.to_query_pairs(page_number))
            .await
    }
}

impl PlatformClient {
    pub async fn create_document(
        &self,
        body: &CreateDocument,
    ) -> Result<DocumentModel, GatewayError> {
        self.post_json(urls::DOCUMENTS, body).await
    }

    pub async fn update_document(
        &self,
        document_id: &str,
        etag: &str,
        body: &UpdateDocument,
    ) -> Result<(), GatewayError> {
        let path = format!("{}/{document_id}", urls::DOCUMENTS);
        self.patch_json(&path, etag, body).await
    }

    pub async fn delete_document(&self, document_id: &str) -> Result<(), GatewayError> {
        let path = format!("{}/{document_id}", urls::DOCUMENTS);
        self.delete(&path).await
    }

    /// Binary fetch of a document's content.
    pub async fn download_document(&self, document_id: &str) -> Result<Vec<u8>, GatewayError> {
        let path = format!("{}/{document_id}/download", urls::DOCUMENTS);
        self.get_octet_stream(&path).await
    }
}

impl CreateDocument {
    /// Build an upload body for a tenancy-check attachment from raw file
    /// bytes, base64-encoded the way the platform expects `fileData`.
    pub fn tenancy_check_upload(
        check_id: impl Into<String>,
        type_id: impl Into<String>,
        name: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            associated_type: crate::types::ASSOCIATED_TYPE_TENANCY_CHECK.to_string(),
            associated_id: check_id.into(),
            type_id: type_id.into(),
            name: name.into(),
            is_private: None,
            file_data: Some(BASE64.encode(bytes)),
            file_url: None,
        }
    }
}
