//! Document association resolver tests — full pagination and presence
//! lookups against a mock gateway.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use tenancy_sync::api::documents::DocumentGateway;
use tenancy_sync::documents::{fetch_all_documents_for, has_document, DocumentPresence};
use tenancy_sync::error::GatewayError;
use tenancy_sync::types::{DocumentModel, DocumentQuery, LinkModel, PagedResult};

// ============================================================================
// Mock Gateway
// ============================================================================

#[derive(Clone)]
struct ListCall {
    associated_type: String,
    associated_ids: Vec<String>,
    page_number: u32,
}

type ListFn =
    dyn Fn(&DocumentQuery, u32) -> Result<PagedResult<DocumentModel>, GatewayError> + Send + Sync;

struct MockDocumentGatewayInner {
    pages: Vec<Vec<DocumentModel>>,
    list_calls: Vec<ListCall>,
    list_response: Option<Box<ListFn>>,
}

struct MockDocumentGateway {
    inner: Mutex<MockDocumentGatewayInner>,
}

impl MockDocumentGateway {
    fn new() -> Self {
        Self {
            inner: Mutex::new(MockDocumentGatewayInner {
                pages: Vec::new(),
                list_calls: Vec::new(),
                list_response: None,
            }),
        }
    }

    fn set_pages(&self, pages: Vec<Vec<DocumentModel>>) {
        self.inner.lock().pages = pages;
    }

    fn on_list(
        &self,
        f: impl Fn(&DocumentQuery, u32) -> Result<PagedResult<DocumentModel>, GatewayError>
            + Send
            + Sync
            + 'static,
    ) {
        self.inner.lock().list_response = Some(Box::new(f));
    }

    fn list_calls(&self) -> Vec<ListCall> {
        self.inner.lock().list_calls.clone()
    }
}

#[async_trait]
impl DocumentGateway for MockDocumentGateway {
    async fn list_documents(
        &self,
        query: &DocumentQuery,
        page_number: u32,
    ) -> Result<PagedResult<DocumentModel>, GatewayError> {
        let mut inner = self.inner.lock();
        inner.list_calls.push(ListCall {
            associated_type: query.associated_type.clone(),
            associated_ids: query.associated_ids.clone(),
            page_number,
        });
        if let Some(ref f) = inner.list_response {
            return f(query, page_number);
        }
        let total_pages = inner.pages.len().max(1) as u32;
        let records = inner
            .pages
            .get((page_number - 1) as usize)
            .cloned()
            .unwrap_or_default();
        Ok(page_of(records, page_number, page_number < total_pages))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn make_document(id: &str, check_id: &str) -> DocumentModel {
    DocumentModel {
        id: id.to_string(),
        created: None,
        modified: Some("2022-03-01T09:00:00Z".to_string()),
        associated_type: Some("tenancyCheck".to_string()),
        associated_id: Some(check_id.to_string()),
        type_id: Some("DOC".to_string()),
        name: Some(format!("{id}.pdf")),
        etag: Some(format!("\"etag-{id}\"")),
    }
}

fn page_of(records: Vec<DocumentModel>, page_number: u32, has_next: bool) -> PagedResult<DocumentModel> {
    let mut links = HashMap::new();
    if has_next {
        links.insert(
            "next".to_string(),
            LinkModel {
                href: format!("/documents?pageNumber={}", page_number + 1),
            },
        );
    }
    PagedResult {
        embedded: records,
        page_number,
        page_size: 25,
        page_count: 0,
        total_page_count: 0,
        total_count: 0,
        links,
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn concatenates_all_three_pages() {
    let gateway = MockDocumentGateway::new();
    gateway.set_pages(vec![
        vec![make_document("d1", "chk-1"), make_document("d2", "chk-1")],
        vec![make_document("d3", "chk-2")],
        vec![make_document("d4", "chk-3")],
    ]);

    let documents = fetch_all_documents_for(&gateway, &ids(&["chk-1", "chk-2", "chk-3"]))
        .await
        .unwrap();

    assert_eq!(documents.len(), 4);
    let pages: Vec<u32> = gateway.list_calls().iter().map(|c| c.page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn single_page_stops_after_one_request() {
    let gateway = MockDocumentGateway::new();
    gateway.set_pages(vec![vec![make_document("d1", "chk-1")]]);

    let documents = fetch_all_documents_for(&gateway, &ids(&["chk-1"])).await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(gateway.list_calls().len(), 1);
}

#[tokio::test]
async fn query_carries_the_association_filter() {
    let gateway = MockDocumentGateway::new();

    fetch_all_documents_for(&gateway, &ids(&["chk-1", "chk-2"]))
        .await
        .unwrap();

    let calls = gateway.list_calls();
    assert_eq!(calls[0].associated_type, "tenancyCheck");
    assert_eq!(calls[0].associated_ids, ids(&["chk-1", "chk-2"]));
}

#[tokio::test]
async fn transport_errors_propagate() {
    let gateway = MockDocumentGateway::new();
    gateway.on_list(|_, _| {
        Err(GatewayError::Status {
            status: 503,
            url: "/documents".to_string(),
            body: "unavailable".to_string(),
        })
    });

    let result = fetch_all_documents_for(&gateway, &ids(&["chk-1"])).await;

    assert!(result.is_err());
}

// ============================================================================
// Presence
// ============================================================================

#[test]
fn has_document_matches_on_associated_id() {
    let documents = vec![make_document("d1", "chk-1"), make_document("d2", "chk-2")];

    assert!(has_document("chk-1", &documents));
    assert!(has_document("chk-2", &documents));
    assert!(!has_document("chk-3", &documents));
}

#[test]
fn presence_index_deduplicates_checks() {
    let documents = vec![
        make_document("d1", "chk-1"),
        make_document("d2", "chk-1"),
        make_document("d3", "chk-2"),
    ];

    let presence = DocumentPresence::from_documents(&documents);

    assert!(presence.has_document("chk-1"));
    assert!(presence.has_document("chk-2"));
    assert!(!presence.has_document("chk-9"));
    assert_eq!(presence.checks_with_documents(), 2);
}

#[tokio::test]
async fn presence_fetch_spans_every_page() {
    let gateway = MockDocumentGateway::new();
    gateway.set_pages(vec![
        vec![make_document("d1", "chk-1")],
        vec![make_document("d2", "chk-2")],
    ]);

    let presence = DocumentPresence::fetch(&gateway, &ids(&["chk-1", "chk-2"]))
        .await
        .unwrap();

    assert!(presence.has_document("chk-1"));
    assert!(presence.has_document("chk-2"));
}
