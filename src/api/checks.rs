//! Tenancy-check collection gateway.
//!
//! `CheckGateway` is the narrow seam the reconciliation engine talks
//! through — list one page, create, update (token required), delete.
//! `PlatformClient` is the production implementation; tests substitute
//! mocks.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{CreateTenancyCheck, PagedResult, TenancyCheckModel, UpdateTenancyCheck};

use super::client::{urls, PlatformClient};

#[async_trait]
pub trait CheckGateway: Send + Sync {
    /// One page of the tenancy's check collection.
    async fn list_checks(
        &self,
        tenancy_id: &str,
        page_number: u32,
    ) -> Result<PagedResult<TenancyCheckModel>, GatewayError>;

    async fn create_check(
        &self,
        tenancy_id: &str,
        body: &CreateTenancyCheck,
    ) -> Result<TenancyCheckModel, GatewayError>;

    /// Update one check. `etag` is the concurrency token captured when the
    /// record was last read; the server rejects a stale token with 412.
    async fn update_check(
        &self,
        tenancy_id: &str,
        check_id: &str,
        etag: &str,
        body: &UpdateTenancyCheck,
    ) -> Result<(), GatewayError>;

    async fn delete_check(&self, tenancy_id: &str, check_id: &str) -> Result<(), GatewayError>;
}

#[async_trait]
impl CheckGateway for PlatformClient {
    async fn list_checks(
        &self,
        tenancy_id: &str,
        page_number: u32,
    ) -> Result<PagedResult<TenancyCheckModel>, GatewayError> {
        let path = format!("{}/{tenancy_id}/checks", urls::TENANCIES);
        self.get_json(&path, &[("pageNumber", page_number.to_string())])
            .await
    }

    async fn create_check(
        &self,
        tenancy_id: &str,
        body: &CreateTenancyCheck,
    ) -> Result<TenancyCheckModel, GatewayError> {
        let path = format!("{}/{tenancy_id}/checks", urls::TENANCIES);
        self.post_json(&path, body).await
    }

    async fn update_check(
        &self,
        tenancy_id: &str,
        check_id: &str,
        etag: &str,
        body: &UpdateTenancyCheck,
    ) -> Result<(), GatewayError> {
        let path = format!("{}/{tenancy_id}/checks/{check_id}", urls::TENANCIES);
        self.patch_json(&path, etag, body).await
    }

    async fn delete_check(&self, tenancy_id: &str, check_id: &str) -> Result<(), GatewayError> {
        let path = format!("{}/{tenancy_id}/checks/{check_id}", urls::TENANCIES);
        self.delete(&path).await
    }
}

/// Fetch every page of a tenancy's check collection, following the `next`
/// link until the server stops reporting one.
pub async fn fetch_all_checks(
    gateway: &dyn CheckGateway,
    tenancy_id: &str,
) -> Result<Vec<TenancyCheckModel>, GatewayError> {
    let mut page_number = 1;
    let mut all = Vec::new();
    loop {
        let page = gateway.list_checks(tenancy_id, page_number).await?;
        let next = page.next_page_number();
        all.extend(page.embedded);
        match next {
            Some(n) => page_number = n,
            None => break,
        }
    }
    Ok(all)
}
