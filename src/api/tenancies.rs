//! Tenancy resource surface: paginated listing with filters, single
//! tenancy with embeds, create, and token-guarded update.

use crate::error::GatewayError;
use crate::types::{
    CreateTenancy, PagedResult, TenancyEmbed, TenancyModel, TenancyQuery, UpdateTenancy,
};

use super::client::{urls, PlatformClient};

impl PlatformClient {
    /// One page of tenancies matching the filters.
    pub async fn list_tenancies(
        &self,
        query: &TenancyQuery,
    ) -> Result<PagedResult<TenancyModel>, GatewayError> {
        self.get_json(urls::TENANCIES, &query.to_query_pairs()).await
    }

    /// Single tenancy, optionally with embedded related resources.
    pub async fn get_tenancy(
        &self,
        tenancy_id: &str,
        embed: &[TenancyEmbed],
    ) -> Result<TenancyModel, GatewayError> {
        let path = format!("{}/{tenancy_id}", urls::TENANCIES);
        let query: Vec<(&str, String)> = embed
            .iter()
            .map(|e| ("embed", e.as_str().to_string()))
            .collect();
        self.get_json(&path, &query).await
    }

    pub async fn create_tenancy(&self, body: &CreateTenancy) -> Result<TenancyModel, GatewayError> {
        self.post_json(urls::TENANCIES, body).await
    }

    /// Update a tenancy. `etag` is the concurrency token from the last read.
    pub async fn update_tenancy(
        &self,
        tenancy_id: &str,
        etag: &str,
        body: &UpdateTenancy,
    ) -> Result<(), GatewayError> {
        let path = format!("{}/{tenancy_id}", urls::TENANCIES);
        self.patch_json(&path, etag, body).await
    }
}
