//! Configuration lookups — fixed lists the platform exposes for
//! populating selection controls.

use crate::error::GatewayError;
use crate::types::ListItemModel;

use super::client::{urls, PlatformClient};

impl PlatformClient {
    pub async fn document_types(&self) -> Result<Vec<ListItemModel>, GatewayError> {
        self.get_json(urls::CONFIGURATION_DOCUMENT_TYPES, &[]).await
    }

    pub async fn appointment_types(&self) -> Result<Vec<ListItemModel>, GatewayError> {
        self.get_json(urls::CONFIGURATION_APPOINTMENT_TYPES, &[])
            .await
    }
}
