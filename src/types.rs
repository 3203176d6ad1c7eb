use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// HAL-style link as the platform returns it under `_links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkModel {
    pub href: String,
}

/// One page of a platform collection resource.
///
/// The platform signals further pages with a `next` entry in `_links`;
/// `page_count`/`total_count` are advisory and must not be used to decide
/// whether to keep paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedResult<T> {
    #[serde(rename = "_embedded", default)]
    pub embedded: Vec<T>,
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub total_page_count: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(rename = "_links", default, skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, LinkModel>,
}

impl<T> PagedResult<T> {
    pub fn has_next(&self) -> bool {
        self.links.contains_key("next")
    }

    /// Page number to request next, or `None` on the last page.
    pub fn next_page_number(&self) -> Option<u32> {
        self.has_next().then(|| self.page_number + 1)
    }
}

// ---------------------------------------------------------------------------
// Tenancy checks
// ---------------------------------------------------------------------------

/// Status of a single tenancy check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    #[default]
    Needed,
    NotNeeded,
    Arranged,
    Completed,
}

/// Category of a tenancy check. The server holds more kinds than this
/// client surfaces; anything beyond `preTenancy` collapses into `Other`
/// and is filtered out on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckType {
    PreTenancy,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenancyCheckModel {
    pub id: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CheckStatus,
    #[serde(rename = "type")]
    pub check_type: CheckType,
    #[serde(default)]
    pub tenancy_id: Option<String>,
    /// Opaque concurrency token; forwarded unchanged as `If-Match` on update.
    #[serde(rename = "_eTag")]
    pub etag: String,
    #[serde(rename = "_links", default, skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, LinkModel>,
}

/// Body for `POST /tenancies/{id}/checks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenancyCheck {
    pub description: String,
    #[serde(rename = "type")]
    pub check_type: CheckType,
    pub status: CheckStatus,
}

/// Body for `PATCH /tenancies/{id}/checks/{checkId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenancyCheck {
    pub description: String,
    pub status: CheckStatus,
}

// ---------------------------------------------------------------------------
// Tenancies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TenancyStatus {
    OfferPending,
    OfferWithdrawn,
    OfferRejected,
    Arranging,
    Current,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RentFrequency {
    Weekly,
    Monthly,
    Annually,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentRole {
    Managed,
    RentCollection,
    CollectFirstPayment,
    CollectRentToDate,
    LettingOnly,
    IntroducingTenant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenancyModel {
    pub id: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<TenancyStatus>,
    #[serde(default)]
    pub agent_role: Option<AgentRole>,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub rent_frequency: Option<RentFrequency>,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub applicant_id: Option<String>,
    #[serde(default)]
    pub negotiator_id: Option<String>,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(rename = "_eTag", default)]
    pub etag: Option<String>,
    /// Embedded resources requested via `embed`; heterogeneous, left raw.
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<serde_json::Value>,
    #[serde(rename = "_links", default, skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, LinkModel>,
}

/// Body for `POST /tenancies`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenancy {
    pub type_id: String,
    pub negotiator_id: String,
    pub property_id: String,
    pub applicant_id: String,
    pub agent_role: AgentRole,
    pub rent: f64,
    pub rent_frequency: RentFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TenancyStatus>,
}

/// Body for `PATCH /tenancies/{id}` — every field optional, the server
/// applies only what is present.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenancy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TenancyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_frequency: Option<RentFrequency>,
}

/// Resources the platform can embed alongside a tenancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenancyEmbed {
    Appointments,
    Applicant,
    Documents,
    Negotiator,
    Property,
    Source,
    Tasks,
    Type,
}

impl TenancyEmbed {
    pub fn as_str(self) -> &'static str {
        match self {
            TenancyEmbed::Appointments => "appointments",
            TenancyEmbed::Applicant => "applicant",
            TenancyEmbed::Documents => "documents",
            TenancyEmbed::Negotiator => "negotiator",
            TenancyEmbed::Property => "property",
            TenancyEmbed::Source => "source",
            TenancyEmbed::Tasks => "tasks",
            TenancyEmbed::Type => "type",
        }
    }
}

/// Filters for `GET /tenancies`. Array-valued filters serialize as
/// repeated query parameters.
#[derive(Debug, Clone, Default)]
pub struct TenancyQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub id: Option<String>,
    pub negotiator_id: Option<String>,
    pub applicant_id: Option<String>,
    pub property_id: Option<String>,
    pub status: Option<TenancyStatus>,
    pub email: Vec<String>,
    pub embed: Vec<TenancyEmbed>,
}

impl TenancyQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(n) = self.page_number {
            pairs.push(("pageNumber", n.to_string()));
        }
        if let Some(n) = self.page_size {
            pairs.push(("pageSize", n.to_string()));
        }
        if let Some(ref id) = self.id {
            pairs.push(("id", id.clone()));
        }
        if let Some(ref id) = self.negotiator_id {
            pairs.push(("negotiatorId", id.clone()));
        }
        if let Some(ref id) = self.applicant_id {
            pairs.push(("applicantId", id.clone()));
        }
        if let Some(ref id) = self.property_id {
            pairs.push(("propertyId", id.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", enum_wire_name(&status)));
        }
        for email in &self.email {
            pairs.push(("email", email.clone()));
        }
        for embed in &self.embed {
            pairs.push(("embed", embed.as_str().to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Association type for documents attached to tenancy checks.
pub const ASSOCIATED_TYPE_TENANCY_CHECK: &str = "tenancyCheck";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub id: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub associated_type: Option<String>,
    #[serde(default)]
    pub associated_id: Option<String>,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "_eTag", default)]
    pub etag: Option<String>,
}

/// Body for `POST /documents`. `file_data` carries the file content as a
/// base64 string; `file_url` is the hosted alternative.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub associated_type: String,
    pub associated_id: String,
    pub type_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Body for `PATCH /documents/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    pub type_id: String,
    pub name: String,
}

/// Filter for `GET /documents` — documents attached to a set of records.
/// The id list serializes as repeated `associatedId` parameters.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    pub associated_type: String,
    pub associated_ids: Vec<String>,
}

impl DocumentQuery {
    /// Documents attached to the given tenancy checks.
    pub fn tenancy_checks<I, S>(check_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            associated_type: ASSOCIATED_TYPE_TENANCY_CHECK.to_string(),
            associated_ids: check_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_query_pairs(&self, page_number: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("associatedType", self.associated_type.clone())];
        for id in &self.associated_ids {
            pairs.push(("associatedId", id.clone()));
        }
        pairs.push(("pageNumber", page_number.to_string()));
        pairs
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration list entry (document types, appointment types).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemModel {
    pub id: String,
    #[serde(default)]
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Wire name of a camelCase-serialized unit enum variant.
fn enum_wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
