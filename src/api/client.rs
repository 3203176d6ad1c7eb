//! Platform HTTP client — base URL, fixed API version header, bearer token.
//!
//! Every typed endpoint in this module's siblings goes through the request
//! helpers here, which map transport, status, and decode failures into
//! `GatewayError`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, IF_MATCH};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GatewayError;

/// Platform API version this client speaks.
pub const DEFAULT_API_VERSION: &str = "2020-01-31";

pub(crate) mod urls {
    pub const TENANCIES: &str = "/tenancies";
    pub const DOCUMENTS: &str = "/documents";
    pub const CONFIGURATION_DOCUMENT_TYPES: &str = "/configuration/documentTypes";
    pub const CONFIGURATION_APPOINTMENT_TYPES: &str = "/configuration/appointmentTypes";
}

// ---------------------------------------------------------------------------
// PlatformConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub base_url: String,
    pub api_version: String,
    pub access_token: Option<String>,
}

impl PlatformConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

// ---------------------------------------------------------------------------
// PlatformClient
// ---------------------------------------------------------------------------

pub struct PlatformClient {
    http: reqwest::Client,
    config: PlatformConfig,
}

impl PlatformClient {
    pub fn new(config: PlatformConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(version) = HeaderValue::from_str(&config.api_version) {
            headers.insert("api-version", version);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    /// Absolute URL for a platform path.
    pub(crate) fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(ref token) = self.config.access_token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Check the response status, mapping 412 to `PreconditionFailed` and
    /// any other non-success status to `Status` with the body attached.
    async fn check_status(url: &str, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::PRECONDITION_FAILED {
            return Err(GatewayError::PreconditionFailed {
                url: url.to_string(),
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, GatewayError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    // -----------------------------------------------------------------------
    // Request helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        let response = self
            .request(Method::GET, &url)
            .query(query)
            .send()
            .await?;
        let response = Self::check_status(&url, response).await?;
        Self::decode(&url, response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        let response = self.request(Method::POST, &url).json(body).send().await?;
        let response = Self::check_status(&url, response).await?;
        Self::decode(&url, response).await
    }

    /// PATCH with the record's concurrency token as `If-Match`. The platform
    /// responds 412 when the token is stale; the body of a success response
    /// is discarded (callers refetch rather than trust it).
    pub(crate) async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        etag: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let url = self.url(path);
        let etag_value = HeaderValue::from_str(etag)
            .map_err(|_| GatewayError::InvalidToken { url: url.clone() })?;
        let response = self
            .request(Method::PATCH, &url)
            .header(IF_MATCH, etag_value)
            .json(body)
            .send()
            .await?;
        Self::check_status(&url, response).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        let url = self.url(path);
        let response = self.request(Method::DELETE, &url).send().await?;
        Self::check_status(&url, response).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generic surface
    // -----------------------------------------------------------------------

    /// Follow a `_links` href. Accepts both absolute and platform-relative
    /// hrefs, as the platform mixes the two.
    pub async fn get_link<T: DeserializeOwned>(&self, href: &str) -> Result<T, GatewayError> {
        let url = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            self.url(href)
        };
        let response = self.request(Method::GET, &url).send().await?;
        let response = Self::check_status(&url, response).await?;
        Self::decode(&url, response).await
    }

    /// Binary side-channel fetch (document downloads).
    pub(crate) async fn get_octet_stream(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        let url = self.url(path);
        let response = self
            .request(Method::GET, &url)
            .header(ACCEPT, HeaderValue::from_static("application/octet-stream"))
            .send()
            .await?;
        let response = Self::check_status(&url, response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
