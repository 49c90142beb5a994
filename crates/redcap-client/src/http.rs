//! reqwest transport for the REDCap API
//!
//! One client per project token. Every call is a single form-encoded POST;
//! there are no retries here, and the only timeout is the client-wide one.

use crate::api::{ApiRequest, ExportRequest, RequestKind};
use crate::error::ApiError;
use crate::metadata::FieldMetadata;
use crate::provider::RedcapApi;
use async_trait::async_trait;
use redcap_query::Row;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("redcap-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one REDCap project token
#[derive(Debug, Clone)]
pub struct RedcapClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl RedcapClient {
    /// Create a client for the given API endpoint and project token
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    /// The API endpoint this client posts to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Payload keys shared by every request
    fn base_payload(&self) -> Vec<(String, String)> {
        vec![
            ("token".to_string(), self.token.clone()),
            ("format".to_string(), "json".to_string()),
            ("type".to_string(), "flat".to_string()),
        ]
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(kind = request.kind().name(), "dispatching REDCap request");
        let response = self
            .http
            .post(&self.api_url)
            .form(request.form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "received REDCap response");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RedcapApi for RedcapClient {
    async fn export_metadata(&self) -> Result<Vec<FieldMetadata>, ApiError> {
        let mut payload = self.base_payload();
        payload.push(("content".to_string(), "metadata".to_string()));
        let request = ApiRequest::new(RequestKind::Metadata, payload)?;
        let value = self.dispatch(&request).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn export_records(&self, export: &ExportRequest) -> Result<Vec<Row>, ApiError> {
        let mut payload = self.base_payload();
        payload.push(("content".to_string(), "record".to_string()));
        export.apply(&mut payload);
        let request = ApiRequest::new(RequestKind::ExportRecords, payload)?;
        let value = self.dispatch(&request).await?;
        Ok(serde_json::from_value(value)?)
    }
}
