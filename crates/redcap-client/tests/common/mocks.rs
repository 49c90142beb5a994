//! Mock implementations for testing
//!
//! Provides a configurable in-memory `RedcapApi` so project-level tests
//! never touch a transport, plus helpers for building metadata and rows.

use async_trait::async_trait;
use parking_lot::RwLock;
use redcap_client::{ApiError, ExportRequest, FieldMetadata, RedcapApi, Row};
use std::sync::Arc;

/// Build a metadata record with a validation tag (empty string = none)
pub fn field(name: &str, validation: &str) -> FieldMetadata {
    FieldMetadata {
        field_name: name.to_string(),
        form_name: "main".to_string(),
        field_label: format!("{name} label"),
        field_type: "text".to_string(),
        validation: validation.to_string(),
    }
}

/// Build a row from field/value pairs
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// In-memory API with configurable metadata and rows.
///
/// Every record export is recorded so tests can assert on fetch count and
/// on the requested column set.
#[derive(Clone, Debug)]
pub struct MockApi {
    metadata: Vec<FieldMetadata>,
    rows: Vec<Row>,
    record_requests: Arc<RwLock<Vec<ExportRequest>>>,
    fail_record_export: bool,
}

impl MockApi {
    pub fn new(metadata: Vec<FieldMetadata>) -> Self {
        Self {
            metadata,
            rows: Vec::new(),
            record_requests: Arc::new(RwLock::new(Vec::new())),
            fail_record_export: false,
        }
    }

    /// Configure the rows every record export returns
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Make every record export fail; lets tests prove no fetch happened
    pub fn with_failing_record_export(mut self) -> Self {
        self.fail_record_export = true;
        self
    }

    /// Number of record exports dispatched so far
    pub fn fetch_count(&self) -> usize {
        self.record_requests.read().len()
    }

    /// The recorded export requests, in dispatch order
    pub fn record_requests(&self) -> Vec<ExportRequest> {
        self.record_requests.read().clone()
    }
}

#[async_trait]
impl RedcapApi for MockApi {
    async fn export_metadata(&self) -> Result<Vec<FieldMetadata>, ApiError> {
        Ok(self.metadata.clone())
    }

    async fn export_records(&self, request: &ExportRequest) -> Result<Vec<Row>, ApiError> {
        self.record_requests.write().push(request.clone());
        if self.fail_record_export {
            return Err(ApiError::Status {
                status: 500,
                body: "unexpected fetch".to_string(),
            });
        }
        // Restrict returned rows to the requested columns, like the server.
        let rows = if request.fields().is_empty() {
            self.rows.clone()
        } else {
            self.rows
                .iter()
                .map(|full| {
                    full.iter()
                        .filter(|&(k, _)| request.fields().contains(k))
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                })
                .collect()
        };
        Ok(rows)
    }
}
