//! Collaborator trait for the remote REDCap API
//!
//! [`crate::Project`] talks to REDCap only through this trait, so tests can
//! drive the filter engine from in-memory sources without any transport.

use crate::api::ExportRequest;
use crate::error::ApiError;
use crate::metadata::FieldMetadata;
use async_trait::async_trait;
use redcap_query::Row;

/// Remote operations the project layer depends on
#[async_trait]
pub trait RedcapApi: Send + Sync {
    /// Export the project's metadata (data dictionary)
    async fn export_metadata(&self) -> Result<Vec<FieldMetadata>, ApiError>;

    /// Export records restricted to the requested columns.
    ///
    /// Raw values are always strings; row ordering is not guaranteed and
    /// must not be relied upon.
    async fn export_records(&self, request: &ExportRequest) -> Result<Vec<Row>, ApiError>;
}
