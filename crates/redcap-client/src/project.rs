//! Project-level operations
//!
//! [`Project`] exports the data dictionary once at construction and keeps
//! it resident; declared-type lookups never go back to the server. Filter
//! operations fetch the minimal column set for the query, then evaluate
//! locally.

use crate::api::ExportRequest;
use crate::error::{ClientError, ClientResult};
use crate::metadata::FieldMetadata;
use crate::provider::RedcapApi;
use redcap_query::{ConfigurationError, Query, QueryExpr, Row};
use redcap_types::FieldType;
use std::collections::BTreeSet;

/// A REDCap project bound to an API collaborator
#[derive(Debug)]
pub struct Project<A> {
    api: A,
    name: String,
    metadata: Vec<FieldMetadata>,
    id_field: String,
}

impl<A: RedcapApi> Project<A> {
    /// Connect to a project: exports metadata once and keeps it resident.
    ///
    /// The first metadata field is the record id field; its value
    /// identifies records in every filter result.
    pub async fn connect(api: A, name: impl Into<String>) -> ClientResult<Self> {
        let metadata = api.export_metadata().await?;
        let id_field = metadata
            .first()
            .map(|field| field.field_name.clone())
            .ok_or(ClientError::EmptyMetadata)?;
        Ok(Self {
            api,
            name: name.into(),
            metadata,
            id_field,
        })
    }

    /// The project name given at connect time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The record id field (first field of the data dictionary)
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// The project's metadata records, in dictionary order
    pub fn metadata(&self) -> &[FieldMetadata] {
        &self.metadata
    }

    /// All field names, in dictionary order
    pub fn field_names(&self) -> Vec<&str> {
        self.metadata
            .iter()
            .map(|field| field.field_name.as_str())
            .collect()
    }

    /// All field labels, in dictionary order
    pub fn field_labels(&self) -> Vec<&str> {
        self.metadata
            .iter()
            .map(|field| field.field_label.as_str())
            .collect()
    }

    /// Declared comparison type of a field, `None` when not validated
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.metadata
            .iter()
            .find(|f| f.field_name == field)
            .and_then(FieldMetadata::declared_type)
    }

    /// Export records with the given options
    pub async fn export_records(&self, request: &ExportRequest) -> ClientResult<Vec<Row>> {
        Ok(self.api.export_records(request).await?)
    }

    /// Run a single-field query and return the matching record ids.
    ///
    /// Fetches exactly the id column and the queried column for all
    /// records, resolves the field's declared type (falling back to
    /// `default_type` when the field carries no validation tag), and
    /// evaluates locally. An unknown field fails before any fetch.
    pub async fn single_filter(
        &self,
        query: &Query,
        default_type: FieldType,
    ) -> ClientResult<BTreeSet<String>> {
        self.require_field(query.field())?;

        let mut columns = vec![self.id_field.as_str()];
        if query.field() != self.id_field {
            columns.push(query.field());
        }
        let request = ExportRequest::new().with_fields(columns);
        let rows = self.api.export_records(&request).await?;

        let field_type = self.field_type(query.field()).unwrap_or(default_type);
        Ok(query.evaluate(&rows, &self.id_field, field_type)?)
    }

    /// Run a composed query and return the matching record ids.
    ///
    /// All referenced fields are validated against the dictionary before
    /// anything is fetched; the union of referenced columns plus the id
    /// column is then exported in a single call, and each member's field
    /// coerces under its own declared type.
    pub async fn filter(
        &self,
        expr: &QueryExpr,
        default_type: FieldType,
    ) -> ClientResult<BTreeSet<String>> {
        let fields = expr.fields();
        for field in &fields {
            self.require_field(field)?;
        }

        let mut columns = vec![self.id_field.as_str()];
        columns.extend(fields.iter().copied().filter(|f| *f != self.id_field));
        let request = ExportRequest::new().with_fields(columns);
        let rows = self.api.export_records(&request).await?;

        let lookup = |field: &str| self.field_type(field).unwrap_or(default_type);
        Ok(expr.evaluate(&rows, &self.id_field, &lookup)?)
    }

    fn require_field(&self, field: &str) -> Result<(), ConfigurationError> {
        if self.metadata.iter().any(|f| f.field_name == field) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownField {
                field: field.to_string(),
            })
        }
    }
}
