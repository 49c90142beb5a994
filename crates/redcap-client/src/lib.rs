//! REDCap API client
//!
//! Wraps the REDCap export API behind the [`RedcapApi`] trait and exposes
//! [`Project`], which resolves project metadata once and runs local query
//! filtering over exported records. The transport is a thin reqwest layer;
//! retry, backoff, and caching policies are deliberately absent.

pub mod api;
pub mod error;
pub mod http;
pub mod metadata;
pub mod project;
pub mod provider;

pub use api::{ApiRequest, EventName, ExportRequest, RawOrLabel, RequestKind};
pub use error::{ApiError, ClientError, ClientResult};
pub use http::RedcapClient;
pub use metadata::FieldMetadata;
pub use project::Project;
pub use provider::RedcapApi;

pub use redcap_query::Row;
