//! API payload construction
//!
//! REDCap takes a flat form-encoded payload. List-valued parameters are
//! joined into comma-separated strings before encoding, and each request
//! kind has a required key set that is checked before dispatch so a
//! malformed payload never reaches the wire.

use crate::error::ApiError;

/// Content kinds the client dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Record export (`content=record`)
    ExportRecords,
    /// Record import (`content=record`, with data)
    ImportRecords,
    /// Metadata export (`content=metadata`)
    Metadata,
    /// File export (`content=file`)
    ExportFile,
    /// File import (`content=file`, with data)
    ImportFile,
}

impl RequestKind {
    /// Short name used in error messages and request logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ExportRecords => "export-records",
            Self::ImportRecords => "import-records",
            Self::Metadata => "metadata",
            Self::ExportFile => "export-file",
            Self::ImportFile => "import-file",
        }
    }

    /// Keys that must be present in the payload for this kind
    const fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Self::ExportRecords => &["token", "content", "format", "type"],
            Self::ImportRecords => &[
                "token",
                "content",
                "format",
                "type",
                "overwriteBehavior",
                "data",
            ],
            Self::Metadata => &["token", "content", "format"],
            Self::ExportFile => &["token", "content", "action", "record", "field"],
            Self::ImportFile => &["token", "content", "action", "record", "field", "file"],
        }
    }

    /// Expected `content` value
    const fn content(&self) -> &'static str {
        match self {
            Self::ExportRecords | Self::ImportRecords => "record",
            Self::Metadata => "metadata",
            Self::ExportFile | Self::ImportFile => "file",
        }
    }
}

/// A validated, flattened API payload.
///
/// Pairs are kept in insertion order; list values must be flattened with
/// [`join_values`] before they reach the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    kind: RequestKind,
    payload: Vec<(String, String)>,
}

impl ApiRequest {
    /// Build a payload for `kind`, validating required keys and content
    pub fn new(kind: RequestKind, payload: Vec<(String, String)>) -> Result<Self, ApiError> {
        let request = Self { kind, payload };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<(), ApiError> {
        for key in self.kind.required_keys() {
            if self.get(key).is_none() {
                return Err(ApiError::Payload {
                    kind: self.kind.name(),
                    message: format!("required key '{key}' not present"),
                });
            }
        }
        let content = self.get("content");
        if content != Some(self.kind.content()) {
            return Err(ApiError::Payload {
                kind: self.kind.name(),
                message: format!(
                    "content must be '{}', got '{}'",
                    self.kind.content(),
                    content.unwrap_or_default(),
                ),
            });
        }
        Ok(())
    }

    /// The request kind this payload was validated against
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Look up a payload value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.payload
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The form pairs to encode
    pub fn form(&self) -> &[(String, String)] {
        &self.payload
    }
}

/// Join a list parameter into the comma-separated form REDCap expects
pub fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Export raw coded values or labels for multiple-choice fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawOrLabel {
    /// Raw coded values
    #[default]
    Raw,
    /// Option labels
    Label,
    /// Both raw and label columns
    Both,
}

impl RawOrLabel {
    const fn as_param(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Label => "label",
            Self::Both => "both",
        }
    }
}

/// Export the unique event name or the event label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventName {
    /// Event label
    #[default]
    Label,
    /// Unique event name
    Unique,
}

impl EventName {
    const fn as_param(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Unique => "unique",
        }
    }
}

/// Options for a record export.
///
/// Every list defaults to empty, which REDCap reads as "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    records: Vec<String>,
    fields: Vec<String>,
    forms: Vec<String>,
    events: Vec<String>,
    raw_or_label: RawOrLabel,
    event_name: EventName,
}

impl ExportRequest {
    /// Create an export of all records and fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the export to specific record names
    pub fn with_records<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records = records.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the export to specific fields
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the export to specific forms
    pub fn with_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forms = forms.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the export to specific longitudinal events
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Choose raw coded values or labels for multiple-choice fields
    pub fn with_raw_or_label(mut self, raw_or_label: RawOrLabel) -> Self {
        self.raw_or_label = raw_or_label;
        self
    }

    /// Choose the event naming scheme for longitudinal exports
    pub fn with_event_name(mut self, event_name: EventName) -> Self {
        self.event_name = event_name;
        self
    }

    /// The requested record names
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// The requested fields
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The requested forms
    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// The requested events
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Flatten the options onto a base payload
    pub(crate) fn apply(&self, payload: &mut Vec<(String, String)>) {
        if !self.records.is_empty() {
            payload.push(("records".to_string(), join_values(&self.records)));
        }
        if !self.fields.is_empty() {
            payload.push(("fields".to_string(), join_values(&self.fields)));
        }
        if !self.forms.is_empty() {
            payload.push(("forms".to_string(), join_values(&self.forms)));
        }
        if !self.events.is_empty() {
            payload.push(("events".to_string(), join_values(&self.events)));
        }
        payload.push((
            "rawOrLabel".to_string(),
            self.raw_or_label.as_param().to_string(),
        ));
        payload.push((
            "eventName".to_string(),
            self.event_name.as_param().to_string(),
        ));
    }
}
