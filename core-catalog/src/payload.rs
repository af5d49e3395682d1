//! Outgoing payload assembly and validation
//!
//! Every mutation goes through the same pipeline: a resource-specific draft
//! validates its fields, assembles a [`Payload`], and the payload picks its
//! own wire encoding: multipart form data when a file is attached, JSON
//! otherwise. The encoding decision lives here, once, instead of being
//! duck-typed at every call site.

use bridge_traits::http::MultipartForm;
use bytes::Bytes;
use serde_json::{Map, Value};
use std::fmt;

/// Whether a draft is being validated for creation or for an update.
///
/// Some resources allow omitting a file on update (the existing upload is
/// kept) while requiring it on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

// =============================================================================
// Validation
// =============================================================================

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All validation failures for a draft, surfaced together so a form can mark
/// every offending field at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for the given field, if it failed.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects field errors while a draft checks itself.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a text field to be non-empty after trimming.
    pub fn require_text(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    /// Require a number to be strictly positive.
    pub fn require_positive(&mut self, field: &str, value: f64, message: &str) {
        if !(value > 0.0) {
            self.fail(field, message);
        }
    }

    /// Require a condition to hold.
    pub fn require(&mut self, field: &str, ok: bool, message: &str) {
        if !ok {
            self.fail(field, message);
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Succeed if nothing failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Binary field attached to a payload (cover image, audio file).
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Scalar or list field value.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    List(Vec<String>),
    Number(f64),
    Flag(bool),
}

/// Outgoing mutation payload, encoding-agnostic until [`Payload::encode`].
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
    files: Vec<FilePart>,
}

/// A payload reduced to its wire form.
#[derive(Debug, Clone)]
pub enum EncodedBody {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed text field.
    pub fn text(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.fields.push((
            name.into(),
            FieldValue::Text(value.as_ref().trim().to_string()),
        ));
        self
    }

    /// Add a list field, dropping entries that are blank after trimming.
    pub fn list<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        self.fields.push((name.into(), FieldValue::List(values)));
        self
    }

    /// Add a numeric field.
    pub fn number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.push((name.into(), FieldValue::Number(value)));
        self
    }

    /// Add a boolean field.
    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.fields.push((name.into(), FieldValue::Flag(value)));
        self
    }

    /// Attach a file, if one was provided.
    pub fn maybe_file(mut self, file: Option<FilePart>) -> Self {
        if let Some(file) = file {
            self.files.push(file);
        }
        self
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Pick the wire encoding: multipart when any file is attached, JSON
    /// otherwise.
    pub fn encode(self) -> EncodedBody {
        if self.files.is_empty() {
            let mut object = Map::new();
            for (name, value) in self.fields {
                let json = match value {
                    FieldValue::Text(s) => Value::String(s),
                    FieldValue::List(items) => {
                        Value::Array(items.into_iter().map(Value::String).collect())
                    }
                    FieldValue::Number(n) => serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    FieldValue::Flag(b) => Value::Bool(b),
                };
                object.insert(name, json);
            }
            EncodedBody::Json(Value::Object(object))
        } else {
            let mut form = MultipartForm::new();
            for (name, value) in self.fields {
                match value {
                    FieldValue::Text(s) => form = form.text(name, s),
                    // List fields repeat under the same name, one entry each
                    FieldValue::List(items) => {
                        for item in items {
                            form = form.text(name.clone(), item);
                        }
                    }
                    FieldValue::Number(n) => form = form.text(name, n.to_string()),
                    FieldValue::Flag(b) => form = form.text(name, b.to_string()),
                }
            }
            for file in self.files {
                form = form.file(file.field, file.file_name, file.content_type, file.data);
            }
            EncodedBody::Multipart(form)
        }
    }
}
