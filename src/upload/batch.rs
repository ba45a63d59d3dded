//! Upload batch validation.
//!
//! The wire form is a JSON array of `{filename, content}` objects with
//! `content` in base64. Validation is all-or-nothing: one bad element
//! rejects the whole batch, and nothing is decoded past the point of
//! acceptance into [`UploadRecord`]s.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use utoipa::ToSchema;

/// One element of the upload wire format.
///
/// Both fields are optional at the serde level so a missing field can
/// be reported against the element that lacks it instead of failing
/// the whole body deserialization.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RawUpload {
    /// Name the file should be stored under.
    pub filename: Option<String>,
    /// File bytes, base64-encoded.
    pub content: Option<String>,
}

/// A validated, decoded upload record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Target filename within the namespace.
    pub name: String,
    /// Decoded file bytes.
    pub bytes: Vec<u8>,
}

/// Field-level rejection of a batch.
#[derive(Debug)]
pub struct BatchRejection {
    /// Errors keyed by `files[i].<field>`.
    pub details: HashMap<String, Vec<String>>,
}

impl BatchRejection {
    fn new() -> Self {
        Self {
            details: HashMap::new(),
        }
    }

    fn push(&mut self, index: usize, field: &str, message: impl Into<String>) {
        self.details
            .entry(format!("files[{index}].{field}"))
            .or_default()
            .push(message.into());
    }

    fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// Validate and decode a batch.
///
/// Returns the full decoded sequence (order preserved) only if every
/// element carries a non-empty `filename` and base64-decodable
/// `content`. Otherwise returns the collected per-element errors and
/// no records.
pub fn validate_batch(raw: Vec<RawUpload>) -> Result<Vec<UploadRecord>, BatchRejection> {
    let mut rejection = BatchRejection::new();
    let mut records = Vec::with_capacity(raw.len());

    for (index, item) in raw.into_iter().enumerate() {
        let name = match item.filename {
            Some(name) if !name.is_empty() => Some(name),
            Some(_) => {
                rejection.push(index, "filename", "must not be empty");
                None
            }
            None => {
                rejection.push(index, "filename", "is required");
                None
            }
        };

        let bytes = match item.content {
            Some(content) => match BASE64.decode(content.as_bytes()) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    rejection.push(index, "content", format!("invalid base64: {e}"));
                    None
                }
            },
            None => {
                rejection.push(index, "content", "is required");
                None
            }
        };

        if let (Some(name), Some(bytes)) = (name, bytes) {
            records.push(UploadRecord { name, bytes });
        }
    }

    if rejection.is_empty() {
        Ok(records)
    } else {
        Err(rejection)
    }
}
