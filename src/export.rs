// src/export.rs
//
// Pure serialization. No IO here — delivery is `file`'s job, so the same
// bytes can go to a file, stdout, or a test buffer unchanged.

use thiserror::Error;

use crate::specs::audit_log::{self, Entry, MissingField, OnMissing};

/// Serialize records as the export format: UTF-8, 2-space indented,
/// array of objects with keys `who`, `what`, `type`, `when` in that order.
/// An empty collection serializes as `[]`.
pub fn to_json(entries: &[Entry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Exact inverse of [`to_json`]. Also the input side of the hooks report,
/// which consumes previously exported files.
pub fn from_json(text: &str) -> serde_json::Result<Vec<Entry>> {
    serde_json::from_str(text)
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Extract(#[from] MissingField),
    #[error("serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The automation surface in one call: saved page in, serialized export
/// out. The manual-trigger adapter around this lives in `runner`.
pub fn export_document(doc: &str, on_missing: OnMissing) -> Result<String, ExportError> {
    let records = audit_log::extract_with(doc, on_missing)?;
    Ok(to_json(&records)?)
}
