// src/specs/audit_log.rs
//
// The organization audit log page. One record per entry element; field
// locations are class/attribute conventions owned by the site, so a markup
// change here is a silent breaking change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::html::{attr_value, next_class_block, next_tag_block, opening_tag, text_of};

/// Marker classes for the entry container and its text fields.
pub const ENTRY_MARK: &str = "audit-log-item";
pub const WHO_MARK: &str = "member-username";
pub const WHAT_MARK: &str = "audit-action-info";
pub const TYPE_MARK: &str = "audit-type";
/// The timestamp lives on an attribute of the entry's `<time>` element.
pub const WHEN_TAG: &str = "time";
pub const WHEN_ATTR: &str = "datetime";

/// One audit log line. Field order is the exported JSON key order:
/// `who`, `what`, `type`, `when`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Acting username, text content as written.
    pub who: String,
    /// Action description, leading/trailing whitespace trimmed.
    pub what: String,
    /// Category label (e.g. `hook.create`), trimmed.
    #[serde(rename = "type")]
    pub kind: String,
    /// ISO-8601 timestamp, taken verbatim from the attribute.
    pub when: String,
}

/// The one extraction error: an entry element lacked an expected marker.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("entry {index}: no {field} found")]
pub struct MissingField {
    /// Document-order position of the offending entry element.
    pub index: usize,
    /// The marker that was absent (class token or tag name).
    pub field: &'static str,
}

/// Aggregate policy when an entry lacks a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnMissing {
    /// Fail the whole extraction; no partial collection escapes. Default.
    #[default]
    Abort,
    /// Drop the offending record, keep the rest.
    Skip,
    /// Keep the record with the empty string for whatever was absent.
    Blank,
}

/// Snapshot extraction with the default abort-all policy.
pub fn extract(doc: &str) -> Result<Vec<Entry>, MissingField> {
    extract_with(doc, OnMissing::Abort)
}

/// Snapshot extraction: one record per entry element, document order,
/// possibly empty. The document is an explicit input; nothing ambient.
pub fn extract_with(doc: &str, on_missing: OnMissing) -> Result<Vec<Entry>, MissingField> {
    let mut entries = Vec::new();
    let mut pos = 0usize;
    let mut index = 0usize;
    while let Some((s, e)) = next_class_block(doc, ENTRY_MARK, pos) {
        let block = &doc[s..e];
        pos = e;
        match entry_record(block, index) {
            Ok(entry) => entries.push(entry),
            Err(err) => match on_missing {
                OnMissing::Abort => return Err(err),
                OnMissing::Skip => {}
                OnMissing::Blank => entries.push(blank_record(block)),
            },
        }
        index += 1;
    }
    Ok(entries)
}

/// Map one entry block to a record, naming the first missing marker.
pub fn entry_record(block: &str, index: usize) -> Result<Entry, MissingField> {
    let missing = |field: &'static str| MissingField { index, field };
    Ok(Entry {
        who: field_text(block, WHO_MARK).ok_or_else(|| missing(WHO_MARK))?,
        what: trimmed(field_text(block, WHAT_MARK).ok_or_else(|| missing(WHAT_MARK))?),
        kind: trimmed(field_text(block, TYPE_MARK).ok_or_else(|| missing(TYPE_MARK))?),
        when: when_attr(block).ok_or_else(|| missing(WHEN_TAG))?,
    })
}

fn blank_record(block: &str) -> Entry {
    Entry {
        who: field_text(block, WHO_MARK).unwrap_or_default(),
        what: field_text(block, WHAT_MARK).map(trimmed).unwrap_or_default(),
        kind: field_text(block, TYPE_MARK).map(trimmed).unwrap_or_default(),
        when: when_attr(block).unwrap_or_default(),
    }
}

fn field_text(block: &str, class: &str) -> Option<String> {
    let (s, e) = next_class_block(block, class, 0)?;
    Some(text_of(&block[s..e]))
}

fn when_attr(block: &str) -> Option<String> {
    let (s, e) = next_tag_block(block, WHEN_TAG, 0)?;
    let tag = opening_tag(&block[s..e])?;
    attr_value(tag, WHEN_ATTR).map(str::to_string)
}

fn trimmed(s: String) -> String {
    s.trim().to_string()
}
