// DocWatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked document with an expiry date.
///
/// This is the unit that flows through querying, CSV import/export, and the
/// store. `NaiveDate` gives the due date date-only semantics by construction:
/// no time-of-day component exists to leak into comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier. `None` until the document is first saved.
    pub id: Option<i64>,

    /// Document title. Never empty or whitespace-only after validation.
    pub title: String,

    /// Calendar date on which the document expires.
    pub due_date: NaiveDate,

    /// Optional path to an attached file. Never an empty string: a blank
    /// or whitespace-only path normalises to `None`.
    pub attachment_path: Option<String>,
}

impl Document {
    /// Build a validated, normalised document.
    ///
    /// The title is trimmed and must not end up empty. The attachment path,
    /// when given, is trimmed; a blank value becomes `None`.
    pub fn new(
        title: &str,
        due_date: NaiveDate,
        attachment_path: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(Self {
            id: None,
            title: title.to_string(),
            due_date,
            attachment_path: normalize_path(attachment_path),
        })
    }

    /// True once the store has assigned an id.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

/// Trim an optional attachment path, mapping blank values to `None`.
pub(crate) fn normalize_path(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}
