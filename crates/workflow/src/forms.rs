//! Form payload contract and shared field validators.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use libris_store::{Filter, Record, RecordId};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// A submitted form bound to the entity kind it produces. The workflow layer
/// sanitizes, validates, and converts through this trait, so every entity
/// kind shares one create/update code path.
pub trait FormFields: Validate + Clone + Send + Sync {
    /// The entity this form creates or replaces. Updates are routed to this
    /// type's own collection; there is no way to address another one.
    type Entity: Record;

    /// Trim and escape free-text fields. Runs before validation, so the
    /// values that are checked are the values that get stored and echoed.
    fn sanitized(&self) -> Self;

    /// Soft-unique key for create-or-find semantics, evaluated against the
    /// sanitized fields. `None` means duplicates are allowed.
    fn unique_key(&self) -> Option<Filter> {
        None
    }

    /// Build the entity. Only called after validation has passed.
    fn into_entity(self) -> Self::Entity;
}

/// One field constraint violation, surfaced back to the form alongside the
/// echoed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flatten validator output into presentable per-field messages, ordered by
/// field name for stable rendering.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, violations) in errors.field_errors() {
        for violation in violations.iter() {
            let message = violation
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("Invalid value for '{field}'"));
            out.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
    }
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

/// Escape markup-significant characters in a free-text field. This is the
/// same escaping the template engine applies, applied at the persistence
/// boundary as the original application did.
pub fn sanitize(input: &str) -> String {
    tera::escape_html(input.trim())
}

/// Validator for optional date inputs: absent is fine, present must parse.
pub fn validate_optional_date(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Ok(());
    }
    match NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("invalid_date");
            error.message = Some("Invalid date".into());
            Err(error)
        }
    }
}

/// Validator for fields carrying a record reference.
pub fn validate_record_id(raw: &str) -> Result<(), ValidationError> {
    match RecordId::from_str(raw.trim()) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("invalid_reference");
            error.message = Some("Invalid record reference".into());
            Err(error)
        }
    }
}

/// Validator for optional reference fields: absent or empty is fine, present
/// must parse.
pub fn validate_optional_record_id(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Ok(());
    }
    validate_record_id(raw)
}

/// Parse a validated optional date input. Callers validate first; by then an
/// empty field is the only way to land on `None`.
pub fn parse_optional_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).ok()
}

/// Parse a validated record reference; the nil id stands in for a value that
/// never passed validation.
pub fn parse_record_id(raw: &str) -> RecordId {
    RecordId::from_str(raw.trim()).unwrap_or_else(|_| RecordId::nil())
}
