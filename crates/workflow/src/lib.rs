//! Referential-integrity-aware create/update/delete workflows.
//!
//! The record store has no foreign-key constraints and no unique indexes, so
//! the rules that keep the catalog consistent live here: deletes are guarded
//! by a concurrent dependent lookup, creates and updates are gated on
//! validation and sanitization, and soft-unique keys get create-or-find
//! semantics. Each workflow returns an outcome enum; presenting the outcome
//! (render vs redirect) is the caller's job.

pub mod create;
pub mod delete;
pub mod forms;
pub mod update;

pub use create::{create_record, CreateOutcome};
pub use delete::{delete_record, DeleteOutcome};
pub use forms::{
    field_errors, parse_optional_date, parse_record_id, sanitize, validate_optional_date,
    validate_optional_record_id, validate_record_id, FieldError, FormFields,
};
pub use update::{update_record, UpdateOutcome};
