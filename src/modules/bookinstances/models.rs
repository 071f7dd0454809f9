use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

use libris_store::{Record, RecordId};
use libris_workflow::{
    parse_optional_date, parse_record_id, sanitize, validate_optional_date, validate_record_id,
    FormFields,
};

/// Circulation status of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl LoanStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Maintenance,
        Self::Loaned,
        Self::Reserved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::Loaned => "Loaned",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown loan status '{0}'")]
pub struct ParseLoanStatusError(String);

impl FromStr for LoanStatus {
    type Err = ParseLoanStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Maintenance" => Ok(Self::Maintenance),
            "Loaned" => Ok(Self::Loaned),
            "Reserved" => Ok(Self::Reserved),
            other => Err(ParseLoanStatusError(other.to_string())),
        }
    }
}

/// A physical copy of a book. `due_back` only carries meaning while the copy
/// is out of circulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: RecordId,
    pub book: RecordId,
    pub imprint: String,
    pub status: LoanStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Canonical path for this copy's detail page.
    pub fn url(&self) -> String {
        format!("/catalog/bookinstances/{}", self.id)
    }
}

impl Record for BookInstance {
    const COLLECTION: &'static str = "bookinstances";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

fn validate_status(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<LoanStatus>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("invalid_status");
            error.message = Some("Unknown status".into());
            Err(error)
        }
    }
}

/// Form payload for book instance create and update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(custom(function = validate_record_id, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = validate_status))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = validate_optional_date, message = "Invalid date"))]
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn empty() -> Self {
        Self {
            book: String::new(),
            imprint: String::new(),
            status: LoanStatus::Maintenance.as_str().to_string(),
            due_back: String::new(),
        }
    }

    pub fn from_entity(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: crate::utils::format_date_input(instance.due_back),
        }
    }
}

impl FormFields for BookInstanceForm {
    type Entity = BookInstance;

    fn sanitized(&self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: sanitize(&self.imprint),
            status: self.status.trim().to_string(),
            due_back: self.due_back.trim().to_string(),
        }
    }

    fn into_entity(self) -> BookInstance {
        BookInstance {
            id: RecordId::nil(),
            book: parse_record_id(&self.book),
            // status is validated before conversion
            status: self.status.parse().unwrap_or(LoanStatus::Maintenance),
            imprint: self.imprint,
            due_back: parse_optional_date(&self.due_back),
        }
    }
}
