use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use libris_store::{Record, RecordId};
use libris_workflow::{parse_optional_date, sanitize, validate_optional_date, FormFields};

use crate::utils::{format_date, format_date_input};

/// A writer referenced by books in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "family_name, first_name", the way listings display authors.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Formatted birth/death range. Empty without a birth date; an open
    /// range when the author is still alive.
    pub fn lifespan(&self) -> String {
        match (self.date_of_birth, self.date_of_death) {
            (Some(birth), Some(death)) => {
                format!("{} - {}", format_date(birth), format_date(death))
            }
            (Some(birth), None) => format!("{} -", format_date(birth)),
            _ => String::new(),
        }
    }

    /// Canonical path for this author's detail page.
    pub fn url(&self) -> String {
        format!("/catalog/authors/{}", self.id)
    }
}

impl Record for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Form payload for author create and update. Dates travel as ISO strings;
/// an empty string is a valid absence, anything else must parse.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be specified"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Family name must be specified"))]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = validate_optional_date, message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = validate_optional_date, message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn empty() -> Self {
        Self {
            first_name: String::new(),
            family_name: String::new(),
            date_of_birth: String::new(),
            date_of_death: String::new(),
        }
    }

    pub fn from_entity(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: format_date_input(author.date_of_birth),
            date_of_death: format_date_input(author.date_of_death),
        }
    }
}

impl FormFields for AuthorForm {
    type Entity = Author;

    fn sanitized(&self) -> Self {
        Self {
            first_name: sanitize(&self.first_name),
            family_name: sanitize(&self.family_name),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    fn into_entity(self) -> Author {
        Author {
            id: RecordId::nil(),
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: parse_optional_date(&self.date_of_birth),
            date_of_death: parse_optional_date(&self.date_of_death),
        }
    }
}
