use serde::{Deserialize, Serialize};
use validator::Validate;

use libris_store::{Record, RecordId};
use libris_workflow::{
    parse_record_id, sanitize, validate_optional_record_id, validate_record_id, FormFields,
};

/// A work in the catalog. Physical copies are tracked separately as book
/// instances; `genre` is stored as an id array so genre filters match by
/// containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: RecordId,
    pub genre: Vec<RecordId>,
}

impl Book {
    /// Canonical path for this book's detail page.
    pub fn url(&self) -> String {
        format!("/catalog/books/{}", self.id)
    }
}

impl Record for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Form payload for book create and update. References travel as id strings
/// selected from the form's dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 40, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = validate_record_id, message = "Author must be specified"))]
    pub author: String,
    #[serde(default)]
    #[validate(custom(function = validate_optional_record_id, message = "Invalid genre"))]
    pub genre: String,
}

impl BookForm {
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            isbn: String::new(),
            author: String::new(),
            genre: String::new(),
        }
    }

    pub fn from_entity(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author: book.author.to_string(),
            genre: book
                .genre
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl FormFields for BookForm {
    type Entity = Book;

    fn sanitized(&self) -> Self {
        Self {
            title: sanitize(&self.title),
            summary: sanitize(&self.summary),
            isbn: sanitize(&self.isbn),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
        }
    }

    fn into_entity(self) -> Book {
        let genre = if self.genre.is_empty() {
            Vec::new()
        } else {
            vec![parse_record_id(&self.genre)]
        };
        Book {
            id: RecordId::nil(),
            title: self.title,
            summary: self.summary,
            isbn: self.isbn,
            author: parse_record_id(&self.author),
            genre,
        }
    }
}
