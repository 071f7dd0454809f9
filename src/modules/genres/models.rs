use serde::{Deserialize, Serialize};
use validator::Validate;

use libris_store::{Filter, Record, RecordId};
use libris_workflow::{sanitize, FormFields};

/// A book classification such as "Fantasy" or "French Poetry".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: RecordId,
    pub name: String,
}

impl Genre {
    /// Canonical path for this genre's detail page.
    pub fn url(&self) -> String {
        format!("/catalog/genres/{}", self.id)
    }
}

impl Record for Genre {
    const COLLECTION: &'static str = "genres";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Form payload for genre create and update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Genre name required"))]
    pub name: String,
}

impl GenreForm {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
        }
    }

    pub fn from_entity(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

impl FormFields for GenreForm {
    type Entity = Genre;

    fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
        }
    }

    /// Genre names are soft-unique: creating an existing name resolves to
    /// the existing record instead of inserting a duplicate.
    fn unique_key(&self) -> Option<Filter> {
        Some(Filter::by("name", self.name.clone()))
    }

    fn into_entity(self) -> Genre {
        Genre {
            id: RecordId::nil(),
            name: self.name,
        }
    }
}
