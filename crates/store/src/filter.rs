//! Equality filters over stored documents.

use serde_json::Value;

/// Conjunction of field equality clauses, in the style of a document-database
/// query object. A clause against an array field matches by containment, so
/// `Filter::by("genre", id)` finds every book whose genre list includes `id`.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every document in the collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// Single field equality clause.
    pub fn by(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Add another clause; all clauses must match.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.clauses.iter().all(|(field, expected)| {
            match document.get(field) {
                Some(Value::Array(items)) => items.contains(expected),
                Some(actual) => actual == expected,
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&json!({"name": "Fantasy"})));
    }

    #[test]
    fn scalar_clause_matches_on_equality() {
        let filter = Filter::by("name", "Fantasy");
        assert!(filter.matches(&json!({"name": "Fantasy"})));
        assert!(!filter.matches(&json!({"name": "Poetry"})));
        assert!(!filter.matches(&json!({"title": "Fantasy"})));
    }

    #[test]
    fn array_clause_matches_by_containment() {
        let filter = Filter::by("genre", "g1");
        assert!(filter.matches(&json!({"genre": ["g0", "g1"]})));
        assert!(!filter.matches(&json!({"genre": ["g0", "g2"]})));
        assert!(!filter.matches(&json!({"genre": []})));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let filter = Filter::by("status", "Loaned").and("imprint", "Folio");
        assert!(filter.matches(&json!({"status": "Loaned", "imprint": "Folio"})));
        assert!(!filter.matches(&json!({"status": "Loaned", "imprint": "Gollancz"})));
    }
}
