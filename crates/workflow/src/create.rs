//! Validated create with optional create-or-find semantics.

use libris_store::{RecordStore, StoreError};

use crate::forms::{field_errors, FieldError, FormFields};

/// Result of a validated create.
pub enum CreateOutcome<F: FormFields> {
    /// A new record was inserted.
    Created(F::Entity),
    /// A record already matched the form's soft-unique key; nothing was
    /// inserted and the existing record stands in for the result.
    Existing(F::Entity),
    /// Validation failed before any store access. `fields` echoes the
    /// sanitized submission so the form can be re-rendered pre-filled.
    Invalid { errors: Vec<FieldError>, fields: F },
}

/// Sanitize and validate `fields`, then insert the entity they describe.
///
/// When the form declares a soft-unique key, an existing match is returned
/// instead of inserting a duplicate. The key is only advisory: the store has
/// no unique index, so two concurrent creates can still both insert. That
/// window is accepted; sequential duplicates are what the check prevents.
pub async fn create_record<S, F>(store: &S, fields: F) -> Result<CreateOutcome<F>, StoreError>
where
    S: RecordStore + ?Sized,
    F: FormFields,
{
    let fields = fields.sanitized();
    if let Err(violations) = fields.validate() {
        return Ok(CreateOutcome::Invalid {
            errors: field_errors(&violations),
            fields,
        });
    }

    if let Some(key) = fields.unique_key() {
        if let Some(existing) = store.find_many::<F::Entity>(key).await?.into_iter().next() {
            return Ok(CreateOutcome::Existing(existing));
        }
    }

    let created = store.save(fields.into_entity()).await?;
    Ok(CreateOutcome::Created(created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Shelf, ShelfForm, Volume, VolumeForm};
    use libris_store::{Filter, MemoryStore, Record, RecordStore};

    #[tokio::test]
    async fn valid_fields_create_a_findable_record() {
        let store = MemoryStore::new();
        let outcome = create_record(&store, ShelfForm::new("  east wing  "))
            .await
            .unwrap();

        let CreateOutcome::Created(shelf) = outcome else {
            panic!("expected created");
        };
        assert_eq!(shelf.label, "east wing"); // stored sanitized
        let found: Option<Shelf> = store.find_by_id(shelf.id).await.unwrap();
        assert_eq!(found, Some(shelf));
    }

    #[tokio::test]
    async fn markup_is_escaped_before_storage() {
        let store = MemoryStore::new();
        let outcome = create_record(&store, VolumeForm::new("<b>Dune</b>", ""))
            .await
            .unwrap();
        let CreateOutcome::Invalid { errors, fields } = outcome else {
            panic!("expected invalid shelf reference");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "shelf");
        // The echoed title is already escaped, matching what a successful
        // submission would have stored.
        assert_eq!(fields.title, "&lt;b&gt;Dune&lt;&#x2F;b&gt;");
    }

    #[tokio::test]
    async fn duplicate_soft_unique_key_returns_the_original_record() {
        let store = MemoryStore::new();
        let CreateOutcome::Created(first) =
            create_record(&store, ShelfForm::new("Fantasy")).await.unwrap()
        else {
            panic!("expected created");
        };

        let CreateOutcome::Existing(second) =
            create_record(&store, ShelfForm::new("Fantasy")).await.unwrap()
        else {
            panic!("expected existing");
        };

        assert_eq!(first, second);
        assert_eq!(store.count::<Shelf>().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_fields_mutate_nothing() {
        let store = MemoryStore::new();
        let outcome = create_record(&store, ShelfForm::new("   ")).await.unwrap();

        let CreateOutcome::Invalid { errors, .. } = outcome else {
            panic!("expected invalid");
        };
        assert_eq!(errors[0].field, "label");
        assert_eq!(errors[0].message, "Label required");
        assert_eq!(store.count::<Shelf>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn forms_without_a_unique_key_may_duplicate() {
        let store = MemoryStore::new();
        let shelf = store.save(Shelf::new("east wing")).await.unwrap();
        for _ in 0..2 {
            let outcome =
                create_record(&store, VolumeForm::new("Dune", &shelf.id.to_string()))
                    .await
                    .unwrap();
            assert!(matches!(outcome, CreateOutcome::Created(_)));
        }
        let copies: Vec<Volume> = store
            .find_many(Filter::by("shelf", shelf.id))
            .await
            .unwrap();
        assert_eq!(copies.len(), 2);
        assert!(copies.iter().all(|v| v.shelf == shelf.id));
        assert_eq!(Volume::COLLECTION, "volumes");
    }
}
