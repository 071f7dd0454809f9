//! Validated update: full-record replacement gated on validation.

use libris_store::{RecordId, RecordStore, StoreError};

use crate::forms::{field_errors, FieldError, FormFields};

/// Result of a validated update.
pub enum UpdateOutcome<F: FormFields> {
    /// The record was replaced; callers redirect to its canonical view.
    Updated(F::Entity),
    /// The target vanished between form load and submission.
    Missing,
    /// Validation failed; no store request was issued. `fields` echoes the
    /// sanitized submission for the re-rendered form.
    Invalid { errors: Vec<FieldError>, fields: F },
}

/// Sanitize and validate `fields`, then replace the record under `id`.
///
/// Validation failure short-circuits before any store access. The write is
/// addressed to `F::Entity`'s own collection through the form's associated
/// type, so an update can never land in an unrelated collection, and the
/// stored id survives whatever the payload carries.
pub async fn update_record<S, F>(
    store: &S,
    id: RecordId,
    fields: F,
) -> Result<UpdateOutcome<F>, StoreError>
where
    S: RecordStore + ?Sized,
    F: FormFields,
{
    let fields = fields.sanitized();
    if let Err(violations) = fields.validate() {
        return Ok(UpdateOutcome::Invalid {
            errors: field_errors(&violations),
            fields,
        });
    }

    match store.update_by_id::<F::Entity>(id, fields.into_entity()).await? {
        Some(updated) => Ok(UpdateOutcome::Updated(updated)),
        None => Ok(UpdateOutcome::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Shelf, ShelfForm, Volume, VolumeForm};
    use libris_store::{MemoryStore, Record};

    #[tokio::test]
    async fn valid_update_replaces_fields_and_keeps_the_id() {
        let store = MemoryStore::new();
        let shelf = store.save(Shelf::new("east wing")).await.unwrap();

        let outcome = update_record(&store, shelf.id, ShelfForm::new("west wing"))
            .await
            .unwrap();

        let UpdateOutcome::Updated(updated) = outcome else {
            panic!("expected updated");
        };
        assert_eq!(updated.id, shelf.id);
        assert_eq!(updated.label, "west wing");
        let stored: Shelf = store.find_by_id(shelf.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn invalid_update_short_circuits_before_any_mutation() {
        let store = MemoryStore::new();
        let shelf = store.save(Shelf::new("east wing")).await.unwrap();

        let outcome = update_record(&store, shelf.id, ShelfForm::new(""))
            .await
            .unwrap();

        let UpdateOutcome::Invalid { errors, .. } = outcome else {
            panic!("expected invalid");
        };
        assert_eq!(errors[0].field, "label");
        let stored: Shelf = store.find_by_id(shelf.id).await.unwrap().unwrap();
        assert_eq!(stored.label, "east wing");
    }

    #[tokio::test]
    async fn update_of_missing_record_reports_missing() {
        let store = MemoryStore::new();
        let outcome = update_record(&store, RecordId::generate(), ShelfForm::new("anything"))
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Missing));
        assert_eq!(store.count::<Shelf>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_is_routed_to_the_forms_own_collection() {
        let store = MemoryStore::new();
        let shelf = store.save(Shelf::new("east wing")).await.unwrap();
        let volume = store.save(Volume::new("Dune", shelf.id)).await.unwrap();

        // Updating a volume must touch the volumes collection, never the
        // shelves collection that shares the workflow code path.
        let outcome = update_record(
            &store,
            volume.id,
            VolumeForm::new("Dune, revised", &shelf.id.to_string()),
        )
        .await
        .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Updated(_)));
        let stored: Volume = store.find_by_id(volume.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Dune, revised");
        let untouched: Shelf = store.find_by_id(shelf.id).await.unwrap().unwrap();
        assert_eq!(untouched, shelf);
        assert_eq!(Shelf::COLLECTION, "shelves");
    }
}
