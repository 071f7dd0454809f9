//! Referential delete: remove a record only when nothing references it.

use libris_store::{Filter, Record, RecordId, RecordStore, StoreError};

/// Result of a guarded delete.
pub enum DeleteOutcome<T, D> {
    /// The record was removed.
    Deleted,
    /// The record did not exist; deletion is idempotent, so this is not an
    /// error and callers redirect to the listing as if it had succeeded.
    AlreadyGone,
    /// Dependents still reference the target; nothing was mutated. The
    /// target and the full dependent set are returned for the confirmation
    /// page.
    Blocked { target: T, dependents: Vec<D> },
}

/// Delete `T` by id unless any `D` matching `dependent_filter` still
/// references it. The store has no foreign-key constraints, so this guard is
/// the only thing standing between a delete and dangling references.
///
/// The target and its dependents are fetched concurrently and joined; the
/// first failing lookup cancels the operation and the other result is
/// discarded. The check and the removal are two separate store requests; a
/// dependent created in between slips through, which is an accepted race.
pub async fn delete_record<S, T, D>(
    store: &S,
    id: RecordId,
    dependent_filter: Filter,
) -> Result<DeleteOutcome<T, D>, StoreError>
where
    S: RecordStore + ?Sized,
    T: Record,
    D: Record,
{
    let (target, dependents) = tokio::try_join!(
        store.find_by_id::<T>(id),
        store.find_many::<D>(dependent_filter),
    )?;

    let Some(target) = target else {
        return Ok(DeleteOutcome::AlreadyGone);
    };

    if !dependents.is_empty() {
        tracing::debug!(
            collection = T::COLLECTION,
            %id,
            dependents = dependents.len(),
            "delete blocked by dependents"
        );
        return Ok(DeleteOutcome::Blocked { target, dependents });
    }

    // The record may vanish between the check and the removal; either way the
    // store ends up without it, so a false result still counts as deleted.
    store.delete_by_id::<T>(id).await?;
    Ok(DeleteOutcome::Deleted)
}
