//! In-memory document store backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::record::{Record, RecordId};
use crate::RecordStore;

type Collection = BTreeMap<RecordId, serde_json::Value>;

/// Record store holding every collection as JSON documents in process
/// memory. Each operation takes the lock once; nothing is held across
/// await points, so there are no cross-record transactions.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode<R: Record>(record: &R) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(record).map_err(|source| StoreError::Encode {
            collection: R::COLLECTION,
            source,
        })
    }

    fn decode<R: Record>(document: serde_json::Value) -> Result<R, StoreError> {
        serde_json::from_value(document).map_err(|source| StoreError::Decode {
            collection: R::COLLECTION,
            source,
        })
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save<R: Record>(&self, mut record: R) -> Result<R, StoreError> {
        record.set_id(RecordId::generate());
        let document = Self::encode(&record)?;
        let mut collections = self.collections.write().await;
        collections
            .entry(R::COLLECTION)
            .or_default()
            .insert(record.id(), document);
        tracing::debug!(collection = R::COLLECTION, id = %record.id(), "record saved");
        Ok(record)
    }

    async fn find_by_id<R: Record>(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(R::COLLECTION)
            .and_then(|collection| collection.get(&id).cloned())
            .map(Self::decode)
            .transpose()
    }

    async fn find_many<R: Record>(&self, filter: Filter) -> Result<Vec<R>, StoreError> {
        let collections = self.collections.read().await;
        let Some(collection) = collections.get(R::COLLECTION) else {
            return Ok(Vec::new());
        };
        collection
            .values()
            .filter(|document| filter.matches(document))
            .cloned()
            .map(Self::decode)
            .collect()
    }

    async fn update_by_id<R: Record>(
        &self,
        id: RecordId,
        mut record: R,
    ) -> Result<Option<R>, StoreError> {
        // The stored id wins over whatever the payload carries.
        record.set_id(id);
        let document = Self::encode(&record)?;
        let mut collections = self.collections.write().await;
        let Some(existing) = collections
            .get_mut(R::COLLECTION)
            .and_then(|collection| collection.get_mut(&id))
        else {
            return Ok(None);
        };
        *existing = document;
        Ok(Some(record))
    }

    async fn delete_by_id<R: Record>(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(R::COLLECTION)
            .and_then(|collection| collection.remove(&id))
            .is_some();
        tracing::debug!(collection = R::COLLECTION, %id, removed, "record delete requested");
        Ok(removed)
    }

    async fn count<R: Record>(&self) -> Result<usize, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(R::COLLECTION)
            .map(Collection::len)
            .unwrap_or(0))
    }
}
