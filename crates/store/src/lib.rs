//! Record store abstraction for LIBRIS.
//!
//! Entities are documents in named collections, addressed by store-assigned
//! [`RecordId`]s and queried with equality [`Filter`]s. The store offers no
//! foreign-key constraints and no cross-record transactions; referential
//! integrity lives in the workflow layer.

use async_trait::async_trait;

pub mod error;
pub mod filter;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use record::{Record, RecordId};

/// Persistence operations the catalog consumes. Every call is a single
/// atomic request; failures are fatal to the request and never retried here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record under a freshly assigned id and return it as stored.
    async fn save<R: Record>(&self, record: R) -> Result<R, StoreError>;

    async fn find_by_id<R: Record>(&self, id: RecordId) -> Result<Option<R>, StoreError>;

    async fn find_many<R: Record>(&self, filter: Filter) -> Result<Vec<R>, StoreError>;

    /// Full-record replacement. The stored id is immutable; `None` means the
    /// target no longer exists.
    async fn update_by_id<R: Record>(
        &self,
        id: RecordId,
        record: R,
    ) -> Result<Option<R>, StoreError>;

    /// Remove by id; `false` when the record was already gone.
    async fn delete_by_id<R: Record>(&self, id: RecordId) -> Result<bool, StoreError>;

    async fn count<R: Record>(&self) -> Result<usize, StoreError>;
}
