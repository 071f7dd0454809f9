//! Record identity and the trait stored entities implement.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::{ContextV7, Timestamp, Uuid};

static CLOCK: OnceLock<Mutex<ContextV7>> = OnceLock::new();

/// Identifier assigned by the store when a record is first saved.
///
/// Ids are UUID v7 drawn from a shared monotonic clock context, so iterating
/// a collection in id order matches creation order. An id never changes once
/// assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh time-ordered id.
    pub fn generate() -> Self {
        let clock = CLOCK.get_or_init(|| Mutex::new(ContextV7::new()));
        Self(Uuid::new_v7(Timestamp::now(clock)))
    }

    /// Placeholder id for records that have not been saved yet.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<RecordId> for serde_json::Value {
    fn from(id: RecordId) -> Self {
        serde_json::Value::String(id.to_string())
    }
}

/// A stored entity: one document in a named collection.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection this record type lives in.
    const COLLECTION: &'static str;

    fn id(&self) -> RecordId;

    /// Called by the store when assigning or pinning an id; application code
    /// never changes an id after creation.
    fn set_id(&mut self, id: RecordId);
}
