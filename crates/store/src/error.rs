//! Store failure taxonomy.

use thiserror::Error;

/// Persistence failure. These are fatal to the request that triggered them;
/// callers propagate without retrying.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode record for collection '{collection}'")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode record from collection '{collection}'")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
