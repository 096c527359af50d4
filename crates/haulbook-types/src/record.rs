//! The record contract shared by every persisted entity

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Identifier of a record within its own collection.
///
/// Ids are only unique per collection: client 1 and order 1 can coexist.
pub type RecordId = u32;

/// A homogeneous, persisted record type.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Name of the backing collection (also the file stem on disk)
    const COLLECTION: &'static str;

    fn id(&self) -> RecordId;
}

/// Next free id for a collection: max existing id + 1, or 1 when empty.
pub fn next_id<T: Record>(records: &[T]) -> RecordId {
    records.iter().map(|r| r.id()).max().map_or(1, |max| max + 1)
}
