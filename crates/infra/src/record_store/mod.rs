//! ID-keyed record collections.
//!
//! Every entity type gets its own collection: one JSON array document on disk,
//! mirrored in memory. Reads are served from the mirror and return owned copies;
//! every mutation rewrites the whole document before returning.
//!
//! Collections are independent. Nothing here makes a change spanning two
//! collections atomic.

pub mod error;
pub mod in_memory;
pub mod json_file;

use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileStore;

/// Extracts the identifier of a record. Supplied explicitly per collection.
pub type IdFn<K, V> = fn(&V) -> &K;

/// Shared handle to a collection, as held by services.
pub type SharedStore<K, V> = Arc<dyn RecordStore<K, V>>;

/// ID-keyed collection of homogeneous records.
///
/// Implementations assume a single writer per process.
pub trait RecordStore<K, V>: Send + Sync {
    /// Snapshot of every record.
    fn find_all(&self) -> StoreResult<Vec<V>>;

    /// Record whose id equals `id`, if any.
    fn find_by_id(&self, id: &K) -> StoreResult<Option<V>>;

    /// Insert, or fully replace the record with the same id. Persists before returning.
    fn save(&self, record: V) -> StoreResult<V>;

    /// Remove the record with `id`. Returns whether anything was removed; the
    /// backing document is only rewritten when it was.
    fn delete(&self, id: &K) -> StoreResult<bool>;

    fn exists_by_id(&self, id: &K) -> StoreResult<bool>;

    fn count(&self) -> StoreResult<usize>;

    /// Drop the mirror and reload it from the backing document.
    fn refresh(&self) -> StoreResult<()>;

    /// Snapshot of the records matching `predicate`.
    fn find_matching(&self, predicate: &dyn Fn(&V) -> bool) -> StoreResult<Vec<V>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }
}

impl<K, V, S> RecordStore<K, V> for Arc<S>
where
    S: RecordStore<K, V> + ?Sized,
{
    fn find_all(&self) -> StoreResult<Vec<V>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: &K) -> StoreResult<Option<V>> {
        (**self).find_by_id(id)
    }

    fn save(&self, record: V) -> StoreResult<V> {
        (**self).save(record)
    }

    fn delete(&self, id: &K) -> StoreResult<bool> {
        (**self).delete(id)
    }

    fn exists_by_id(&self, id: &K) -> StoreResult<bool> {
        (**self).exists_by_id(id)
    }

    fn count(&self) -> StoreResult<usize> {
        (**self).count()
    }

    fn refresh(&self) -> StoreResult<()> {
        (**self).refresh()
    }

    fn find_matching(&self, predicate: &dyn Fn(&V) -> bool) -> StoreResult<Vec<V>> {
        (**self).find_matching(predicate)
    }
}

/// Replace the record with the same id in place, or append it.
pub(crate) fn upsert<K: PartialEq, V: Clone>(records: &mut Vec<V>, id_of: IdFn<K, V>, record: &V) {
    let id = id_of(record);
    match records.iter().position(|existing| id_of(existing) == id) {
        Some(index) => records[index] = record.clone(),
        None => records.push(record.clone()),
    }
}
