use std::sync::RwLock;

use innkeeper_core::Entity;

use super::{IdFn, RecordStore, StoreError, StoreResult, upsert};

/// In-memory record store for tests/dry runs. Nothing is persisted; `refresh` is a no-op.
#[derive(Debug)]
pub struct InMemoryRecordStore<K, V> {
    id_of: IdFn<K, V>,
    records: RwLock<Vec<V>>,
}

impl<K, V> InMemoryRecordStore<K, V> {
    pub fn new(id_of: IdFn<K, V>) -> Self {
        Self {
            id_of,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Seed the collection. Later records with a duplicate id replace earlier ones.
    pub fn with_records(id_of: IdFn<K, V>, seed: impl IntoIterator<Item = V>) -> Self
    where
        K: PartialEq,
        V: Clone,
    {
        let mut records = Vec::new();
        for record in seed {
            upsert(&mut records, id_of, &record);
        }
        Self {
            id_of,
            records: RwLock::new(records),
        }
    }
}

impl<K, V> InMemoryRecordStore<K, V>
where
    V: Entity<Id = K>,
{
    pub fn for_entity() -> Self {
        Self::new(<V as Entity>::id)
    }
}

impl<K, V> RecordStore<K, V> for InMemoryRecordStore<K, V>
where
    K: PartialEq + Send + Sync,
    V: Clone + Send + Sync,
{
    fn find_all(&self) -> StoreResult<Vec<V>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn find_by_id(&self, id: &K) -> StoreResult<Option<V>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().find(|r| (self.id_of)(r) == id).cloned())
    }

    fn save(&self, record: V) -> StoreResult<V> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        upsert(&mut records, self.id_of, &record);
        Ok(record)
    }

    fn delete(&self, id: &K) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        match records.iter().position(|r| (self.id_of)(r) == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn exists_by_id(&self, id: &K) -> StoreResult<bool> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().any(|r| (self.id_of)(r) == id))
    }

    fn count(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    fn refresh(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeeper_core::GuestId;
    use innkeeper_guests::Guest;

    fn guest(id: &str, name: &str) -> Guest {
        Guest::new(id.parse().unwrap(), name, "555-0100", "guest@example.com").unwrap()
    }

    #[test]
    fn seeded_duplicates_collapse_to_last() {
        let store: InMemoryRecordStore<GuestId, Guest> = InMemoryRecordStore::with_records(
            <Guest as Entity>::id,
            [guest("G-1", "Ann"), guest("G-2", "Bob"), guest("G-1", "Annie")],
        );
        assert_eq!(store.count().unwrap(), 2);
        let first = store.find_all().unwrap().remove(0);
        assert_eq!(first.name(), "Annie");
    }

    #[test]
    fn find_matching_filters_snapshot() {
        let store: InMemoryRecordStore<GuestId, Guest> = InMemoryRecordStore::for_entity();
        store.save(guest("G-1", "Ann Lee")).unwrap();
        store.save(guest("G-2", "Bob Stone")).unwrap();

        let hits = store.find_matching(&|g: &Guest| g.name_contains("lee")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), &"G-1".parse::<GuestId>().unwrap());
    }

    #[test]
    fn delete_unknown_is_a_no_op() {
        let store: InMemoryRecordStore<GuestId, Guest> = InMemoryRecordStore::for_entity();
        store.save(guest("G-1", "Ann")).unwrap();
        assert!(!store.delete(&"G-9".parse().unwrap()).unwrap());
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.delete(&"G-1".parse().unwrap()).unwrap());
        assert!(!store.exists_by_id(&"G-1".parse().unwrap()).unwrap());
    }
}
