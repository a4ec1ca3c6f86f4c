//! JSON-document-backed record store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

use innkeeper_core::Entity;

use super::{IdFn, RecordStore, StoreError, StoreResult, upsert};

/// One collection persisted as a pretty-printed JSON array.
///
/// A missing or blank document loads as an empty collection. Writes go to a
/// sibling `.tmp` file which is then renamed over the document, so a crash
/// mid-write never leaves a truncated document behind.
#[derive(Debug)]
pub struct JsonFileStore<K, V> {
    path: PathBuf,
    id_of: IdFn<K, V>,
    records: RwLock<Vec<V>>,
}

impl<K, V> JsonFileStore<K, V>
where
    K: PartialEq,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Open (and load) the collection stored at `path`.
    pub fn open(path: impl Into<PathBuf>, id_of: IdFn<K, V>) -> StoreResult<Self> {
        let path = path.into();
        let records = read_document(&path)?;
        Ok(Self {
            path,
            id_of,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing document from the mirror.
    pub fn flush(&self) -> StoreResult<()> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        write_document(&self.path, &records)
    }
}

impl<K, V> JsonFileStore<K, V>
where
    K: PartialEq,
    V: Entity<Id = K> + Clone + Serialize + DeserializeOwned,
{
    /// Open a collection keyed by [`Entity::id`].
    pub fn for_entity(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(path, <V as Entity>::id)
    }
}

impl<K, V> RecordStore<K, V> for JsonFileStore<K, V>
where
    K: PartialEq + Send + Sync,
    V: Clone + Serialize + DeserializeOwned + Send + Sync,
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

        // Persist the candidate state first; the mirror only moves once the disk has.
        let mut next = records.clone();
        upsert(&mut next, self.id_of, &record);
        write_document(&self.path, &next)?;
        *records = next;

        Ok(record)
    }

    fn delete(&self, id: &K) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;

        let Some(index) = records.iter().position(|r| (self.id_of)(r) == id) else {
            return Ok(false);
        };

        let mut next = records.clone();
        next.remove(index);
        write_document(&self.path, &next)?;
        *records = next;

        Ok(true)
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
        let reloaded = read_document(&self.path)?;
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        *records = reloaded;
        Ok(())
    }
}

fn read_document<V: DeserializeOwned>(path: &Path) -> StoreResult<Vec<V>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no document at {}; starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(StoreError::io(path, err)),
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<V> =
        serde_json::from_str(&raw).map_err(|e| StoreError::serialization(path, e))?;
    tracing::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn write_document<V: Serialize>(path: &Path, records: &[V]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let json = serde_json::to_vec_pretty(records).map_err(|e| StoreError::serialization(path, e))?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    tracing::debug!("persisted {} records to {}", records.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
