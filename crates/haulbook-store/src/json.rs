//! File-backed collection store

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use haulbook_domain::repository::{CollectionLock, RecordRepository};
use haulbook_types::{Record, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores a whole collection as a pretty-printed JSON array at
/// `<store_dir>/<collection>.json`.
///
/// Saves go through a temporary file in the same directory that is renamed
/// over the target, so a reader sees either the old or the new collection.
/// Separate processes writing the same directory still race; the last rename wins.
pub struct JsonStore<T> {
    store_path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> JsonStore<T> {
    /// Create the store directory if needed. The collection file itself is
    /// only created on the first save.
    pub fn open(store_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(store_dir).map_err(|source| StoreError::Io {
            path: store_dir.to_path_buf(),
            source,
        })?;
        let store_path = store_dir.join(format!("{}.json", T::COLLECTION));

        Ok(Self {
            store_path,
            lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.store_path.clone(),
            source,
        }
    }
}

impl<T: Record> RecordRepository<T> for JsonStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let mut file = match File::open(&self.store_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection = T::COLLECTION, "no backing file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| self.io_error(e))?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<T> =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.store_path.clone(),
                source,
            })?;
        debug!(collection = T::COLLECTION, count = records.len(), "loaded");
        Ok(records)
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let dir = self
            .store_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                StoreError::Serialize {
                    collection: T::COLLECTION,
                    source,
                }
            })?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }

        tmp.persist(&self.store_path)
            .map_err(|e| self.io_error(e.error))?;
        debug!(collection = T::COLLECTION, count = records.len(), "saved");
        Ok(())
    }

    fn lock(&self) -> Result<CollectionLock<'_>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Poisoned(T::COLLECTION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulbook_domain::model::{Client, Delivery, DeliveryStatus};
    use haulbook_domain::repository::update;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Client> = JsonStore::open(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Client> = JsonStore::open(dir.path()).unwrap();
        let clients = vec![
            Client::new(2, "Ivan Ivanov", "ivan@mail.test"),
            Client::new(1, "Romashka LLC", "info@romashka.test"),
        ];
        store.save(&clients).unwrap();

        assert_eq!(store.path(), dir.path().join("clients.json"));
        assert_eq!(store.load().unwrap(), clients);
    }

    #[test]
    fn test_save_overwrites_whole_collection() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Client> = JsonStore::open(dir.path()).unwrap();
        store
            .save(&[Client::new(1, "A", "a"), Client::new(2, "B", "b")])
            .unwrap();
        store.save(&[Client::new(3, "C", "c")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }

    #[test]
    fn test_file_is_human_readable_json_array() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Client> = JsonStore::open(dir.path()).unwrap();
        store.save(&[Client::new(1, "A", "a")]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("\n"));
        assert!(text.contains("\"order_history\""));
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("clients.json"), "  \n").unwrap();
        let store: JsonStore<Client> = JsonStore::open(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error_not_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("deliveries.json"), "{ not json").unwrap();
        let store: JsonStore<Delivery> = JsonStore::open(dir.path()).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("deliveries.json"));
    }

    #[test]
    fn test_update_skips_save_on_error() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Delivery> = JsonStore::open(dir.path()).unwrap();
        store
            .save(&[Delivery {
                id: 1,
                order_id: 1,
                actual_arrival: None,
                status: DeliveryStatus::Pending,
            }])
            .unwrap();

        let result: haulbook_types::Result<()> = update::<Delivery, _, _>(&store, |records| {
            records.clear();
            Err(haulbook_types::DomainError::UnknownOrder(9).into())
        });
        assert!(result.is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let _store: JsonStore<Client> = JsonStore::open(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
