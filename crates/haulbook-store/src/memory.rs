//! In-memory collection store

use std::sync::Mutex;

use haulbook_domain::repository::{CollectionLock, RecordRepository};
use haulbook_types::{Record, StoreError};

pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
    lock: Mutex<()>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            lock: Mutex::new(()),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordRepository<T> for MemoryStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        Ok(records.clone())
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| StoreError::Poisoned(T::COLLECTION))?;
        *stored = records.to_vec();
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
    use haulbook_domain::model::Client;
    use haulbook_domain::repository::update;

    #[test]
    fn test_update_persists_on_success() {
        let store = MemoryStore::with_records(vec![Client::new(1, "A", "a")]);
        let id = update::<Client, _, _>(&store, |clients| {
            let id = haulbook_types::next_id(clients);
            clients.push(Client::new(id, "B", "b"));
            Ok(id)
        })
        .unwrap();

        assert_eq!(id, 2);
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
