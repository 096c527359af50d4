//! Repository contract for record persistence
//!
//! Handlers never open files themselves: they receive a [`Ledger`] holding one
//! repository per entity collection.

use std::sync::MutexGuard;

use haulbook_types::{Record, StoreError};

use crate::model::{Cargo, Client, Delivery, Driver, Order, Route, Transport};

/// Guard held for the duration of a read-modify-write on one collection
pub type CollectionLock<'a> = MutexGuard<'a, ()>;

/// Load/save access to one homogeneous collection.
///
/// Shared across threads through `&Ledger`; the lock serializes
/// read-modify-write within one process.
pub trait RecordRepository<T: Record>: Send + Sync {
    /// Load the whole collection. A missing backing slot yields an empty list.
    fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Overwrite the whole collection
    fn save(&self, records: &[T]) -> Result<(), StoreError>;

    /// Acquire the collection lock. Not reentrant.
    fn lock(&self) -> Result<CollectionLock<'_>, StoreError>;
}

/// Lock, load, mutate and save one collection.
///
/// Nothing is written when `f` fails.
pub fn update<T, R, F>(repo: &dyn RecordRepository<T>, f: F) -> haulbook_types::Result<R>
where
    T: Record,
    F: FnOnce(&mut Vec<T>) -> haulbook_types::Result<R>,
{
    let _guard = repo.lock()?;
    let mut records = repo.load()?;
    let out = f(&mut records)?;
    repo.save(&records)?;
    Ok(out)
}

/// One repository per entity collection
pub struct Ledger {
    pub clients: Box<dyn RecordRepository<Client>>,
    pub cargos: Box<dyn RecordRepository<Cargo>>,
    pub transports: Box<dyn RecordRepository<Transport>>,
    pub drivers: Box<dyn RecordRepository<Driver>>,
    pub orders: Box<dyn RecordRepository<Order>>,
    pub routes: Box<dyn RecordRepository<Route>>,
    pub deliveries: Box<dyn RecordRepository<Delivery>>,
}
