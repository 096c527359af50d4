//! Persistent record store for haulbook collections

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use std::path::Path;

use haulbook_domain::repository::Ledger;
use haulbook_types::StoreError;

/// Open a ledger backed by one JSON file per collection inside `store_dir`
pub fn open_json_ledger(store_dir: &Path) -> Result<Ledger, StoreError> {
    Ok(Ledger {
        clients: Box::new(JsonStore::open(store_dir)?),
        cargos: Box::new(JsonStore::open(store_dir)?),
        transports: Box::new(JsonStore::open(store_dir)?),
        drivers: Box::new(JsonStore::open(store_dir)?),
        orders: Box::new(JsonStore::open(store_dir)?),
        routes: Box::new(JsonStore::open(store_dir)?),
        deliveries: Box::new(JsonStore::open(store_dir)?),
    })
}

/// Ledger that keeps everything in memory, for tests and dry runs
pub fn memory_ledger() -> Ledger {
    Ledger {
        clients: Box::new(MemoryStore::new()),
        cargos: Box::new(MemoryStore::new()),
        transports: Box::new(MemoryStore::new()),
        drivers: Box::new(MemoryStore::new()),
        orders: Box::new(MemoryStore::new()),
        routes: Box::new(MemoryStore::new()),
        deliveries: Box::new(MemoryStore::new()),
    }
}
