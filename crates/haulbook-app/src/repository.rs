//! Repository adapters for persistence layer

use std::path::Path;

use haulbook_domain::repository::Ledger;
use haulbook_types::Result;

use crate::config::Config;

/// Open the JSON-file ledger in the configured data directory
pub fn open_ledger(config: &Config) -> Result<Ledger> {
    let data_dir = config.data_dir()?;
    open_ledger_at(&data_dir)
}

/// Open the JSON-file ledger at a custom directory
pub fn open_ledger_at(data_dir: &Path) -> Result<Ledger> {
    haulbook_store::open_json_ledger(data_dir).map_err(Into::into)
}
