use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    pub id: RecordId,
    pub name: String,
    /// Free-form category ("electronics", "oversized", ...)
    pub kind: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
    /// Handling requirements (refrigeration, fragile, ...)
    #[serde(default)]
    pub requirements: String,
}

impl Record for Cargo {
    const COLLECTION: &'static str = "cargos";

    fn id(&self) -> RecordId {
        self.id
    }
}
