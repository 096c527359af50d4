use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub id: RecordId,
    /// Vehicle type (truck, semi-trailer, ...)
    pub kind: String,
    pub capacity_kg: f64,
    /// Registration plate. Not checked for uniqueness.
    pub registration: String,
    #[serde(default)]
    pub condition: String,
}

impl Record for Transport {
    const COLLECTION: &'static str = "transports";

    fn id(&self) -> RecordId {
        self.id
    }
}
