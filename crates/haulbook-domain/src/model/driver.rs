use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: RecordId,
    pub full_name: String,
    pub contact: String,
    pub experience_years: u32,
    /// Transport normally driven. Not checked against the transport collection.
    #[serde(default)]
    pub assigned_transport_id: Option<RecordId>,
}

impl Record for Driver {
    const COLLECTION: &'static str = "drivers";

    fn id(&self) -> RecordId {
        self.id
    }
}
