use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RecordId,
    pub order_id: RecordId,
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    /// Estimated travel time in whole minutes
    pub estimated_minutes: u32,
}

impl Route {
    /// Estimated duration formatted as `H:MM`
    pub fn estimated_duration(&self) -> String {
        format!("{}:{:02}", self.estimated_minutes / 60, self.estimated_minutes % 60)
    }
}

impl Record for Route {
    const COLLECTION: &'static str = "routes";

    fn id(&self) -> RecordId {
        self.id
    }
}
