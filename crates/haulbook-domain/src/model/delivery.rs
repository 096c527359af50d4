use chrono::{DateTime, Local};
use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

use super::DeliveryStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: RecordId,
    pub order_id: RecordId,
    #[serde(default)]
    pub actual_arrival: Option<DateTime<Local>>,
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl Record for Delivery {
    const COLLECTION: &'static str = "deliveries";

    fn id(&self) -> RecordId {
        self.id
    }
}
