use chrono::{DateTime, Local};
use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

use super::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    pub client_id: RecordId,
    pub cargo_id: RecordId,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub transport_id: Option<RecordId>,
    #[serde(default)]
    pub driver_id: Option<RecordId>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> RecordId {
        self.id
    }
}
