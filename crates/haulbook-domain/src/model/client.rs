use haulbook_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    /// Person or company name
    pub name: String,
    pub contact: String,
    /// Ids of orders placed by this client, in creation order
    #[serde(default)]
    pub order_history: Vec<RecordId>,
}

impl Client {
    pub fn new(id: RecordId, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            contact: contact.into(),
            order_history: Vec::new(),
        }
    }

    /// Append an order id to the history. Returns false if it was already recorded.
    pub fn record_order(&mut self, order_id: RecordId) -> bool {
        if self.order_history.contains(&order_id) {
            return false;
        }
        self.order_history.push(order_id);
        true
    }
}

impl Record for Client {
    const COLLECTION: &'static str = "clients";

    fn id(&self) -> RecordId {
        self.id
    }
}
