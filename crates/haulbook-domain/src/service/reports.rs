//! Query and report computations over fully loaded collections
//!
//! Every function is a linear scan or a nested-loop join; callers pass `now`
//! explicitly so results are reproducible.

use chrono::{DateTime, Local, Months, NaiveDate};
use haulbook_types::RecordId;
use serde::Serialize;
use tracing::warn;

use crate::model::{Client, Delivery, DeliveryStatus, Driver, Order, OrderStatus, Transport};

/// Order created inside the reporting window, with its client resolved
#[derive(Debug, Clone, Serialize)]
pub struct RecentOrder {
    pub order: Order,
    /// `None` when the client id does not resolve
    pub client_name: Option<String>,
}

pub fn orders_since(orders: &[Order], clients: &[Client], since: DateTime<Local>) -> Vec<RecentOrder> {
    orders
        .iter()
        .filter(|o| o.created_at >= since)
        .map(|o| RecentOrder {
            order: o.clone(),
            client_name: clients
                .iter()
                .find(|c| c.id == o.client_id)
                .map(|c| c.name.clone()),
        })
        .collect()
}

/// Orders created within one calendar month before `now`
pub fn orders_last_month(orders: &[Order], clients: &[Client], now: DateTime<Local>) -> Vec<RecentOrder> {
    let since = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    orders_since(orders, clients, since)
}

/// Where a piece of cargo currently stands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CargoDeliveryStatus {
    /// No order references the cargo
    NoOrder,
    /// Ordered, but no delivery record exists yet
    AwaitingDelivery {
        order_id: RecordId,
        order_status: OrderStatus,
    },
    Delivery {
        order_id: RecordId,
        delivery_id: RecordId,
        status: DeliveryStatus,
        actual_arrival: Option<DateTime<Local>>,
    },
}

/// Resolve the first order carrying the cargo, then that order's first delivery
pub fn cargo_delivery_status(
    cargo_id: RecordId,
    orders: &[Order],
    deliveries: &[Delivery],
) -> CargoDeliveryStatus {
    let Some(order) = orders.iter().find(|o| o.cargo_id == cargo_id) else {
        return CargoDeliveryStatus::NoOrder;
    };

    match deliveries.iter().find(|d| d.order_id == order.id) {
        Some(delivery) => CargoDeliveryStatus::Delivery {
            order_id: order.id,
            delivery_id: delivery.id,
            status: delivery.status,
            actual_arrival: delivery.actual_arrival,
        },
        None => CargoDeliveryStatus::AwaitingDelivery {
            order_id: order.id,
            order_status: order.status,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLoad {
    pub transport_id: RecordId,
    pub registration: String,
    pub order_count: usize,
}

/// Vehicles used by orders created on `date`, in first-seen order
pub fn transport_load_on(date: NaiveDate, orders: &[Order], transports: &[Transport]) -> Vec<TransportLoad> {
    let day_orders: Vec<&Order> = orders
        .iter()
        .filter(|o| o.created_at.date_naive() == date)
        .collect();

    let ids = distinct_in_order(day_orders.iter().filter_map(|o| o.transport_id));

    ids.into_iter()
        .filter_map(|id| {
            let Some(transport) = transports.iter().find(|t| t.id == id) else {
                warn!(transport_id = id, "order references unknown transport, skipped");
                return None;
            };
            Some(TransportLoad {
                transport_id: id,
                registration: transport.registration.clone(),
                order_count: day_orders.iter().filter(|o| o.transport_id == Some(id)).count(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverWorkload {
    pub driver_id: RecordId,
    pub full_name: String,
    pub active_orders: usize,
}

/// Drivers assigned to at least one active order, in first-seen order
pub fn active_drivers(orders: &[Order], drivers: &[Driver]) -> Vec<DriverWorkload> {
    let active: Vec<&Order> = orders
        .iter()
        .filter(|o| o.is_active() && o.driver_id.is_some())
        .collect();

    let ids = distinct_in_order(active.iter().filter_map(|o| o.driver_id));

    ids.into_iter()
        .filter_map(|id| {
            let Some(driver) = drivers.iter().find(|d| d.id == id) else {
                warn!(driver_id = id, "order references unknown driver, skipped");
                return None;
            };
            Some(DriverWorkload {
                driver_id: id,
                full_name: driver.full_name.clone(),
                active_orders: active.iter().filter(|o| o.driver_id == Some(id)).count(),
            })
        })
        .collect()
}

/// Average time from order creation to recorded arrival
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryTimeSummary {
    pub completed: usize,
    pub average_hours: f64,
}

impl DeliveryTimeSummary {
    /// Split the average into whole days, hours and minutes
    pub fn breakdown(&self) -> (i64, i64, i64) {
        let total_minutes = (self.average_hours * 60.0).trunc() as i64;
        let days = total_minutes / (24 * 60);
        let hours = (total_minutes % (24 * 60)) / 60;
        let minutes = total_minutes % 60;
        (days, hours, minutes)
    }
}

/// Returns `None` when no delivery with a recorded arrival joins to an order.
pub fn average_delivery_time(orders: &[Order], deliveries: &[Delivery]) -> Option<DeliveryTimeSummary> {
    let elapsed_hours: Vec<f64> = deliveries
        .iter()
        .filter_map(|d| d.actual_arrival.map(|arrival| (d, arrival)))
        .filter_map(|(d, arrival)| {
            let order = orders.iter().find(|o| o.id == d.order_id)?;
            let elapsed = arrival - order.created_at;
            Some(elapsed.num_seconds() as f64 / 3600.0)
        })
        .collect();

    if elapsed_hours.is_empty() {
        return None;
    }

    let average_hours = elapsed_hours.iter().sum::<f64>() / elapsed_hours.len() as f64;
    Some(DeliveryTimeSummary {
        completed: elapsed_hours.len(),
        average_hours,
    })
}

fn distinct_in_order(ids: impl Iterator<Item = RecordId>) -> Vec<RecordId> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
