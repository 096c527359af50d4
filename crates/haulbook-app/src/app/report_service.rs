//! Report use cases: load the needed collections, then run the domain reports

use chrono::{DateTime, Local};
use haulbook_domain::repository::Ledger;
use haulbook_domain::service::{
    self, CargoDeliveryStatus, DeliveryTimeSummary, DriverWorkload, RecentOrder, TransportLoad,
};
use haulbook_types::{DomainError, RecordId, Result};

/// Orders created during the last calendar month
pub fn recent_orders(ledger: &Ledger, now: DateTime<Local>) -> Result<Vec<RecentOrder>> {
    let orders = ledger.orders.load()?;
    let clients = ledger.clients.load()?;
    Ok(service::orders_last_month(&orders, &clients, now))
}

/// Delivery status of one piece of cargo. The cargo id must exist.
pub fn cargo_status(ledger: &Ledger, cargo_id: RecordId) -> Result<CargoDeliveryStatus> {
    let cargos = ledger.cargos.load()?;
    if cargos.is_empty() {
        return Err(DomainError::NoCargo.into());
    }
    if !cargos.iter().any(|c| c.id == cargo_id) {
        return Err(DomainError::UnknownCargo(cargo_id).into());
    }

    let orders = ledger.orders.load()?;
    let deliveries = ledger.deliveries.load()?;
    Ok(service::cargo_delivery_status(cargo_id, &orders, &deliveries))
}

pub fn transport_load_today(ledger: &Ledger, now: DateTime<Local>) -> Result<Vec<TransportLoad>> {
    let orders = ledger.orders.load()?;
    let transports = ledger.transports.load()?;
    Ok(service::transport_load_on(now.date_naive(), &orders, &transports))
}

pub fn drivers_with_active_orders(ledger: &Ledger) -> Result<Vec<DriverWorkload>> {
    let orders = ledger.orders.load()?;
    let drivers = ledger.drivers.load()?;
    Ok(service::active_drivers(&orders, &drivers))
}

/// `None` when no delivery has a recorded arrival
pub fn average_delivery_time(ledger: &Ledger) -> Result<Option<DeliveryTimeSummary>> {
    let orders = ledger.orders.load()?;
    let deliveries = ledger.deliveries.load()?;
    Ok(service::average_delivery_time(&orders, &deliveries))
}
