//! Creating records and moving them through their statuses

use chrono::{DateTime, Local};
use haulbook_domain::model::{
    Cargo, Client, Delivery, DeliveryStatus, Driver, Order, OrderStatus, Route, Transport,
};
use haulbook_domain::repository::{update, Ledger};
use haulbook_types::{next_id, DomainError, RecordId, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone)]
pub struct NewCargo {
    pub name: String,
    pub kind: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub requirements: String,
}

#[derive(Debug, Clone)]
pub struct NewTransport {
    pub kind: String,
    pub capacity_kg: f64,
    pub registration: String,
    pub condition: String,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub full_name: String,
    pub contact: String,
    pub experience_years: u32,
    pub assigned_transport_id: Option<RecordId>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: RecordId,
    pub cargo_id: RecordId,
    pub transport_id: Option<RecordId>,
    pub driver_id: Option<RecordId>,
}

#[derive(Debug, Clone)]
pub struct NewRoute {
    pub order_id: RecordId,
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub estimated_minutes: u32,
}

pub fn add_client(ledger: &Ledger, new: NewClient) -> Result<Client> {
    let client = update(ledger.clients.as_ref(), |clients| {
        let client = Client::new(next_id(clients), new.name, new.contact);
        clients.push(client.clone());
        Ok(client)
    })?;
    info!(id = client.id, "client added");
    Ok(client)
}

pub fn add_cargo(ledger: &Ledger, new: NewCargo) -> Result<Cargo> {
    let cargo = update(ledger.cargos.as_ref(), |cargos| {
        let cargo = Cargo {
            id: next_id(cargos),
            name: new.name,
            kind: new.kind,
            weight_kg: new.weight_kg,
            volume_m3: new.volume_m3,
            requirements: new.requirements,
        };
        cargos.push(cargo.clone());
        Ok(cargo)
    })?;
    info!(id = cargo.id, "cargo added");
    Ok(cargo)
}

pub fn add_transport(ledger: &Ledger, new: NewTransport) -> Result<Transport> {
    let transport = update(ledger.transports.as_ref(), |transports| {
        let transport = Transport {
            id: next_id(transports),
            kind: new.kind,
            capacity_kg: new.capacity_kg,
            registration: new.registration,
            condition: new.condition,
        };
        transports.push(transport.clone());
        Ok(transport)
    })?;
    info!(id = transport.id, "transport added");
    Ok(transport)
}

/// The assigned transport id is stored as given, without an existence check.
pub fn add_driver(ledger: &Ledger, new: NewDriver) -> Result<Driver> {
    let driver = update(ledger.drivers.as_ref(), |drivers| {
        let driver = Driver {
            id: next_id(drivers),
            full_name: new.full_name,
            contact: new.contact,
            experience_years: new.experience_years,
            assigned_transport_id: new.assigned_transport_id,
        };
        drivers.push(driver.clone());
        Ok(driver)
    })?;
    info!(id = driver.id, "driver added");
    Ok(driver)
}

/// Create an order in status `created` and append its id to the client's history.
///
/// Every referenced id must resolve; on any violation nothing is written.
/// The orders file is written before the clients file, so a failure between
/// the two saves leaves an order missing from its client's history.
pub fn add_order(ledger: &Ledger, new: NewOrder, now: DateTime<Local>) -> Result<Order> {
    // Clients before orders, the same order seeding uses
    let _clients_lock = ledger.clients.lock()?;
    let _orders_lock = ledger.orders.lock()?;

    let mut clients = ledger.clients.load()?;
    let cargos = ledger.cargos.load()?;
    if clients.is_empty() {
        return Err(DomainError::NoClients.into());
    }
    if cargos.is_empty() {
        return Err(DomainError::NoCargo.into());
    }
    if !cargos.iter().any(|c| c.id == new.cargo_id) {
        return Err(DomainError::UnknownCargo(new.cargo_id).into());
    }
    if let Some(id) = new.transport_id {
        if !ledger.transports.load()?.iter().any(|t| t.id == id) {
            return Err(DomainError::UnknownTransport(id).into());
        }
    }
    if let Some(id) = new.driver_id {
        if !ledger.drivers.load()?.iter().any(|d| d.id == id) {
            return Err(DomainError::UnknownDriver(id).into());
        }
    }
    let client = clients
        .iter_mut()
        .find(|c| c.id == new.client_id)
        .ok_or(DomainError::UnknownClient(new.client_id))?;

    let mut orders = ledger.orders.load()?;
    let order = Order {
        id: next_id(&orders),
        client_id: new.client_id,
        cargo_id: new.cargo_id,
        created_at: now,
        status: OrderStatus::Created,
        transport_id: new.transport_id,
        driver_id: new.driver_id,
    };
    orders.push(order.clone());
    if !client.record_order(order.id) {
        warn!(client_id = client.id, order_id = order.id, "order already in client history");
    }

    ledger.orders.save(&orders)?;
    ledger.clients.save(&clients)?;

    info!(id = order.id, client_id = order.client_id, "order added");
    Ok(order)
}

pub fn add_route(ledger: &Ledger, new: NewRoute) -> Result<Route> {
    ensure_order_exists(ledger, new.order_id)?;

    let route = update(ledger.routes.as_ref(), |routes| {
        let route = Route {
            id: next_id(routes),
            order_id: new.order_id,
            from: new.from,
            to: new.to,
            distance_km: new.distance_km,
            estimated_minutes: new.estimated_minutes,
        };
        routes.push(route.clone());
        Ok(route)
    })?;
    info!(id = route.id, order_id = route.order_id, "route added");
    Ok(route)
}

/// Open a pending delivery for an existing order
pub fn add_delivery(ledger: &Ledger, order_id: RecordId) -> Result<Delivery> {
    ensure_order_exists(ledger, order_id)?;

    let delivery = update(ledger.deliveries.as_ref(), |deliveries| {
        let delivery = Delivery {
            id: next_id(deliveries),
            order_id,
            actual_arrival: None,
            status: DeliveryStatus::Pending,
        };
        deliveries.push(delivery.clone());
        Ok(delivery)
    })?;
    info!(id = delivery.id, order_id, "delivery added");
    Ok(delivery)
}

pub fn set_order_status(ledger: &Ledger, order_id: RecordId, next: OrderStatus) -> Result<Order> {
    let order = update(ledger.orders.as_ref(), |orders| {
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::UnknownOrder(order_id))?;
        order.status = order.status.transition(order_id, next)?;
        Ok(order.clone())
    })?;
    info!(id = order_id, status = %order.status, "order status changed");
    Ok(order)
}

/// Move a delivery to `in_transit` or `failed`. Use [`record_arrival`] for `delivered`.
pub fn set_delivery_status(
    ledger: &Ledger,
    delivery_id: RecordId,
    next: DeliveryStatus,
) -> Result<Delivery> {
    if next == DeliveryStatus::Delivered {
        return Err(DomainError::ArrivalRequired(delivery_id).into());
    }

    let delivery = update(ledger.deliveries.as_ref(), |deliveries| {
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == delivery_id)
            .ok_or(DomainError::UnknownDelivery(delivery_id))?;
        delivery.status = delivery.status.transition(delivery_id, next)?;
        Ok(delivery.clone())
    })?;
    info!(id = delivery_id, status = %delivery.status, "delivery status changed");
    Ok(delivery)
}

/// Mark a delivery as delivered at `arrival`
pub fn record_arrival(
    ledger: &Ledger,
    delivery_id: RecordId,
    arrival: DateTime<Local>,
) -> Result<Delivery> {
    let delivery = update(ledger.deliveries.as_ref(), |deliveries| {
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == delivery_id)
            .ok_or(DomainError::UnknownDelivery(delivery_id))?;
        delivery.status = delivery
            .status
            .transition(delivery_id, DeliveryStatus::Delivered)?;
        delivery.actual_arrival = Some(arrival);
        Ok(delivery.clone())
    })?;
    info!(id = delivery_id, "arrival recorded");
    Ok(delivery)
}

fn ensure_order_exists(ledger: &Ledger, order_id: RecordId) -> Result<()> {
    if ledger.orders.load()?.iter().any(|o| o.id == order_id) {
        Ok(())
    } else {
        Err(DomainError::UnknownOrder(order_id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use haulbook_store::memory_ledger;
    use haulbook_types::Error;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    fn ledger_with_client_and_cargo() -> Ledger {
        let ledger = memory_ledger();
        add_client(
            &ledger,
            NewClient {
                name: "Romashka LLC".into(),
                contact: "info@romashka.test".into(),
            },
        )
        .unwrap();
        add_cargo(
            &ledger,
            NewCargo {
                name: "Computers".into(),
                kind: "electronics".into(),
                weight_kg: 500.0,
                volume_m3: 2.0,
                requirements: "keep cool".into(),
            },
        )
        .unwrap();
        ledger
    }

    fn order_for(client_id: RecordId) -> NewOrder {
        NewOrder {
            client_id,
            cargo_id: 1,
            transport_id: None,
            driver_id: None,
        }
    }

    #[test]
    fn test_ids_are_max_plus_one_per_collection() {
        let ledger = ledger_with_client_and_cargo();
        let second = add_client(
            &ledger,
            NewClient {
                name: "Ivan".into(),
                contact: "ivan@mail.test".into(),
            },
        )
        .unwrap();
        assert_eq!(second.id, 2);

        // Ids are per collection, so the first order is 1 as well
        let order = add_order(&ledger, order_for(1), now()).unwrap();
        assert_eq!(order.id, 1);
    }

    #[test]
    fn test_order_appends_history_once_in_creation_order() {
        let ledger = ledger_with_client_and_cargo();
        let first = add_order(&ledger, order_for(1), now()).unwrap();
        let second = add_order(&ledger, order_for(1), now()).unwrap();

        let clients = ledger.clients.load().unwrap();
        assert_eq!(clients[0].order_history, vec![first.id, second.id]);
        assert_eq!(first.status, OrderStatus::Created);
        assert_eq!(first.created_at, now());
    }

    #[test]
    fn test_stale_history_entry_is_not_duplicated() {
        let ledger = ledger_with_client_and_cargo();
        let mut client = ledger.clients.load().unwrap().remove(0);
        client.order_history = vec![1];
        ledger.clients.save(&[client]).unwrap();

        let order = add_order(&ledger, order_for(1), now()).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(ledger.clients.load().unwrap()[0].order_history, vec![1]);
    }

    #[test]
    fn test_order_with_unknown_client_writes_nothing() {
        let ledger = ledger_with_client_and_cargo();
        let err = add_order(&ledger, order_for(42), now()).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownClient(42))));
        assert!(ledger.orders.load().unwrap().is_empty());
    }

    #[test]
    fn test_order_with_unknown_driver_writes_nothing() {
        let ledger = ledger_with_client_and_cargo();
        let mut new = order_for(1);
        new.driver_id = Some(5);
        let err = add_order(&ledger, new, now()).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownDriver(5))));
        assert!(ledger.orders.load().unwrap().is_empty());
        assert!(ledger.clients.load().unwrap()[0].order_history.is_empty());
    }

    #[test]
    fn test_order_with_unknown_cargo_writes_nothing() {
        let ledger = ledger_with_client_and_cargo();
        let mut new = order_for(1);
        new.cargo_id = 7;
        let err = add_order(&ledger, new, now()).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownCargo(7))));
        assert!(ledger.orders.load().unwrap().is_empty());
        assert!(ledger.clients.load().unwrap()[0].order_history.is_empty());
    }

    #[test]
    fn test_order_with_unknown_transport_writes_nothing() {
        let ledger = ledger_with_client_and_cargo();
        let mut new = order_for(1);
        new.transport_id = Some(3);
        let err = add_order(&ledger, new, now()).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownTransport(3))));
        assert!(ledger.orders.load().unwrap().is_empty());
        assert!(ledger.clients.load().unwrap()[0].order_history.is_empty());
    }

    #[test]
    fn test_route_for_unknown_order_writes_nothing() {
        let ledger = ledger_with_client_and_cargo();
        let err = add_route(
            &ledger,
            NewRoute {
                order_id: 4,
                from: "Kazan".into(),
                to: "Samara".into(),
                distance_km: 360.0,
                estimated_minutes: 300,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownOrder(4))));
        assert!(ledger.routes.load().unwrap().is_empty());
    }

    #[test]
    fn test_order_requires_clients_and_cargo() {
        let ledger = memory_ledger();
        let err = add_order(&ledger, order_for(1), now()).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::NoClients)));
    }

    #[test]
    fn test_driver_assignment_is_not_validated() {
        let ledger = memory_ledger();
        let driver = add_driver(
            &ledger,
            NewDriver {
                full_name: "Petr Petrov".into(),
                contact: "petr@logistics.test".into(),
                experience_years: 5,
                assigned_transport_id: Some(99),
            },
        )
        .unwrap();
        assert_eq!(driver.assigned_transport_id, Some(99));
    }

    #[test]
    fn test_route_and_delivery_need_existing_order() {
        let ledger = ledger_with_client_and_cargo();
        let err = add_delivery(&ledger, 1).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownOrder(1))));

        add_order(&ledger, order_for(1), now()).unwrap();
        let delivery = add_delivery(&ledger, 1).unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Pending);

        let route = add_route(
            &ledger,
            NewRoute {
                order_id: 1,
                from: "Moscow".into(),
                to: "Saint Petersburg".into(),
                distance_km: 700.0,
                estimated_minutes: 540,
            },
        )
        .unwrap();
        assert_eq!(route.id, 1);
    }

    #[test]
    fn test_order_status_transitions_are_enforced() {
        let ledger = ledger_with_client_and_cargo();
        add_order(&ledger, order_for(1), now()).unwrap();

        let err = set_order_status(&ledger, 1, OrderStatus::Completed).unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidTransition { .. })
        ));

        set_order_status(&ledger, 1, OrderStatus::InTransit).unwrap();
        let order = set_order_status(&ledger, 1, OrderStatus::Completed).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(ledger.orders.load().unwrap()[0].status, OrderStatus::Completed);
    }

    #[test]
    fn test_record_arrival_sets_timestamp_and_status() {
        let ledger = ledger_with_client_and_cargo();
        add_order(&ledger, order_for(1), now()).unwrap();
        add_delivery(&ledger, 1).unwrap();
        set_delivery_status(&ledger, 1, DeliveryStatus::InTransit).unwrap();

        let arrival = now() + Duration::hours(9);
        let delivery = record_arrival(&ledger, 1, arrival).unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Delivered);
        assert_eq!(delivery.actual_arrival, Some(arrival));

        // Delivered is terminal
        assert!(record_arrival(&ledger, 1, arrival).is_err());
    }

    #[test]
    fn test_delivered_status_requires_arrival() {
        let ledger = ledger_with_client_and_cargo();
        add_order(&ledger, order_for(1), now()).unwrap();
        add_delivery(&ledger, 1).unwrap();

        let err = set_delivery_status(&ledger, 1, DeliveryStatus::Delivered).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::ArrivalRequired(1))));

        let stored = &ledger.deliveries.load().unwrap()[0];
        assert_eq!(stored.status, DeliveryStatus::Pending);
        assert_eq!(stored.actual_arrival, None);

        // The arrival can still be recorded afterwards
        let delivery = record_arrival(&ledger, 1, now()).unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_concurrent_adds_keep_every_client() {
        const WRITERS: u32 = 8;
        let dir = tempfile::tempdir().unwrap();
        let ledger = haulbook_store::open_json_ledger(dir.path()).unwrap();

        std::thread::scope(|scope| {
            for i in 0..WRITERS {
                let ledger = &ledger;
                scope.spawn(move || {
                    add_client(
                        ledger,
                        NewClient {
                            name: format!("Client {}", i),
                            contact: format!("client{}@mail.test", i),
                        },
                    )
                    .unwrap();
                });
            }
        });

        let mut ids: Vec<RecordId> = ledger.clients.load().unwrap().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=WRITERS).collect::<Vec<_>>());
    }
}
