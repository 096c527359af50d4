//! Demo records written into an empty ledger

use chrono::{DateTime, Duration, Local};
use haulbook_domain::model::{
    Cargo, Client, Delivery, DeliveryStatus, Driver, Order, OrderStatus, Route, Transport,
};
use haulbook_domain::repository::Ledger;
use haulbook_types::Result;
use tracing::{debug, info};

/// Fill every collection with a small demo data set.
///
/// Does nothing and returns `false` unless every collection is empty. All
/// collection locks are held until the last save.
pub fn seed_demo_data(ledger: &Ledger, now: DateTime<Local>) -> Result<bool> {
    let _locks = (
        ledger.clients.lock()?,
        ledger.cargos.lock()?,
        ledger.transports.lock()?,
        ledger.drivers.lock()?,
        ledger.orders.lock()?,
        ledger.routes.lock()?,
        ledger.deliveries.lock()?,
    );

    if !ledger_is_empty(ledger)? {
        debug!("ledger has records, skipping demo data");
        return Ok(false);
    }

    let mut romashka = Client::new(1, "Romashka LLC", "info@romashka.test");
    romashka.record_order(1);
    let mut ivan = Client::new(2, "Ivan Ivanov", "ivan@mail.test");
    ivan.record_order(2);
    ledger.clients.save(&[romashka, ivan])?;

    ledger.cargos.save(&[
        Cargo {
            id: 1,
            name: "Computers".to_string(),
            kind: "Electronics".to_string(),
            weight_kg: 500.0,
            volume_m3: 2.0,
            requirements: "Keep cool".to_string(),
        },
        Cargo {
            id: 2,
            name: "Furniture".to_string(),
            kind: "Oversized".to_string(),
            weight_kg: 1000.0,
            volume_m3: 15.0,
            requirements: "Handle with care".to_string(),
        },
    ])?;

    ledger.transports.save(&[
        Transport {
            id: 1,
            kind: "Truck".to_string(),
            capacity_kg: 2000.0,
            registration: "A123BC".to_string(),
            condition: "Good".to_string(),
        },
        Transport {
            id: 2,
            kind: "Semi-trailer".to_string(),
            capacity_kg: 5000.0,
            registration: "B456CD".to_string(),
            condition: "Excellent".to_string(),
        },
    ])?;

    ledger.drivers.save(&[
        Driver {
            id: 1,
            full_name: "Petr Petrov".to_string(),
            contact: "petr@logistics.test".to_string(),
            experience_years: 5,
            assigned_transport_id: Some(1),
        },
        Driver {
            id: 2,
            full_name: "Sergey Sergeev".to_string(),
            contact: "sergey@logistics.test".to_string(),
            experience_years: 8,
            assigned_transport_id: Some(2),
        },
    ])?;

    ledger.orders.save(&[
        Order {
            id: 1,
            client_id: 1,
            cargo_id: 1,
            created_at: now - Duration::days(3),
            status: OrderStatus::InTransit,
            transport_id: Some(1),
            driver_id: Some(1),
        },
        Order {
            id: 2,
            client_id: 2,
            cargo_id: 2,
            created_at: now - Duration::days(10),
            status: OrderStatus::Completed,
            transport_id: Some(2),
            driver_id: Some(2),
        },
    ])?;

    ledger.routes.save(&[
        Route {
            id: 1,
            order_id: 1,
            from: "Moscow".to_string(),
            to: "Saint Petersburg".to_string(),
            distance_km: 700.0,
            estimated_minutes: 9 * 60,
        },
        Route {
            id: 2,
            order_id: 2,
            from: "Kazan".to_string(),
            to: "Nizhny Novgorod".to_string(),
            distance_km: 420.0,
            estimated_minutes: 6 * 60,
        },
    ])?;

    ledger.deliveries.save(&[Delivery {
        id: 1,
        order_id: 2,
        actual_arrival: Some(now - Duration::days(5)),
        status: DeliveryStatus::Delivered,
    }])?;

    info!("demo data seeded");
    Ok(true)
}

fn ledger_is_empty(ledger: &Ledger) -> Result<bool> {
    Ok(ledger.clients.load()?.is_empty()
        && ledger.cargos.load()?.is_empty()
        && ledger.transports.load()?.is_empty()
        && ledger.drivers.load()?.is_empty()
        && ledger.orders.load()?.is_empty()
        && ledger.routes.load()?.is_empty()
        && ledger.deliveries.load()?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use haulbook_store::memory_ledger;

    #[test]
    fn test_seed_only_into_empty_ledger() {
        let ledger = memory_ledger();
        let now = Local.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap();
        assert!(seed_demo_data(&ledger, now).unwrap());
        assert!(!seed_demo_data(&ledger, now).unwrap());

        assert_eq!(ledger.clients.load().unwrap().len(), 2);
        assert_eq!(ledger.deliveries.load().unwrap().len(), 1);
    }

    #[test]
    fn test_seed_leaves_partially_filled_ledger_alone() {
        let ledger = memory_ledger();
        let cargo = Cargo {
            id: 1,
            name: "Pallets".to_string(),
            kind: "General".to_string(),
            weight_kg: 300.0,
            volume_m3: 1.5,
            requirements: "None".to_string(),
        };
        ledger.cargos.save(std::slice::from_ref(&cargo)).unwrap();

        let now = Local.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap();
        assert!(!seed_demo_data(&ledger, now).unwrap());

        assert_eq!(ledger.cargos.load().unwrap(), vec![cargo]);
        assert!(ledger.clients.load().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_histories_match_orders() {
        let ledger = memory_ledger();
        let now = Local.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap();
        seed_demo_data(&ledger, now).unwrap();

        let clients = ledger.clients.load().unwrap();
        for order in ledger.orders.load().unwrap() {
            let client = clients.iter().find(|c| c.id == order.client_id).unwrap();
            assert_eq!(client.order_history, vec![order.id]);
        }
    }
}
