//! Domain services

pub mod reports;

pub use reports::{
    active_drivers, average_delivery_time, cargo_delivery_status, orders_last_month, orders_since,
    transport_load_on, CargoDeliveryStatus, DeliveryTimeSummary, DriverWorkload, RecentOrder,
    TransportLoad,
};
