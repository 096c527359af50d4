//! Use cases run by the shell and the CLI subcommands
//!
//! Every use case receives the [`Ledger`](haulbook_domain::repository::Ledger)
//! explicitly and reloads the collections it needs on each call.

pub mod ledger_service;
pub mod report_service;

pub use ledger_service::{
    add_cargo, add_client, add_delivery, add_driver, add_order, add_route, add_transport,
    record_arrival, set_delivery_status, set_order_status, NewCargo, NewClient, NewDriver,
    NewOrder, NewRoute, NewTransport,
};
pub use report_service::{
    average_delivery_time, cargo_status, drivers_with_active_orders, recent_orders,
    transport_load_today,
};
