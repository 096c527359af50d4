//! Domain model types

pub mod cargo;
pub mod client;
pub mod delivery;
pub mod driver;
pub mod order;
pub mod route;
pub mod status;
pub mod transport;

pub use cargo::Cargo;
pub use client::Client;
pub use delivery::Delivery;
pub use driver::Driver;
pub use order::Order;
pub use route::Route;
pub use status::{DeliveryStatus, OrderStatus};
pub use transport::Transport;
