//! Domain layer: entity models, status transitions, repository contract and reports

pub mod model;
pub mod repository;
pub mod service;
