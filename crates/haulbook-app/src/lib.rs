//! Application service layer - use cases, config, demo data

pub mod app;
pub mod config;
pub mod repository;
pub mod seed;
