//! Error types for haulbook

use std::path::PathBuf;

use thiserror::Error;

pub use haulbook_calc::{EvalError, ScaleError};

use crate::RecordId;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt collection file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize collection {collection}: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lock on collection {0} was poisoned")]
    Poisoned(&'static str),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Violations of application-level rules
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No clients available, add a client first")]
    NoClients,

    #[error("No cargo available, add cargo first")]
    NoCargo,

    #[error("Unknown client id: {0}")]
    UnknownClient(RecordId),

    #[error("Unknown cargo id: {0}")]
    UnknownCargo(RecordId),

    #[error("Unknown transport id: {0}")]
    UnknownTransport(RecordId),

    #[error("Unknown driver id: {0}")]
    UnknownDriver(RecordId),

    #[error("Unknown order id: {0}")]
    UnknownOrder(RecordId),

    #[error("Unknown delivery id: {0}")]
    UnknownDelivery(RecordId),

    #[error("Delivery {0} becomes delivered only by recording its arrival")]
    ArrivalRequired(RecordId),

    #[error("{entity} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        id: RecordId,
        from: String,
        to: String,
    },
}

/// Malformed user input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Invalid timestamp {0:?} (expected YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),

    #[error("Unknown status: {0:?}")]
    UnknownStatus(String),

    #[error("Unexpected end of input")]
    Eof,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Evaluation failed: {0}")]
    Eval(#[from] EvalError),

    #[error("Scaling failed: {0}")]
    Scale(#[from] ScaleError),
}

pub type Result<T> = std::result::Result<T, Error>;
