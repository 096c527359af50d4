//! haulbook - logistics record keeper
//!
//! Library half of the CLI so the shell can be driven from tests.

pub mod cli;
pub mod commands;
pub mod output;
pub mod prompt;
pub mod shell;
