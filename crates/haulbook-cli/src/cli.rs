//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use haulbook_types::{OutputFormat, RecordId};

#[derive(Parser)]
#[command(name = "haulbook")]
#[command(version)]
#[command(about = "Logistics record keeper backed by JSON files")]
#[command(long_about = None)]
pub struct Cli {
    /// Defaults to the interactive shell
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu shell
    Shell {
        /// Do not seed demo data into an empty ledger
        #[arg(long)]
        no_seed: bool,
    },

    /// Evaluate the piecewise function F(x, a, b, c)
    Eval {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
    },

    /// Multiply every number by three
    Scale {
        /// Numbers, separated by whitespace
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// List every record of one collection
    List {
        #[arg(value_enum)]
        entity: Entity,
    },

    /// Run a report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
    },

    /// Show the delivery status of a piece of cargo
    CargoStatus { cargo_id: RecordId },

    /// Fill an empty ledger with demo records
    Seed,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Enable/disable demo data seeding
        #[arg(long)]
        set_seed: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Clients,
    Cargos,
    Transports,
    Drivers,
    Orders,
    Routes,
    Deliveries,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Orders created during the last month
    RecentOrders,
    /// Vehicles used by orders created today
    TransportToday,
    /// Drivers with active orders
    ActiveDrivers,
    /// Average time from order to arrival
    AverageDelivery,
}
