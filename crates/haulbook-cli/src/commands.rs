//! Command handlers

use std::io::{self, Write};

use chrono::Local;
use haulbook_app::app;
use haulbook_app::config::Config;
use haulbook_app::repository::open_ledger;
use haulbook_app::seed::seed_demo_data;
use haulbook_calc::{evaluate, multiply_by_three};
use haulbook_domain::repository::Ledger;
use haulbook_types::{OutputFormat, RecordId, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, Entity, ReportKind};
use crate::output::{self, print_json};
use crate::prompt::parse_number;
use crate::shell::Shell;

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        None => cmd_shell(&config, false),
        Some(Commands::Shell { no_seed }) => cmd_shell(&config, no_seed),
        Some(Commands::Eval { x, a, b, c }) => cmd_eval(x, a, b, c, format),
        Some(Commands::Scale { values }) => cmd_scale(&values, format),
        Some(Commands::List { entity }) => cmd_list(&open_ledger(&config)?, entity, format),
        Some(Commands::Report { kind }) => cmd_report(&open_ledger(&config)?, kind, format),
        Some(Commands::CargoStatus { cargo_id }) => {
            cmd_cargo_status(&open_ledger(&config)?, cargo_id, format)
        }
        Some(Commands::Seed) => cmd_seed(&open_ledger(&config)?),
        Some(Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_seed,
            reset,
        }) => cmd_config(show, set_data_dir, set_output, set_seed, reset),
    }
}

/// JSON as-is, or the table renderer on stdout
fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce(&mut io::StdoutLock<'static>) -> Result<()>,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            table(&mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn cmd_shell(config: &Config, no_seed: bool) -> Result<()> {
    let ledger = open_ledger(config)?;
    if config.seed_demo_data && !no_seed && seed_demo_data(&ledger, Local::now())? {
        info!("seeded demo data");
    }

    let stdin = io::stdin();
    let mut shell = Shell::new(&ledger, stdin.lock(), io::stdout());
    shell.run()?;
    debug!("shell finished");
    Ok(())
}

fn cmd_eval(x: f64, a: f64, b: f64, c: f64, format: OutputFormat) -> Result<()> {
    let evaluation = evaluate(x, a, b, c)?;
    emit(format, &evaluation, |w| output::write_evaluation(w, &evaluation))
}

fn cmd_scale(args: &[String], format: OutputFormat) -> Result<()> {
    // A single quoted argument may carry several numbers
    let values = args
        .iter()
        .flat_map(|arg| arg.split_whitespace())
        .map(parse_number::<f64>)
        .collect::<Result<Vec<_>>>()?;

    let scaled = multiply_by_three(Some(&values))?;
    emit(format, &scaled, |w| output::write_scaled(w, &values, &scaled))
}

fn cmd_list(ledger: &Ledger, entity: Entity, format: OutputFormat) -> Result<()> {
    match entity {
        Entity::Clients => {
            let records = ledger.clients.load()?;
            emit(format, &records, |w| output::write_clients(w, &records))
        }
        Entity::Cargos => {
            let records = ledger.cargos.load()?;
            emit(format, &records, |w| output::write_cargos(w, &records))
        }
        Entity::Transports => {
            let records = ledger.transports.load()?;
            emit(format, &records, |w| output::write_transports(w, &records))
        }
        Entity::Drivers => {
            let records = ledger.drivers.load()?;
            emit(format, &records, |w| output::write_drivers(w, &records))
        }
        Entity::Orders => {
            let records = ledger.orders.load()?;
            emit(format, &records, |w| output::write_orders(w, &records))
        }
        Entity::Routes => {
            let records = ledger.routes.load()?;
            emit(format, &records, |w| output::write_routes(w, &records))
        }
        Entity::Deliveries => {
            let records = ledger.deliveries.load()?;
            emit(format, &records, |w| output::write_deliveries(w, &records))
        }
    }
}

fn cmd_report(ledger: &Ledger, kind: ReportKind, format: OutputFormat) -> Result<()> {
    let now = Local::now();
    match kind {
        ReportKind::RecentOrders => {
            let recent = app::recent_orders(ledger, now)?;
            emit(format, &recent, |w| output::write_recent_orders(w, &recent))
        }
        ReportKind::TransportToday => {
            let load = app::transport_load_today(ledger, now)?;
            emit(format, &load, |w| output::write_transport_load(w, &load))
        }
        ReportKind::ActiveDrivers => {
            let drivers = app::drivers_with_active_orders(ledger)?;
            emit(format, &drivers, |w| output::write_active_drivers(w, &drivers))
        }
        ReportKind::AverageDelivery => {
            let summary = app::average_delivery_time(ledger)?;
            emit(format, &summary, |w| {
                output::write_average_delivery(w, summary.as_ref())
            })
        }
    }
}

fn cmd_cargo_status(ledger: &Ledger, cargo_id: RecordId, format: OutputFormat) -> Result<()> {
    let status = app::cargo_status(ledger, cargo_id)?;
    emit(format, &status, |w| output::write_cargo_status(w, &status))
}

fn cmd_seed(ledger: &Ledger) -> Result<()> {
    if seed_demo_data(ledger, Local::now())? {
        println!("Demo data written");
    } else {
        println!("Ledger already has records, nothing seeded");
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<std::path::PathBuf>,
    set_output: Option<OutputFormat>,
    set_seed: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(enabled) = set_seed {
        config.seed_demo_data = enabled;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
