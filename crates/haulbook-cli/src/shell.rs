//! Interactive menu shell
//!
//! Main menu -> per-entity submenu -> action. "0" goes back (or exits at the
//! top level), anything unrecognized prints an error and shows the menu again.
//! A failing action reports its error and returns to the menu it came from.

use std::io::{BufRead, Write};

use chrono::{DateTime, Local};
use haulbook_app::app::{self, NewCargo, NewClient, NewDriver, NewOrder, NewRoute, NewTransport};
use haulbook_domain::model::{DeliveryStatus, OrderStatus};
use haulbook_domain::repository::Ledger;
use haulbook_types::{DomainError, Result};
use tracing::debug;

use crate::output;
use crate::prompt::{Prompter, TIMESTAMP_FORMAT};

struct Menu {
    title: &'static str,
    items: &'static [&'static str],
    back: &'static str,
}

const MAIN_MENU: Menu = Menu {
    title: "Logistics management",
    items: &[
        "Clients",
        "Orders",
        "Cargo",
        "Transport",
        "Drivers",
        "Routes",
        "Deliveries",
        "Reports",
    ],
    back: "Exit",
};

const CLIENTS_MENU: Menu = Menu {
    title: "Clients",
    items: &["List all clients", "Add client"],
    back: "Back to main menu",
};

const ORDERS_MENU: Menu = Menu {
    title: "Orders",
    items: &[
        "Add order",
        "Orders in the last month",
        "List all orders",
        "Change order status",
    ],
    back: "Back to main menu",
};

const CARGO_MENU: Menu = Menu {
    title: "Cargo",
    items: &["List all cargo", "Add cargo", "Cargo delivery status"],
    back: "Back to main menu",
};

const TRANSPORT_MENU: Menu = Menu {
    title: "Transport",
    items: &["List all transport", "Add transport", "Transport used today"],
    back: "Back to main menu",
};

const DRIVERS_MENU: Menu = Menu {
    title: "Drivers",
    items: &["List all drivers", "Add driver", "Drivers with active orders"],
    back: "Back to main menu",
};

const ROUTES_MENU: Menu = Menu {
    title: "Routes",
    items: &["List all routes", "Add route"],
    back: "Back to main menu",
};

const DELIVERIES_MENU: Menu = Menu {
    title: "Deliveries",
    items: &[
        "List all deliveries",
        "Add delivery",
        "Record arrival",
        "Change delivery status",
    ],
    back: "Back to main menu",
};

const REPORTS_MENU: Menu = Menu {
    title: "Reports",
    items: &["Average delivery time"],
    back: "Back to main menu",
};

/// What a menu line selected
enum Choice {
    Back,
    Item(usize),
    Invalid,
}

pub struct Shell<'a, R, W> {
    ledger: &'a Ledger,
    prompt: Prompter<R, W>,
    clock: Box<dyn Fn() -> DateTime<Local> + 'a>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ledger: &'a Ledger, input: R, out: W) -> Self {
        Self {
            ledger,
            prompt: Prompter::new(input, out),
            clock: Box::new(Local::now),
        }
    }

    /// Replace the wall clock, for reproducible timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn into_output(self) -> W {
        self.prompt.into_inner().1
    }

    fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    /// Run until "0" at the main menu or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.choose(&MAIN_MENU)? {
                None | Some(Choice::Back) => return Ok(()),
                Some(Choice::Invalid) => self.invalid_choice()?,
                Some(Choice::Item(index)) => {
                    let finished = match index {
                        1 => self.submenu(&CLIENTS_MENU, Self::clients_action)?,
                        2 => self.submenu(&ORDERS_MENU, Self::orders_action)?,
                        3 => self.submenu(&CARGO_MENU, Self::cargo_action)?,
                        4 => self.submenu(&TRANSPORT_MENU, Self::transport_action)?,
                        5 => self.submenu(&DRIVERS_MENU, Self::drivers_action)?,
                        6 => self.submenu(&ROUTES_MENU, Self::routes_action)?,
                        7 => self.submenu(&DELIVERIES_MENU, Self::deliveries_action)?,
                        _ => self.submenu(&REPORTS_MENU, Self::reports_action)?,
                    };
                    if finished {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Show a menu and read one choice. `None` at end of input.
    fn choose(&mut self, menu: &Menu) -> Result<Option<Choice>> {
        let out = self.prompt.out();
        writeln!(out)?;
        writeln!(out, "=== {} ===", menu.title)?;
        for (i, item) in menu.items.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, item)?;
        }
        writeln!(out, "0. {}", menu.back)?;
        write!(out, "Your choice: ")?;

        let Some(line) = self.prompt.read_line()? else {
            return Ok(None);
        };
        let line = line.trim();
        debug!(menu = menu.title, choice = line, "menu choice");

        let choice = match line.parse::<usize>() {
            Ok(0) => Choice::Back,
            Ok(n) if n <= menu.items.len() => Choice::Item(n),
            _ => Choice::Invalid,
        };
        Ok(Some(choice))
    }

    fn invalid_choice(&mut self) -> Result<()> {
        writeln!(self.prompt.out(), "Invalid choice.")?;
        Ok(())
    }

    /// Loop over one submenu. Returns `true` when input ran out.
    fn submenu(&mut self, menu: &Menu, action: fn(&mut Self, usize) -> Result<()>) -> Result<bool> {
        loop {
            match self.choose(menu)? {
                None => return Ok(true),
                Some(Choice::Back) => return Ok(false),
                Some(Choice::Invalid) => self.invalid_choice()?,
                Some(Choice::Item(index)) => {
                    writeln!(self.prompt.out())?;
                    if let Err(e) = action(self, index) {
                        writeln!(self.prompt.out(), "Error: {}", e)?;
                    }
                }
            }
        }
    }

    fn clients_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let clients = self.ledger.clients.load()?;
                output::write_clients(self.prompt.out(), &clients)
            }
            _ => {
                let name = self.prompt.text("Client or company name")?;
                let contact = self.prompt.text("Contact details")?;
                let client = app::add_client(self.ledger, NewClient { name, contact })?;
                self.done(format!("Client {} added.", client.id))
            }
        }
    }

    fn orders_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => self.add_order(),
            2 => {
                let recent = app::recent_orders(self.ledger, self.now())?;
                output::write_recent_orders(self.prompt.out(), &recent)
            }
            3 => {
                let orders = self.ledger.orders.load()?;
                output::write_orders(self.prompt.out(), &orders)
            }
            _ => {
                let id = self.prompt.number("Order id")?;
                let labels: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.label()).collect();
                let status: OrderStatus = self
                    .prompt
                    .text(&format!("New status ({})", labels.join(", ")))?
                    .parse()?;
                let order = app::set_order_status(self.ledger, id, status)?;
                self.done(format!("Order {} is now {}.", order.id, order.status))
            }
        }
    }

    fn add_order(&mut self) -> Result<()> {
        let clients = self.ledger.clients.load()?;
        let cargos = self.ledger.cargos.load()?;
        let transports = self.ledger.transports.load()?;
        let drivers = self.ledger.drivers.load()?;
        if clients.is_empty() {
            return Err(DomainError::NoClients.into());
        }
        if cargos.is_empty() {
            return Err(DomainError::NoCargo.into());
        }

        let out = self.prompt.out();
        writeln!(out, "Available clients:")?;
        for c in &clients {
            writeln!(out, "  Id {}: {}", c.id, c.name)?;
        }
        let client_id = self.prompt.number("Client id")?;

        let out = self.prompt.out();
        writeln!(out, "Available cargo:")?;
        for c in &cargos {
            writeln!(out, "  Id {}: {}", c.id, c.name)?;
        }
        let cargo_id = self.prompt.number("Cargo id")?;

        let out = self.prompt.out();
        writeln!(out, "Available transport (Enter to skip):")?;
        for t in &transports {
            writeln!(out, "  Id {}: {}", t.id, t.registration)?;
        }
        let transport_id = self.prompt.optional_number("Transport id")?;

        let out = self.prompt.out();
        writeln!(out, "Available drivers (Enter to skip):")?;
        for d in &drivers {
            writeln!(out, "  Id {}: {}", d.id, d.full_name)?;
        }
        let driver_id = self.prompt.optional_number("Driver id")?;

        let order = app::add_order(
            self.ledger,
            NewOrder {
                client_id,
                cargo_id,
                transport_id,
                driver_id,
            },
            self.now(),
        )?;
        self.done(format!("Order {} added.", order.id))
    }

    fn cargo_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let cargos = self.ledger.cargos.load()?;
                output::write_cargos(self.prompt.out(), &cargos)
            }
            2 => {
                let name = self.prompt.text("Name")?;
                let kind = self.prompt.text("Type")?;
                let weight_kg = self.prompt.number("Weight (kg)")?;
                let volume_m3 = self.prompt.number("Volume (m³)")?;
                let requirements = self.prompt.text("Requirements")?;
                let cargo = app::add_cargo(
                    self.ledger,
                    NewCargo {
                        name,
                        kind,
                        weight_kg,
                        volume_m3,
                        requirements,
                    },
                )?;
                self.done(format!("Cargo {} added.", cargo.id))
            }
            _ => {
                let cargos = self.ledger.cargos.load()?;
                let out = self.prompt.out();
                writeln!(out, "Available cargo:")?;
                for c in &cargos {
                    writeln!(out, "  Id {}: {}", c.id, c.name)?;
                }
                let cargo_id = self.prompt.number("Cargo id")?;
                let status = app::cargo_status(self.ledger, cargo_id)?;
                output::write_cargo_status(self.prompt.out(), &status)
            }
        }
    }

    fn transport_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let transports = self.ledger.transports.load()?;
                output::write_transports(self.prompt.out(), &transports)
            }
            2 => {
                let kind = self.prompt.text("Type")?;
                let capacity_kg = self.prompt.number("Capacity (kg)")?;
                let registration = self.prompt.text("Registration")?;
                let condition = self.prompt.text("Condition")?;
                let transport = app::add_transport(
                    self.ledger,
                    NewTransport {
                        kind,
                        capacity_kg,
                        registration,
                        condition,
                    },
                )?;
                self.done(format!("Transport {} added.", transport.id))
            }
            _ => {
                let load = app::transport_load_today(self.ledger, self.now())?;
                output::write_transport_load(self.prompt.out(), &load)
            }
        }
    }

    fn drivers_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let drivers = self.ledger.drivers.load()?;
                output::write_drivers(self.prompt.out(), &drivers)
            }
            2 => {
                let full_name = self.prompt.text("Full name")?;
                let contact = self.prompt.text("Contact details")?;
                let experience_years = self.prompt.number("Experience (years)")?;
                let assigned_transport_id =
                    self.prompt.optional_number("Assigned transport id (Enter to skip)")?;
                let driver = app::add_driver(
                    self.ledger,
                    NewDriver {
                        full_name,
                        contact,
                        experience_years,
                        assigned_transport_id,
                    },
                )?;
                self.done(format!("Driver {} added.", driver.id))
            }
            _ => {
                let drivers = app::drivers_with_active_orders(self.ledger)?;
                output::write_active_drivers(self.prompt.out(), &drivers)
            }
        }
    }

    fn routes_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let routes = self.ledger.routes.load()?;
                output::write_routes(self.prompt.out(), &routes)
            }
            _ => {
                let order_id = self.prompt.number("Order id")?;
                let from = self.prompt.text("From")?;
                let to = self.prompt.text("To")?;
                let distance_km = self.prompt.number("Distance (km)")?;
                let estimated_minutes = self.prompt.number("Estimated time (minutes)")?;
                let route = app::add_route(
                    self.ledger,
                    NewRoute {
                        order_id,
                        from,
                        to,
                        distance_km,
                        estimated_minutes,
                    },
                )?;
                self.done(format!("Route {} added.", route.id))
            }
        }
    }

    fn deliveries_action(&mut self, index: usize) -> Result<()> {
        match index {
            1 => {
                let deliveries = self.ledger.deliveries.load()?;
                output::write_deliveries(self.prompt.out(), &deliveries)
            }
            2 => {
                let order_id = self.prompt.number("Order id")?;
                let delivery = app::add_delivery(self.ledger, order_id)?;
                self.done(format!("Delivery {} added.", delivery.id))
            }
            3 => {
                let id = self.prompt.number("Delivery id")?;
                let label = format!("Arrival ({}, Enter for now)", TIMESTAMP_FORMAT);
                let arrival = self.prompt.timestamp(&label, self.now())?;
                let delivery = app::record_arrival(self.ledger, id, arrival)?;
                self.done(format!("Delivery {} marked {}.", delivery.id, delivery.status))
            }
            _ => {
                let id = self.prompt.number("Delivery id")?;
                let status: DeliveryStatus = self
                    .prompt
                    .text("New status (in_transit, failed)")?
                    .parse()?;
                let delivery = app::set_delivery_status(self.ledger, id, status)?;
                self.done(format!("Delivery {} is now {}.", delivery.id, delivery.status))
            }
        }
    }

    fn reports_action(&mut self, _index: usize) -> Result<()> {
        let summary = app::average_delivery_time(self.ledger)?;
        output::write_average_delivery(self.prompt.out(), summary.as_ref())
    }

    fn done(&mut self, message: String) -> Result<()> {
        writeln!(self.prompt.out(), "{}", message)?;
        Ok(())
    }
}
