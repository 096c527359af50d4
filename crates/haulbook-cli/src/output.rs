//! Output formatting module
//!
//! Table renderers write to any `Write` so the shell and the subcommands share them.

use std::io::Write;

use chrono::{DateTime, Local};
use haulbook_calc::Evaluation;
use haulbook_domain::model::{Cargo, Client, Delivery, Driver, Order, Route, Transport};
use haulbook_domain::service::{
    CargoDeliveryStatus, DeliveryTimeSummary, DriverWorkload, RecentOrder, TransportLoad,
};
use haulbook_types::Result;
use serde::Serialize;

const SEPARATOR_WIDTH: usize = 30;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%d.%m.%Y %H:%M").to_string()
}

fn separator(w: &mut impl Write) -> Result<()> {
    writeln!(w, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
}

pub fn write_clients(w: &mut impl Write, clients: &[Client]) -> Result<()> {
    writeln!(w, "=== Clients ===")?;
    for c in clients {
        writeln!(w, "Id:            {}", c.id)?;
        writeln!(w, "Name:          {}", c.name)?;
        writeln!(w, "Contact:       {}", c.contact)?;
        let history = if c.order_history.is_empty() {
            "none".to_string()
        } else {
            c.order_history
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(w, "Order history: {}", history)?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_cargos(w: &mut impl Write, cargos: &[Cargo]) -> Result<()> {
    writeln!(w, "=== Cargo ===")?;
    for c in cargos {
        writeln!(w, "Id:           {}", c.id)?;
        writeln!(w, "Name:         {}", c.name)?;
        writeln!(w, "Type:         {}", c.kind)?;
        writeln!(w, "Weight:       {} kg", c.weight_kg)?;
        writeln!(w, "Volume:       {} m³", c.volume_m3)?;
        writeln!(w, "Requirements: {}", c.requirements)?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_transports(w: &mut impl Write, transports: &[Transport]) -> Result<()> {
    writeln!(w, "=== Transport ===")?;
    for t in transports {
        writeln!(w, "Id:           {}", t.id)?;
        writeln!(w, "Type:         {}", t.kind)?;
        writeln!(w, "Capacity:     {} kg", t.capacity_kg)?;
        writeln!(w, "Registration: {}", t.registration)?;
        writeln!(w, "Condition:    {}", t.condition)?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_drivers(w: &mut impl Write, drivers: &[Driver]) -> Result<()> {
    writeln!(w, "=== Drivers ===")?;
    for d in drivers {
        writeln!(w, "Id:                 {}", d.id)?;
        writeln!(w, "Full name:          {}", d.full_name)?;
        writeln!(w, "Contact:            {}", d.contact)?;
        writeln!(w, "Experience (years): {}", d.experience_years)?;
        writeln!(w, "Assigned transport: {}", or_none(d.assigned_transport_id))?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_orders(w: &mut impl Write, orders: &[Order]) -> Result<()> {
    writeln!(w, "=== Orders ===")?;
    for o in orders {
        writeln!(w, "Id:        {}", o.id)?;
        writeln!(w, "Client:    {}", o.client_id)?;
        writeln!(w, "Cargo:     {}", o.cargo_id)?;
        writeln!(w, "Created:   {}", format_timestamp(&o.created_at))?;
        writeln!(w, "Status:    {}", o.status)?;
        writeln!(w, "Transport: {}", or_none(o.transport_id))?;
        writeln!(w, "Driver:    {}", or_none(o.driver_id))?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_routes(w: &mut impl Write, routes: &[Route]) -> Result<()> {
    writeln!(w, "=== Routes ===")?;
    for r in routes {
        writeln!(w, "Id:             {}", r.id)?;
        writeln!(w, "Order:          {}", r.order_id)?;
        writeln!(w, "From:           {}", r.from)?;
        writeln!(w, "To:             {}", r.to)?;
        writeln!(w, "Distance:       {} km", r.distance_km)?;
        writeln!(w, "Estimated time: {}", r.estimated_duration())?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_deliveries(w: &mut impl Write, deliveries: &[Delivery]) -> Result<()> {
    writeln!(w, "=== Deliveries ===")?;
    for d in deliveries {
        let arrival = d
            .actual_arrival
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| "unknown".to_string());
        writeln!(w, "Id:             {}", d.id)?;
        writeln!(w, "Order:          {}", d.order_id)?;
        writeln!(w, "Actual arrival: {}", arrival)?;
        writeln!(w, "Status:         {}", d.status)?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_recent_orders(w: &mut impl Write, recent: &[RecentOrder]) -> Result<()> {
    writeln!(w, "=== Orders in the last month ===")?;
    if recent.is_empty() {
        writeln!(w, "No orders in the last month.")?;
        return Ok(());
    }
    for r in recent {
        writeln!(w, "Id:      {}", r.order.id)?;
        writeln!(w, "Client:  {}", r.client_name.as_deref().unwrap_or("unknown"))?;
        writeln!(w, "Status:  {}", r.order.status)?;
        writeln!(w, "Created: {}", format_timestamp(&r.order.created_at))?;
        separator(w)?;
    }
    Ok(())
}

pub fn write_cargo_status(w: &mut impl Write, status: &CargoDeliveryStatus) -> Result<()> {
    match status {
        CargoDeliveryStatus::NoOrder => writeln!(w, "No order found for this cargo.")?,
        CargoDeliveryStatus::AwaitingDelivery {
            order_id,
            order_status,
        } => {
            writeln!(w, "Order {} status: {}", order_id, order_status)?;
            writeln!(w, "No delivery has been created yet.")?;
        }
        CargoDeliveryStatus::Delivery {
            delivery_id,
            status,
            actual_arrival,
            ..
        } => {
            writeln!(w, "Delivery {} status: {}", delivery_id, status)?;
            if let Some(arrival) = actual_arrival {
                writeln!(w, "Delivered at: {}", format_timestamp(arrival))?;
            }
        }
    }
    Ok(())
}

pub fn write_transport_load(w: &mut impl Write, load: &[TransportLoad]) -> Result<()> {
    writeln!(w, "=== Transport used today ===")?;
    if load.is_empty() {
        writeln!(w, "No transport used today.")?;
        return Ok(());
    }
    for l in load {
        writeln!(
            w,
            "Id: {}, Registration: {}, Orders: {}",
            l.transport_id, l.registration, l.order_count
        )?;
    }
    Ok(())
}

pub fn write_active_drivers(w: &mut impl Write, drivers: &[DriverWorkload]) -> Result<()> {
    writeln!(w, "=== Drivers with active orders ===")?;
    if drivers.is_empty() {
        writeln!(w, "No drivers with active orders.")?;
        return Ok(());
    }
    for d in drivers {
        writeln!(
            w,
            "Id: {}, Name: {}, Active orders: {}",
            d.driver_id, d.full_name, d.active_orders
        )?;
    }
    Ok(())
}

pub fn write_average_delivery(w: &mut impl Write, summary: Option<&DeliveryTimeSummary>) -> Result<()> {
    let Some(summary) = summary else {
        writeln!(w, "No completed deliveries to average.")?;
        return Ok(());
    };
    let (days, hours, minutes) = summary.breakdown();
    writeln!(w, "Completed deliveries:  {}", summary.completed)?;
    writeln!(
        w,
        "Average delivery time: {} d {} h {} min",
        days, hours, minutes
    )?;
    Ok(())
}

pub fn write_evaluation(w: &mut impl Write, eval: &Evaluation) -> Result<()> {
    writeln!(w, "Formula:   {} ({})", eval.branch.formula(), eval.branch)?;
    writeln!(w, "Condition: {}", eval.branch.condition())?;
    writeln!(w, "           {}", eval.substituted)?;
    writeln!(w, "Result:    F = {:.4}", eval.value)?;
    Ok(())
}

pub fn write_scaled(w: &mut impl Write, input: &[f64], result: &[f64]) -> Result<()> {
    writeln!(w, "Input:      [{}]", join_numbers(input))?;
    writeln!(w, "Result (x3): [{}]", join_numbers(result))?;
    Ok(())
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulbook_domain::service::DeliveryTimeSummary;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_average_none_message() {
        let text = render(|w| write_average_delivery(w, None));
        assert_eq!(text, "No completed deliveries to average.\n");
    }

    #[test]
    fn test_average_breakdown_line() {
        let summary = DeliveryTimeSummary {
            completed: 3,
            average_hours: 49.5,
        };
        let text = render(|w| write_average_delivery(w, Some(&summary)));
        assert!(text.contains("Completed deliveries:  3"));
        assert!(text.contains("2 d 1 h 30 min"));
    }

    #[test]
    fn test_client_history_rendering() {
        let mut client = Client::new(1, "Acme", "info@acme.test");
        let text = render(|w| write_clients(w, std::slice::from_ref(&client)));
        assert!(text.contains("Order history: none"));

        client.record_order(3);
        client.record_order(5);
        let text = render(|w| write_clients(w, &[client]));
        assert!(text.contains("Order history: 3, 5"));
    }

    #[test]
    fn test_scaled_rendering() {
        let text = render(|w| write_scaled(w, &[1.5, -2.0], &[4.5, -6.0]));
        assert!(text.contains("[1.5, -2]"));
        assert!(text.contains("[4.5, -6]"));
    }
}
