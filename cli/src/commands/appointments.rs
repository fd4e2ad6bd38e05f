//! # Luxe Appointment Commands
//!
//! File: cli/src/commands/appointments.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The dashboard's appointment table. The book lives in memory and starts from
//! the sample rows on every run, so changes last for one invocation; `add`
//! is mainly useful for the WhatsApp announcement it produces.
//!
//! ```bash
//! luxe appointments list --status pending
//! luxe appointments add --client "Ana" --email ana@example.com --phone 555 \
//!     --service Consultation --date 2024-02-01 --time 10:00 --open
//! luxe appointments status 2 confirmed
//! ```
//!
use crate::admin::appointment::{Appointment, AppointmentStatus, NewAppointment, StatusFilter};
use crate::commands::context::CommandContext;
use crate::common::process;
use crate::core::error::{LuxeError, Result};
use crate::site::forms;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct AppointmentsArgs {
    #[command(subcommand)]
    command: AppointmentsCommand,
}

#[derive(Subcommand, Debug)]
enum AppointmentsCommand {
    /// List appointments.
    #[command(alias = "ls")]
    List {
        /// `all`, `pending`, `confirmed` or `completed`.
        #[arg(long, short, default_value = "all")]
        status: StatusFilter,
    },
    /// Schedule an appointment and print its WhatsApp announcement link.
    Add(AddArgs),
    /// Delete an appointment by id.
    #[command(alias = "rm")]
    Delete { id: u64 },
    /// Change an appointment's status.
    Status { id: u64, status: AppointmentStatus },
}

#[derive(Parser, Debug)]
struct AddArgs {
    #[arg(long)]
    client: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    service: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,
    /// HH:MM
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,
    #[arg(long, default_value = "")]
    notes: String,
    /// Open the WhatsApp link in the browser.
    #[arg(long)]
    open: bool,
}

fn parse_time(raw: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{}' (expected HH:MM)", raw))
}

pub fn handle_appointments(args: AppointmentsArgs, ctx: &CommandContext) -> Result<()> {
    let mut panel = ctx.admin_panel()?;
    match args.command {
        AppointmentsCommand::List { status } => {
            let rows = panel.appointments().filter(status);
            if rows.is_empty() {
                println!("No appointments.");
            }
            for a in rows {
                println!("{}", format_row(a));
            }
        }
        AppointmentsCommand::Add(add) => {
            if !forms::is_valid_email(&add.email) {
                return Err(LuxeError::Validation(forms::INVALID_EMAIL.to_string()).into());
            }
            let (appointment, link) = panel.add_appointment(NewAppointment {
                client: add.client,
                email: add.email,
                phone: add.phone,
                service: add.service,
                date: add.date,
                time: add.time,
                notes: add.notes,
            })?;
            println!("Scheduled appointment {}.", appointment.id);
            println!("{}", format_row(&appointment));
            println!("WhatsApp: {}", link);
            if add.open {
                process::open_url(&link)?;
            }
        }
        AppointmentsCommand::Delete { id } => {
            let removed = panel.appointments_mut().delete(id)?;
            println!("Deleted appointment {} ({}).", removed.id, removed.client);
        }
        AppointmentsCommand::Status { id, status } => {
            let updated = panel.appointments_mut().set_status(id, status)?;
            println!("{}", format_row(updated));
        }
    }
    Ok(())
}

fn format_row(a: &Appointment) -> String {
    format!(
        "{:<15} {} {} {:<10} {:<20} {} <{}> via {}",
        a.id,
        a.date.format("%Y-%m-%d"),
        a.time.format("%H:%M"),
        a.status,
        a.service,
        a.client,
        a.email,
        a.source
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_subcommand() {
        let args = AppointmentsArgs::try_parse_from(["appointments", "status", "2", "confirmed"]).unwrap();
        match args.command {
            AppointmentsCommand::Status { id, status } => {
                assert_eq!(id, 2);
                assert_eq!(status, AppointmentStatus::Confirmed);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(AppointmentsArgs::try_parse_from(["appointments", "status", "2", "cancelled"]).is_err());
    }

    #[test]
    fn add_parses_date_and_time() {
        let args = AppointmentsArgs::try_parse_from([
            "appointments", "add", "--client", "Ana", "--email", "ana@example.com", "--phone", "1",
            "--service", "Consultation", "--date", "2024-02-01", "--time", "09:30",
        ])
        .unwrap();
        let AppointmentsCommand::Add(add) = args.command else {
            panic!("expected add");
        };
        assert_eq!(add.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(add.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn bad_time_rejected() {
        assert!(parse_time("9.30").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("14:00:00").is_ok());
    }
}
