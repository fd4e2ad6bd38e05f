//! # Luxe Export and Report Commands
//!
//! File: cli/src/commands/export.rs
//! Author: Christi Mahu
//!
//! ```bash
//! luxe export --out ./backups      # writes luxe-interiors-data-YYYY-MM-DD.json
//! luxe report --start 2024-01-01 --end 2024-01-31
//! ```
//!
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Export notifications, appointments, messages and settings as JSON")]
pub struct ExportArgs {
    /// Directory to write the export into.
    #[arg(long, short, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Count activity between two dates")]
pub struct ReportArgs {
    /// First day (YYYY-MM-DD), inclusive.
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD), inclusive.
    #[arg(long)]
    end: Option<NaiveDate>,
    #[arg(long)]
    json: bool,
}

pub fn handle_export(args: ExportArgs, ctx: &CommandContext) -> Result<()> {
    let panel = ctx.admin_panel()?;
    let path = panel.export_to(&args.out, Local::now().date_naive())?;
    println!("Data exported to {}", path.display());
    Ok(())
}

pub fn handle_report(args: ReportArgs, ctx: &CommandContext) -> Result<()> {
    let panel = ctx.admin_panel()?;
    let report = panel.report(args.start, args.end)?;

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", out);
        return Ok(());
    }

    println!("Report {} to {}", report.start, report.end);
    println!("Appointments: {}", report.total_appointments());
    for (status, count) in &report.appointments {
        println!("  {:<10} {}", status, count);
    }
    println!("Notifications: {}", report.total_notifications());
    for (kind, count) in &report.notifications {
        println!("  {:<11} {}", kind, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_dates_are_optional_at_parse_time() {
        // Missing dates are reported by the report itself with the form message.
        let args = ReportArgs::try_parse_from(["report", "--start", "2024-01-01"]).unwrap();
        assert_eq!(args.end, None);
        assert!(ReportArgs::try_parse_from(["report", "--start", "01/01/2024"]).is_err());
    }

    #[test]
    fn export_defaults_to_cwd() {
        let args = ExportArgs::try_parse_from(["export"]).unwrap();
        assert_eq!(args.out, PathBuf::from("."));
    }
}
