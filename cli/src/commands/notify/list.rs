//! # Notification Listing
//!
//! File: cli/src/commands/notify/list.rs
//! Author: Christi Mahu
//!
//! Prints the admin view of the store, newest first, with the unread badge.
//! With an empty store the dashboard's mock rows are shown instead.
//!
use crate::admin::notification::{Notification, NotificationFilter};
use crate::admin::store::{LoadOutcome, NotificationStore};
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// `all`, `unread`, or a notification type (contact, chatbot, ...).
    #[arg(long, short, default_value = "all")]
    filter: NotificationFilter,

    /// Print the matching records as a JSON array.
    #[arg(long)]
    json: bool,
}

pub fn handle_list(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    let outcome = store.load()?;
    let shown = store.filter(args.filter);

    if args.json {
        let json = serde_json::to_string_pretty(&shown).context("Failed to encode notifications")?;
        println!("{}", json);
        return Ok(());
    }

    if outcome == LoadOutcome::Seeded {
        println!("(no stored notifications, showing sample data)");
    }
    println!(
        "{} notification(s), {} unread",
        store.all().len(),
        store.unread_count()
    );
    if shown.is_empty() {
        println!("No notifications match '{:?}'.", args.filter);
        return Ok(());
    }
    let now = Utc::now();
    for n in shown {
        println!("{}", format_row(n, now));
    }
    Ok(())
}

fn format_row(n: &Notification, now: DateTime<Utc>) -> String {
    let marker = if n.read { ' ' } else { '*' };
    format!(
        "{} {:<15} [{:<11}] {:<6} {} - {} ({})",
        marker,
        n.id,
        n.kind,
        n.priority,
        n.title,
        n.message,
        n.display_time(now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::notification::{default_notifications, NotificationType};

    #[test]
    fn parses_filter_values() {
        let args = ListArgs::try_parse_from(["list", "--filter", "callback"]).unwrap();
        assert_eq!(args.filter, NotificationFilter::Type(NotificationType::Callback));
        let args = ListArgs::try_parse_from(["list"]).unwrap();
        assert_eq!(args.filter, NotificationFilter::All);
        assert!(ListArgs::try_parse_from(["list", "-f", "bogus"]).is_err());
    }

    #[test]
    fn row_marks_unread() {
        let mut n = default_notifications().remove(1);
        let row = format_row(&n, Utc::now());
        assert!(row.starts_with("* 2"));
        assert!(row.contains("Appointment Confirmed"));
        n.read = true;
        assert!(format_row(&n, Utc::now()).starts_with("  2"));
    }
}
