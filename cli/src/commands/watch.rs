//! # Luxe Watch Command
//!
//! File: cli/src/commands/watch.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `luxe watch` is the admin dashboard's live view: it polls the shared
//! notification key and prints a line whenever the total or unread count
//! changes. Run it next to `luxe contact` / `luxe chat` in another terminal to
//! see site submissions arrive.
//!
//! ```bash
//! luxe watch                 # until Ctrl-C
//! luxe watch --ticks 12      # one minute at the default 5 s interval
//! luxe watch --simulate      # add random "New Activity" records
//! ```
//!
use crate::admin::poller::{self, WatchOptions, WatchUpdate};
use crate::admin::store::NotificationStore;
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use clap::Parser;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(about = "Watch the notification store for changes")]
pub struct WatchArgs {
    /// Stop after this many polls.
    #[arg(long)]
    ticks: Option<u64>,

    /// Poll interval in seconds (overrides `[admin] poll_interval_secs`).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Run the activity simulation (overrides `[admin] simulate_activity`).
    #[arg(long)]
    simulate: bool,
}

pub async fn handle_watch(args: WatchArgs, ctx: &CommandContext) -> Result<()> {
    let mut admin = ctx.config.admin.clone();
    if let Some(secs) = args.interval {
        admin.poll_interval_secs = secs;
    }
    admin.simulate_activity |= args.simulate;
    let options = WatchOptions::from_config(&admin, args.ticks);

    let mut store = NotificationStore::new(ctx.storage()?);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        ctx.data_dir().display(),
        options.poll_interval.as_secs()
    );
    let summary = poller::watch(&mut store, &options, shutdown, |update| {
        println!("{}", describe(update));
    })
    .await?;

    println!(
        "Stopped after {} poll(s), {} change(s) seen.",
        summary.ticks, summary.changes
    );
    Ok(())
}

fn describe(update: &WatchUpdate) -> String {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    match update {
        WatchUpdate::Changed { total, unread } => {
            format!("[{}] {} notification(s), {} unread", stamp, total, unread)
        }
        WatchUpdate::Simulated(n) => {
            format!("[{}] simulated {} notification {}", stamp, n.kind, n.id)
        }
    }
}
