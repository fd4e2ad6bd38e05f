//! # Notification Test and Debug
//!
//! File: cli/src/commands/notify/diagnostics.rs
//! Author: Christi Mahu
//!
//! Troubleshooting helpers for the site-to-admin hand-off: `test` writes a
//! recognisable record, `debug` shows whether storage and the loaded view agree.
//!
use crate::admin::store::NotificationStore;
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct TestArgs {}

#[derive(Parser, Debug)]
pub struct DebugArgs {
    /// Also print the raw stored value.
    #[arg(long)]
    raw: bool,
}

pub fn handle_test(_args: TestArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    store.load()?;
    let n = store.create_test_notification()?;
    println!("Created test notification {}.", n.id);
    Ok(())
}

pub fn handle_debug(args: DebugArgs, ctx: &CommandContext) -> Result<()> {
    let storage = ctx.storage()?;
    println!("Storage file: {}", storage.path().display());

    let mut store = NotificationStore::new(storage);
    let outcome = store.load()?;
    let snapshot = store.debug_snapshot()?;

    println!("Load outcome: {:?}", outcome);
    println!("In memory:    {}", snapshot.in_memory);
    println!("Unread:       {}", snapshot.unread);
    println!("Stored:       {}", snapshot.stored);
    match (&snapshot.raw, args.raw) {
        (None, _) => println!("Raw value:    (key not set)"),
        (Some(raw), true) => println!("Raw value:    {}", raw),
        (Some(raw), false) => println!("Raw value:    {} bytes (use --raw to print)", raw.len()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raw_flag() {
        assert!(DebugArgs::try_parse_from(["debug", "--raw"]).unwrap().raw);
        assert!(TestArgs::try_parse_from(["test", "extra"]).is_err());
    }
}
