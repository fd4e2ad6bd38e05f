//! # Notification Read / Delete / Clear
//!
//! File: cli/src/commands/notify/manage.rs
//! Author: Christi Mahu
//!
use crate::admin::store::NotificationStore;
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Id of the notification to mark as read.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    id: Option<u64>,

    /// Mark every notification as read.
    #[arg(long)]
    all: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Id of the notification to delete.
    id: u64,
}

#[derive(Parser, Debug)]
pub struct ClearArgs {}

pub fn handle_read(args: ReadArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    store.load()?;
    match args.id {
        Some(id) => {
            store.mark_read(id)?;
            println!("Marked notification {} as read.", id);
        }
        None => {
            let changed = store.mark_all_read()?;
            println!("Marked {} notification(s) as read.", changed);
        }
    }
    println!("{} unread.", store.unread_count());
    Ok(())
}

pub fn handle_delete(args: DeleteArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    store.load()?;
    let removed = store.delete(args.id)?;
    println!("Deleted notification {} ({}).", removed.id, removed.title);
    Ok(())
}

pub fn handle_clear(_args: ClearArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    store.load()?;
    let count = store.all().len();
    store.clear_all()?;
    info!("Cleared {} notifications", count);
    println!("All notifications cleared.");
    Ok(())
}
