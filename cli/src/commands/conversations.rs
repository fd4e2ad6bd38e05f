//! # Luxe Conversations Command
//!
//! File: cli/src/commands/conversations.rs
//! Author: Christi Mahu
//!
//! `luxe conversations` lists chatbot sessions the way the dashboard does:
//! sessions forwarded by `luxe chat` first, then the sample rows.
//!
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ConversationsArgs {
    /// Print the rows as JSON.
    #[arg(long)]
    json: bool,
}

pub fn handle_conversations(args: ConversationsArgs, ctx: &CommandContext) -> Result<()> {
    let panel = ctx.admin_panel()?;
    let rows = panel.conversations().all();
    if args.json {
        let out = serde_json::to_string_pretty(rows).context("Failed to encode conversations")?;
        println!("{}", out);
        return Ok(());
    }
    for c in rows {
        println!(
            "{:<16} {:<15} {:>3} messages  {}",
            c.user, c.time, c.messages, c.preview
        );
    }
    Ok(())
}
