//! # Luxe Notification Commands
//!
//! File: cli/src/commands/notify/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `luxe notify` works on the shared `adminNotifications` key the same way the
//! admin dashboard does: every subcommand loads the current array, applies one
//! change and writes it back.
//!
//! ## Subcommands
//!
//! - `list`: show notifications, optionally filtered (`--filter unread|<type>`)
//! - `create`: send a notification, optionally forwarded to WhatsApp
//! - `read`: mark one notification (or `--all`) as read
//! - `delete`: remove one notification by id
//! - `clear`: remove every notification
//! - `test`: create the admin test notification
//! - `debug`: compare the in-memory view with what is stored
//!
//! ```bash
//! luxe notify list --filter unread
//! luxe notify create --type system --title "Heads up" --message "New gallery online" --whatsapp
//! luxe notify read 1700000000123
//! ```
//!
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod create;
mod diagnostics;
mod list;
mod manage;

#[derive(Parser, Debug)]
pub struct NotifyArgs {
    #[command(subcommand)]
    command: NotifyCommand,
}

#[derive(Subcommand, Debug)]
enum NotifyCommand {
    /// List notifications with the unread badge count.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Create a notification from the admin side.
    Create(create::CreateArgs),
    /// Mark notifications as read.
    Read(manage::ReadArgs),
    /// Delete a notification by id.
    #[command(alias = "rm")]
    Delete(manage::DeleteArgs),
    /// Delete every notification and the stored key.
    Clear(manage::ClearArgs),
    /// Create the admin test notification.
    Test(diagnostics::TestArgs),
    /// Show raw storage next to the loaded view.
    Debug(diagnostics::DebugArgs),
}

pub async fn handle_notify(args: NotifyArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        NotifyCommand::List(args) => list::handle_list(args, ctx),
        NotifyCommand::Create(args) => create::handle_create(args, ctx),
        NotifyCommand::Read(args) => manage::handle_read(args, ctx),
        NotifyCommand::Delete(args) => manage::handle_delete(args, ctx),
        NotifyCommand::Clear(args) => manage::handle_clear(args, ctx),
        NotifyCommand::Test(args) => diagnostics::handle_test(args, ctx),
        NotifyCommand::Debug(args) => diagnostics::handle_debug(args, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_subcommand() {
        let cases: &[&[&str]] = &[
            &["notify", "list"],
            &["notify", "ls", "--filter", "unread"],
            &["notify", "create", "--title", "T", "--message", "M"],
            &["notify", "read", "--all"],
            &["notify", "rm", "5"],
            &["notify", "clear"],
            &["notify", "test"],
            &["notify", "debug"],
        ];
        for argv in cases {
            assert!(NotifyArgs::try_parse_from(*argv).is_ok(), "{:?}", argv);
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(NotifyArgs::try_parse_from(["notify", "archive"]).is_err());
    }
}
