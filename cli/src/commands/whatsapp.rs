//! # Luxe WhatsApp Commands
//!
//! File: cli/src/commands/whatsapp.rs
//! Author: Christi Mahu
//!
//! ```bash
//! luxe whatsapp link "Hi, I'd like to book a consultation"
//! luxe whatsapp link --number "+44 20 7946 0000" "Hello" --open
//! luxe whatsapp test
//! luxe whatsapp messages
//! ```
//!
use crate::admin::whatsapp;
use crate::commands::context::CommandContext;
use crate::common::process;
use crate::core::error::{LuxeError, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct WhatsAppArgs {
    #[command(subcommand)]
    command: WhatsAppCommand,
}

#[derive(Subcommand, Debug)]
enum WhatsAppCommand {
    /// Print a wa.me link with the message pre-filled.
    Link {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Destination number (defaults to `[whatsapp] number`).
        #[arg(long)]
        number: Option<String>,
        /// Open the link in the browser.
        #[arg(long)]
        open: bool,
    },
    /// Record a test notification and print the link for the admin test message.
    Test {
        #[arg(long)]
        open: bool,
    },
    /// List the WhatsApp message log.
    Messages,
}

pub fn handle_whatsapp(args: WhatsAppArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        WhatsAppCommand::Link { text, number, open } => {
            let number = number.unwrap_or_else(|| ctx.config.whatsapp.number.clone());
            if !number.chars().any(|c| c.is_ascii_digit()) {
                return Err(
                    LuxeError::Validation(format!("'{}' is not a phone number", number)).into(),
                );
            }
            let link = whatsapp::deep_link(&number, &text.join(" "));
            println!("{}", link);
            if open {
                process::open_url(&link)?;
            }
        }
        WhatsAppCommand::Test { open } => {
            let mut panel = ctx.admin_panel()?;
            let sent = panel.send_whatsapp_test()?;
            println!("Created test notification {}.", sent.notification.id);
            if let Some(link) = sent.whatsapp_link {
                println!("{}", link);
                if open {
                    process::open_url(&link)?;
                }
            }
        }
        WhatsAppCommand::Messages => {
            let panel = ctx.admin_panel()?;
            for m in panel.whatsapp().messages() {
                println!(
                    "{:<16} {:<9} {:<15} {}",
                    m.sender,
                    m.status,
                    m.time,
                    m.message
                );
            }
        }
    }
    Ok(())
}
