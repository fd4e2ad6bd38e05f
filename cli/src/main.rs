//! # Luxe Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `luxe` CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration once and routing to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command is a variant in the `Commands` enum
//! - Variants map to `handle_*` functions in `luxe::commands`
//! - All errors are propagated to this level, printed as `Error: ...`, and exit with status 1
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! luxe --help
//!
//! # Ask the assistant something
//! luxe ask "How much does a living room redesign cost?"
//!
//! # Use a throwaway data directory with debug logs
//! luxe -vv --data-dir /tmp/luxe notify list
//! ```
//!
use clap::{Parser, Subcommand};
use luxe::commands::{self, context::CommandContext};
use luxe::core::error;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "luxe",
    about = "Luxe Interiors: chat assistant, site forms and admin panel",
    long_about = "Chat with the Luxe Interiors assistant, submit the site's forms, and manage\n\
                  the admin notifications, appointments, WhatsApp hand-off and settings.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding local_storage.json (overrides `[storage] directory`).
    #[arg(long, global = true, env = "LUXE_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Chat(commands::chat::ChatArgs),
    Ask(commands::chat::AskArgs),
    /// Manage admin notifications.
    #[command(alias = "n")]
    Notify(commands::notify::NotifyArgs),
    Watch(commands::watch::WatchArgs),
    Contact(commands::forms::ContactArgs),
    Book(commands::forms::BookArgs),
    Callback(commands::forms::CallbackArgs),
    Newsletter(commands::forms::NewsletterArgs),
    /// Manage appointments.
    #[command(alias = "a")]
    Appointments(commands::appointments::AppointmentsArgs),
    /// List chatbot conversations.
    #[command(alias = "conv")]
    Conversations(commands::conversations::ConversationsArgs),
    /// WhatsApp links and messages.
    #[command(alias = "wa")]
    Whatsapp(commands::whatsapp::WhatsAppArgs),
    /// Show or save admin settings.
    Settings(commands::settings::SettingsArgs),
    Export(commands::export::ExportArgs),
    Report(commands::export::ReportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = run(cli).await;

    if let Err(e) = command_result {
        if error::is_validation(&e) {
            tracing::debug!("Validation failed: {}", e);
        } else {
            tracing::error!("Command execution failed: {:?}", e);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> error::Result<()> {
    // `ask` and `newsletter` touch neither configuration nor storage.
    let command = match cli.command {
        Commands::Ask(args) => return commands::chat::handle_ask(args).await,
        Commands::Newsletter(args) => return commands::forms::handle_newsletter(args),
        other => other,
    };

    let ctx = CommandContext::load(cli.data_dir)?;
    match command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &ctx).await,
        Commands::Notify(args) => commands::notify::handle_notify(args, &ctx).await,
        Commands::Watch(args) => commands::watch::handle_watch(args, &ctx).await,
        Commands::Contact(args) => commands::forms::handle_contact(args, &ctx),
        Commands::Book(args) => commands::forms::handle_book(args, &ctx),
        Commands::Callback(args) => commands::forms::handle_callback(args, &ctx),
        Commands::Appointments(args) => commands::appointments::handle_appointments(args, &ctx),
        Commands::Conversations(args) => {
            commands::conversations::handle_conversations(args, &ctx)
        }
        Commands::Whatsapp(args) => commands::whatsapp::handle_whatsapp(args, &ctx),
        Commands::Settings(args) => commands::settings::handle_settings(args, &ctx),
        Commands::Export(args) => commands::export::handle_export(args, &ctx),
        Commands::Report(args) => commands::export::handle_report(args, &ctx),
        Commands::Ask(_) | Commands::Newsletter(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn luxe_cmd() -> Command {
        Command::cargo_bin("luxe").expect("Failed to find luxe binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        luxe_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("notify"));
    }

    #[test]
    fn test_main_version_flag() {
        luxe_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
