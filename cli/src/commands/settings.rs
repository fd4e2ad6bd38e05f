//! # Luxe Settings Commands
//!
//! File: cli/src/commands/settings.rs
//! Author: Christi Mahu
//!
//! `luxe settings save key=value...` replaces the stored admin settings;
//! `luxe settings show` prints them.
//!
use crate::admin::settings::AdminSettings;
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the stored settings.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Replace the stored settings with the given entries.
    Save {
        /// `key=value` pairs; `true`/`false` are stored as booleans.
        #[arg(required = true, num_args = 1..)]
        entries: Vec<String>,
    },
}

pub fn handle_settings(args: SettingsArgs, ctx: &CommandContext) -> Result<()> {
    let storage = ctx.storage()?;
    match args.command {
        SettingsCommand::Show { json } => {
            let settings = AdminSettings::load(&storage)?;
            if json {
                let out = serde_json::to_string_pretty(&settings)
                    .context("Failed to encode settings")?;
                println!("{}", out);
            } else if settings.is_empty() {
                println!("No settings saved.");
            } else {
                for (key, value) in settings.iter() {
                    println!("{} = {}", key, value);
                }
            }
        }
        SettingsCommand::Save { entries } => {
            let settings = AdminSettings::from_pairs(&entries)?;
            settings.save(&storage)?;
            println!("Settings saved successfully!");
        }
    }
    Ok(())
}
