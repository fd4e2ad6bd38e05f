//! # Luxe Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the command groups of the `luxe` CLI. Each module
//! defines its clap argument structs and a `handle_*` function; `main.rs`
//! routes to them.
//!
//! ## Command Groups
//!
//! - `chat`: `chat` (interactive) and `ask` (one-shot)
//! - `forms`: `contact`, `book`, `callback`, `newsletter`
//! - `notify`: notification store management
//! - `watch`: live polling of the notification store
//! - `appointments`: the appointment table
//! - `conversations`: chatbot sessions seen by the admin panel
//! - `whatsapp`: deep links and the message log
//! - `settings`: admin settings
//! - `export`: `export` and `report`
//!
//! Every handler receives the [`context::CommandContext`] built once in `main`.
//!

pub mod appointments;
pub mod chat;
pub mod context;
pub mod conversations;
pub mod export;
pub mod forms;
pub mod notify;
pub mod settings;
pub mod watch;
pub mod whatsapp;
