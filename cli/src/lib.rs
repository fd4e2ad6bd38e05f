//! # Luxe Library Root
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The engine behind the Luxe Interiors site, usable from the `luxe` binary
//! and from tests:
//! - `chatbot`: keyword response matcher and conversation controller
//! - `site`: public forms that produce admin notifications
//! - `admin`: notification store, appointments, WhatsApp hand-off, settings, reports
//! - `commands`: the clap command tree the binary dispatches into
//! - `common` / `core`: storage, ids, randomness, configuration and errors
//!
pub mod admin;
pub mod chatbot;
pub mod commands;
pub mod common;
pub mod core;
pub mod site;
