//! # Luxe Public Site (`site`)
//!
//! File: cli/src/site/mod.rs
//! Author: Christi Mahu
//!
//! Producers on the public site: the forms whose submissions become admin
//! notifications.
//!
pub mod forms;
