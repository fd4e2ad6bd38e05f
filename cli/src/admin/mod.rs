//! # Luxe Admin Panel (`admin`)
//!
//! File: cli/src/admin/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything behind the admin dashboard:
//!
//! - **`notification`**: the persisted notification record and its filters.
//! - **`store`**: the in-memory list synchronised through the `adminNotifications` key.
//! - **`appointment`**: the in-memory appointment book.
//! - **`conversations`**: chatbot sessions as listed on the dashboard.
//! - **`whatsapp`**: deep links and the message log.
//! - **`settings`**: the flat `adminSettings` object.
//! - **`report`**: date-range counts.
//! - **`poller`**: the refresh loop behind `luxe watch`.
//! - **`panel`**: `AdminPanel`, which owns all of the above for one session.
//!
pub mod appointment;
pub mod conversations;
pub mod notification;
pub mod panel;
pub mod poller;
pub mod report;
pub mod settings;
pub mod store;
pub mod whatsapp;

pub use notification::{Notification, NotificationDraft, NotificationFilter, NotificationType, Priority};
pub use panel::AdminPanel;
pub use store::NotificationStore;
