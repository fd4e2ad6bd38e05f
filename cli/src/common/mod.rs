//! # Luxe Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared utility modules used by the chatbot, the site forms and the admin panel.
//! They stay separate from domain logic (`chatbot::`, `admin::`, `site::`) and
//! from core infrastructure (`core::`).
//!
//! - **`fs`**: Filesystem helpers (directory creation, atomic writes).
//! - **`ids`**: Monotonic, clock-seeded record ids.
//! - **`process`**: Hands URLs to the platform opener.
//! - **`random`**: Jitter and probability helpers over OS randomness.
//! - **`storage`**: The local-storage-compatible key/value store shared by site and admin.
//!
//! ```rust,ignore
//! use crate::common::storage::{FileStorage, Storage, NOTIFICATIONS_KEY};
//!
//! let storage = FileStorage::new(data_dir);
//! let raw = storage.get_item(NOTIFICATIONS_KEY)?;
//! ```
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Monotonic id generation.
pub mod ids;
/// Launching external programs (URL opener).
pub mod process;
/// Randomness helpers.
pub mod random;
/// Key/value storage with browser-local-storage semantics.
pub mod storage;
