//! # Luxe Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types shared by the chatbot engine, the
//! notification store and the admin panel. It follows a two-layer approach:
//! - `LuxeError`: a `thiserror` enum for the failures callers may want to match on
//! - `Result<T>`: a type alias for `anyhow::Result<T>` for flexible propagation with context
//!
//! The error types cover:
//! - Configuration and storage failures
//! - Form validation failures (shown to the user verbatim)
//! - Chat turn-taking violations (closed widget, reply pending, used quick replies)
//! - Lookups by id that found nothing
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if form.email.trim().is_empty() {
//!     return Err(LuxeError::Validation(MISSING_FIELDS.into()).into());
//! }
//!
//! // Pattern matching on error types
//! match store.delete(id) {
//!     Err(e) if matches!(e.downcast_ref::<LuxeError>(), Some(LuxeError::NotificationNotFound { .. })) => {
//!         println!("Nothing to delete.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Luxe engine.
#[derive(Error, Debug)]
pub enum LuxeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Carries the exact user-facing message ("Please fill in all fields.").
    #[error("{0}")]
    Validation(String),

    #[error("Notification {id} not found.")]
    NotificationNotFound { id: u64 },

    #[error("Appointment {id} not found.")]
    AppointmentNotFound { id: u64 },

    #[error("The chat window is closed. Open it before sending a message.")]
    ChatClosed,

    #[error("Please wait for the assistant to finish replying.")]
    ReplyPending,

    #[error("Message cannot be empty.")]
    EmptyInput,

    #[error("Quick reply '{label}' is no longer available.")]
    QuickReplyUnavailable { label: String },

    #[error("No record ids left after {last}.")]
    IdsExhausted { last: u64 },

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

/// Returns true when `err` wraps the given `LuxeError` variant shape.
///
/// Used at the CLI boundary to decide whether an error is a known,
/// user-facing validation failure or something worth logging in full.
pub fn is_validation(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<LuxeError>(), Some(LuxeError::Validation(_)))
}
