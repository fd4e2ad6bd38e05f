//! # Luxe Site Forms
//!
//! File: cli/src/site/forms.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The producer side of the notification hand-off. Each public form on the
//! site is validated here and, on success, turned into a [`NotificationDraft`]
//! that the caller writes to the shared store.
//!
//! | form | notification type | priority |
//! |------|-------------------|----------|
//! | contact | `contact` | medium |
//! | appointment request | `appointment` | high |
//! | callback request | `callback` | high |
//! | chat session | `chatbot` | medium |
//! | newsletter | none | |
//!
//! Validation errors are `LuxeError::Validation` carrying the message shown to
//! the visitor.
//!
use crate::admin::notification::{NotificationDraft, NotificationType, Priority};
use crate::chatbot::SessionSummary;
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use serde::Serialize;
use serde_json::json;

pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const CONTACT_THANKS: &str = "Thank you for your message! We will get back to you soon.";
pub const NEWSLETTER_THANKS: &str = "Thank you for subscribing to our newsletter!";
pub const APPOINTMENT_THANKS: &str =
    "Thank you! Your appointment request has been received. We will confirm shortly.";
pub const CALLBACK_THANKS: &str = "Thank you! We will call you back soon.";

/// Loose shape check: one `@`, something before it, and a dotted domain after it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn require(fields: &[&str]) -> Result<()> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(LuxeError::Validation(MISSING_FIELDS.to_string()).into());
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    if !is_valid_email(email.trim()) {
        return Err(LuxeError::Validation(INVALID_EMAIL.to_string()).into());
    }
    Ok(())
}

fn payload<T: Serialize>(form: &T) -> Result<serde_json::Value> {
    serde_json::to_value(form).context("Failed to encode form payload")
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ContactForm {
    pub fn validate(&self) -> Result<()> {
        require(&[&self.name, &self.email, &self.message])?;
        require_email(&self.email)
    }

    pub fn into_notification(self) -> Result<NotificationDraft> {
        self.validate()?;
        let message = match non_blank(&self.service) {
            Some(service) => format!("New inquiry from {} regarding {}.", self.name.trim(), service),
            None => format!("New inquiry from {}.", self.name.trim()),
        };
        Ok(
            NotificationDraft::new(NotificationType::Contact, "Contact Form Submission", message)
                .priority(Priority::Medium)
                .data(payload(&self)?),
        )
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentRequest {
    pub fn validate(&self) -> Result<()> {
        require(&[
            &self.name,
            &self.email,
            &self.phone,
            &self.service,
            &self.date,
            &self.time,
        ])?;
        require_email(&self.email)
    }

    pub fn into_notification(self) -> Result<NotificationDraft> {
        self.validate()?;
        let message = format!(
            "{} requested {} on {} at {}.",
            self.name.trim(),
            self.service.trim(),
            self.date.trim(),
            self.time.trim()
        );
        Ok(NotificationDraft::new(
            NotificationType::Appointment,
            "New Appointment Request",
            message,
        )
        .priority(Priority::High)
        .data(payload(&self)?))
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
}

impl CallbackRequest {
    pub fn validate(&self) -> Result<()> {
        require(&[&self.name, &self.phone])
    }

    pub fn into_notification(self) -> Result<NotificationDraft> {
        self.validate()?;
        let message = match non_blank(&self.preferred_time) {
            Some(when) => format!("{} asked for a call back at {} ({}).", self.name.trim(), self.phone.trim(), when),
            None => format!("{} asked for a call back at {}.", self.name.trim(), self.phone.trim()),
        };
        Ok(
            NotificationDraft::new(NotificationType::Callback, "Callback Request", message)
                .priority(Priority::High)
                .data(payload(&self)?),
        )
    }
}

/// Newsletter sign-up. Validated only.
pub fn subscribe_newsletter(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(LuxeError::Validation(INVALID_EMAIL.to_string()).into());
    }
    require_email(email)
}

/// Notification sent when a chat session with at least one user turn ends.
pub fn chat_session_notification(summary: &SessionSummary) -> NotificationDraft {
    let message = if summary.user_turns == 1 {
        format!("Visitor asked: \"{}\"", summary.first_question)
    } else {
        format!(
            "Visitor sent {} messages, starting with \"{}\"",
            summary.user_turns, summary.first_question
        )
    };
    NotificationDraft::new(NotificationType::Chatbot, "Chatbot Conversation Completed", message)
        .priority(Priority::Medium)
        .data(json!({
            "userTurns": summary.user_turns,
            "messages": summary.messages,
            "firstQuestion": summary.first_question,
            "lastQuestion": summary.last_question,
        }))
}
