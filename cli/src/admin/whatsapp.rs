//! # Luxe WhatsApp Hand-off
//!
//! File: cli/src/admin/whatsapp.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! There is no WhatsApp API integration. "Sending" a message means building a
//! `https://wa.me/<number>?text=<message>` deep link and handing it to the
//! user's browser. Sent messages are also recorded in an in-memory log so the
//! admin panel can list them next to the mock inbound ones.
//!
//! The text is encoded the way `encodeURIComponent` would encode it. In
//! particular a space becomes `%20`, not `+`.
//!
use crate::common::ids::IdGenerator;
use crate::core::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

const WA_BASE: &str = "https://wa.me/";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Deep link for `number` with the message pre-filled.
///
/// Only the digits of `number` are kept (`+1 (555) 123-4567` → `15551234567`).
pub fn deep_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}{}?text={}", WA_BASE, digits, encode_component(text))
}

/// Percent-encodes like JS `encodeURIComponent`.
fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Multi-line message used by the admin "test WhatsApp" action.
pub fn admin_test_message(now: DateTime<Local>) -> String {
    format!(
        "\u{1F514} *ADMIN PANEL TEST*\n\n\
         This is a test WhatsApp notification from the admin panel.\n\n\
         \u{1F4C5} *Time:* {}\n\
         \u{1F527} *Source:* Admin Panel\n\n\
         This confirms the WhatsApp integration is working properly.",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Received,
    Read,
    Sent,
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MessageStatus::Received => "received",
            MessageStatus::Read => "read",
            MessageStatus::Sent => "sent",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppMessage {
    pub id: u64,
    pub sender: String,
    pub message: String,
    pub time: String,
    pub status: MessageStatus,
}

/// Inbound mock messages plus anything sent during this session.
#[derive(Debug)]
pub struct WhatsAppLog {
    messages: Vec<WhatsAppMessage>,
    ids: IdGenerator,
}

impl Default for WhatsAppLog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl WhatsAppLog {
    pub fn seeded() -> Self {
        let ids = IdGenerator::new();
        let msg = |id: u64, sender: &str, message: &str, time: &str, status| WhatsAppMessage {
            id,
            sender: sender.into(),
            message: message.into(),
            time: time.into(),
            status,
        };
        let messages = vec![
            msg(
                1,
                "Sarah Johnson",
                "Hi, I'm interested in booking a consultation",
                "2 minutes ago",
                MessageStatus::Received,
            ),
            msg(
                2,
                "Michael Chen",
                "Thank you for the appointment confirmation",
                "15 minutes ago",
                MessageStatus::Read,
            ),
            msg(
                3,
                "Emily Rodriguez",
                "Can you send me the color palette options?",
                "1 hour ago",
                MessageStatus::Sent,
            ),
        ];
        ids.observe(3);
        Self { messages, ids }
    }

    pub fn messages(&self) -> &[WhatsAppMessage] {
        &self.messages
    }

    /// Records an outgoing admin message at the top of the log.
    pub fn record_outgoing(&mut self, text: &str) -> Result<&WhatsAppMessage> {
        self.messages.insert(
            0,
            WhatsAppMessage {
                id: self.ids.next_id()?,
                sender: "Admin".to_string(),
                message: text.to_string(),
                time: "Just now".to_string(),
                status: MessageStatus::Sent,
            },
        );
        Ok(&self.messages[0])
    }
}
