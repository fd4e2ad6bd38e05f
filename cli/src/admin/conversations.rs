//! # Luxe Chatbot Conversation Log
//!
//! File: cli/src/admin/conversations.rs
//! Author: Christi Mahu
//!
//! The admin panel's list of chatbot conversations. It holds three mock rows plus
//! one row per finished chat session. Sessions reach the panel only as `chatbot`
//! notifications (the site forwards a summary when the widget closes), so the
//! log is rebuilt from the store whenever the panel loads.
//!
use crate::admin::notification::{Notification, NotificationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const VISITOR: &str = "Website Visitor";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: u64,
    pub user: String,
    pub preview: String,
    pub time: String,
    pub messages: usize,
}

impl ConversationSummary {
    /// Row for a forwarded chat session, or `None` for any other notification.
    pub fn from_session(n: &Notification, now: DateTime<Utc>) -> Option<Self> {
        if n.kind != NotificationType::Chatbot {
            return None;
        }
        let data = n.data.as_ref()?;
        let preview = data.get("firstQuestion")?.as_str()?.to_string();
        let turns = data.get("userTurns").and_then(|v| v.as_u64()).unwrap_or(1);
        // Older summaries lack the total; each user turn got one reply.
        let messages = data
            .get("messages")
            .and_then(|v| v.as_u64())
            .unwrap_or(turns * 2);
        Some(Self {
            id: n.id,
            user: VISITOR.to_string(),
            preview,
            time: n.display_time(now),
            messages: usize::try_from(messages).unwrap_or(usize::MAX),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationLog {
    conversations: Vec<ConversationSummary>,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ConversationLog {
    pub fn seeded() -> Self {
        let row = |id, user: &str, preview: &str, time: &str, messages| ConversationSummary {
            id,
            user: user.to_string(),
            preview: preview.to_string(),
            time: time.to_string(),
            messages,
        };
        Self {
            conversations: vec![
                row(1, "Anonymous User", "Tell me about your services", "2 minutes ago", 5),
                row(2, "Sarah Johnson", "What are your prices?", "15 minutes ago", 8),
                row(3, "John Smith", "Book a consultation", "1 hour ago", 12),
            ],
        }
    }

    /// The mock rows with the sessions found in `notifications` on top, newest first.
    pub fn with_sessions(notifications: &[Notification], now: DateTime<Utc>) -> Self {
        let mut log = Self::seeded();
        let sessions: Vec<_> = notifications
            .iter()
            .filter_map(|n| ConversationSummary::from_session(n, now))
            .collect();
        log.conversations.splice(0..0, sessions);
        log
    }

    pub fn all(&self) -> &[ConversationSummary] {
        &self.conversations
    }
}
