//! # Luxe Notification Records
//!
//! File: cli/src/admin/notification.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The admin-facing record of a site event (form submission, chatbot session,
//! system message). Records travel as a JSON array under the `adminNotifications`
//! storage key. Field names stay camelCase with a `type` discriminator so that
//! arrays written by other producers load unchanged:
//!
//! ```json
//! {"id":1700000000000,"type":"contact","title":"Contact Form Submission",
//!  "message":"New inquiry from John Smith","time":"Just now","priority":"medium",
//!  "read":false,"data":{"email":"john@example.com"}}
//! ```
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source category of a notification.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Chatbot,
    Appointment,
    Contact,
    System,
    Callback,
    Whatsapp,
    Test,
}

impl NotificationType {
    pub const ALL: [NotificationType; 7] = [
        NotificationType::Chatbot,
        NotificationType::Appointment,
        NotificationType::Contact,
        NotificationType::System,
        NotificationType::Callback,
        NotificationType::Whatsapp,
        NotificationType::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Chatbot => "chatbot",
            NotificationType::Appointment => "appointment",
            NotificationType::Contact => "contact",
            NotificationType::System => "system",
            NotificationType::Callback => "callback",
            NotificationType::Whatsapp => "whatsapp",
            NotificationType::Test => "test",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| {
                format!(
                    "unknown notification type '{}' (expected one of: chatbot, appointment, contact, system, callback, whatsapp, test)",
                    s
                )
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium or high)",
                other
            )),
        }
    }
}

/// A persisted notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    /// Display label written by the producer ("Just now", "2 minutes ago").
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub read: bool,
    /// Arbitrary producer payload (form fields, session details).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "sendWhatsApp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub send_whatsapp: Option<bool>,
}

impl Notification {
    /// Relative age when a timestamp is known, otherwise the stored label.
    pub fn display_time(&self, now: DateTime<Utc>) -> String {
        match self.created_at {
            Some(created) => relative_label(now - created),
            None => self.time.clone(),
        }
    }
}

fn relative_label(age: chrono::Duration) -> String {
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };
    if age.num_minutes() < 1 {
        "Just now".to_string()
    } else if age.num_hours() < 1 {
        plural(age.num_minutes(), "minute")
    } else if age.num_days() < 1 {
        plural(age.num_hours(), "hour")
    } else {
        plural(age.num_days(), "day")
    }
}

/// Everything a producer supplies; the store assigns id, time and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub data: Option<serde_json::Value>,
    pub send_whatsapp: bool,
}

impl NotificationDraft {
    pub fn new(kind: NotificationType, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            priority: Priority::Medium,
            data: None,
            send_whatsapp: false,
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn send_whatsapp(mut self, send: bool) -> Self {
        self.send_whatsapp = send;
        self
    }
}

/// Which notifications a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Type(NotificationType),
    Unread,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Type(kind) => n.kind == *kind,
            NotificationFilter::Unread => !n.read,
        }
    }
}

impl FromStr for NotificationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(NotificationFilter::All),
            "unread" => Ok(NotificationFilter::Unread),
            other => other.parse().map(NotificationFilter::Type),
        }
    }
}

/// Mock rows shown when nothing has been stored yet.
pub fn default_notifications() -> Vec<Notification> {
    let seed = |id, kind, title: &str, message: &str, time: &str, priority| Notification {
        id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        priority,
        read: false,
        data: None,
        created_at: None,
        send_whatsapp: None,
    };
    vec![
        seed(
            1,
            NotificationType::Chatbot,
            "New Chatbot Conversation",
            "User inquired about residential design services and pricing.",
            "2 minutes ago",
            Priority::Medium,
        ),
        seed(
            2,
            NotificationType::Appointment,
            "Appointment Confirmed",
            "Sarah Johnson confirmed consultation for Friday at 2PM.",
            "15 minutes ago",
            Priority::High,
        ),
        seed(
            3,
            NotificationType::Contact,
            "Contact Form Submission",
            "New inquiry from John Smith regarding commercial design.",
            "1 hour ago",
            Priority::Medium,
        ),
        seed(
            4,
            NotificationType::System,
            "System Update",
            "WhatsApp integration has been successfully connected.",
            "2 hours ago",
            Priority::Low,
        ),
    ]
}
