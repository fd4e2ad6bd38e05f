//! # Luxe Conversation Flow Controller
//!
//! File: cli/src/chatbot/conversation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ConversationController` owns the chat widget state:
//! - open/closed state
//! - the append-only message log
//! - the quick replies offered by the latest bot turn
//! - whether a bot reply is pending
//!
//! ## Turn-taking
//!
//! ```text
//! submit(text) ──► user message logged, reply pending ──(typing delay)──► deliver() ──► bot message logged
//! ```
//!
//! While a reply is pending every new submission is rejected with
//! `LuxeError::ReplyPending`, which keeps user and bot turns strictly alternating.
//! [`ConversationController::send`] runs the whole cycle, sleeping for the
//! simulated typing delay between the two halves.
//!
//! If the user repeats their previous message right after the bot answered it,
//! the controller replies with the static "already responded" message and does
//! not consult the matcher.
//!
use crate::chatbot::matcher::{BotResponse, ResponseMatcher};
use crate::common::random;
use crate::core::config::ChatbotConfig;
use crate::core::error::{LuxeError, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

/// One entry of the conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub is_from_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// Quick replies offered by one bot turn. The whole set is disabled once any
/// of its buttons is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplySet {
    labels: Vec<String>,
    consumed: bool,
}

impl QuickReplySet {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Simulated typing delay: `base + uniform(jitter_min..=jitter_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    base: Duration,
    jitter_min_ms: u64,
    jitter_max_ms: u64,
}

impl TypingDelay {
    pub fn new(base: Duration, jitter_min_ms: u64, jitter_max_ms: u64) -> Self {
        Self {
            base,
            jitter_min_ms,
            jitter_max_ms,
        }
    }

    /// No delay at all; used by one-shot commands and tests.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, 0, 0)
    }

    pub fn sample(&self) -> Duration {
        let jitter = random::in_range(self.jitter_min_ms, self.jitter_max_ms);
        self.base.saturating_add(Duration::from_millis(jitter))
    }
}

impl From<&ChatbotConfig> for TypingDelay {
    fn from(cfg: &ChatbotConfig) -> Self {
        Self::new(
            Duration::from_millis(cfg.typing_base_ms),
            cfg.typing_jitter_min_ms,
            cfg.typing_jitter_max_ms,
        )
    }
}

/// Handle for a submitted turn whose reply has not been delivered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    /// How long the caller should show the typing indicator.
    pub delay: Duration,
}

/// What the site forwards to the admin panel when a chat session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub user_turns: usize,
    /// Every logged message, bot turns included.
    pub messages: usize,
    pub first_question: String,
    pub last_question: String,
}

/// Owns chat state and turn-taking.
#[derive(Debug)]
pub struct ConversationController {
    matcher: ResponseMatcher,
    typing: TypingDelay,
    open: bool,
    log: Vec<ChatMessage>,
    quick_replies: Option<QuickReplySet>,
    pending: Option<BotResponse>,
}

impl ConversationController {
    pub fn new(matcher: ResponseMatcher, typing: TypingDelay) -> Self {
        Self {
            matcher,
            typing,
            open: false,
            log: Vec::new(),
            quick_replies: None,
            pending: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_reply_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn quick_replies(&self) -> Option<&QuickReplySet> {
        self.quick_replies.as_ref()
    }

    /// Opens the widget. The first open of an empty conversation posts the welcome message.
    pub fn open(&mut self) -> Option<&ChatMessage> {
        if self.open {
            return None;
        }
        self.open = true;
        debug!("Chat opened");
        if self.log.is_empty() {
            let welcome = self.matcher.welcome();
            return Some(self.push_bot(welcome));
        }
        None
    }

    /// Closes the widget and summarises the session if the user said anything.
    ///
    /// A pending reply is dropped on close; the user message stays in the log.
    pub fn close(&mut self) -> Option<SessionSummary> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.pending = None;
        debug!("Chat closed");
        self.summary()
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Summary of the user side of the conversation so far.
    pub fn summary(&self) -> Option<SessionSummary> {
        let mut questions = self.log.iter().filter(|m| m.is_from_user);
        let first = questions.next()?;
        let last = questions.last().unwrap_or(first);
        Some(SessionSummary {
            user_turns: self.log.iter().filter(|m| m.is_from_user).count(),
            messages: self.log.len(),
            first_question: first.text.clone(),
            last_question: last.text.clone(),
        })
    }

    /// First half of a turn: validates and logs the user message and decides the reply.
    ///
    /// # Errors
    ///
    /// - `LuxeError::ChatClosed` when the widget is closed
    /// - `LuxeError::ReplyPending` while the previous reply is still being "typed"
    /// - `LuxeError::EmptyInput` for blank input
    pub fn submit(&mut self, input: &str) -> Result<PendingReply> {
        self.ensure_accepting_input()?;
        let text = input.trim();
        if text.is_empty() {
            return Err(LuxeError::EmptyInput.into());
        }

        let response = if self.repeats_last_answered(text) {
            info!("Repeated question, not re-running matcher: {:?}", text);
            self.matcher.already_responded()
        } else {
            self.matcher.respond(text)
        };

        self.push_user(text);
        self.pending = Some(response);
        Ok(PendingReply {
            delay: self.typing.sample(),
        })
    }

    /// Second half of a turn: posts the pending bot reply.
    pub fn deliver(&mut self) -> Result<BotResponse> {
        let response = self
            .pending
            .take()
            .ok_or_else(|| anyhow::anyhow!("no bot reply is pending"))?;
        self.push_bot(response.clone());
        Ok(response)
    }

    /// Submits `input`, waits out the typing delay, then delivers the reply.
    pub async fn send(&mut self, input: &str) -> Result<BotResponse> {
        let pending = self.submit(input)?;
        if !pending.delay.is_zero() {
            tokio::time::sleep(pending.delay).await;
        }
        self.deliver()
    }

    /// Uses one of the currently offered quick replies as the next user message.
    ///
    /// The offered set is disabled even if the label then counts as a repeat.
    pub fn select_quick_reply(&mut self, label: &str) -> Result<PendingReply> {
        self.ensure_accepting_input()?;
        let unavailable = || LuxeError::QuickReplyUnavailable {
            label: label.to_string(),
        };

        let set = self.quick_replies.as_mut().ok_or_else(unavailable)?;
        if set.consumed || !set.labels.iter().any(|l| l == label) {
            return Err(unavailable().into());
        }
        set.consumed = true;
        self.submit(label)
    }

    fn ensure_accepting_input(&self) -> Result<()> {
        if !self.open {
            return Err(LuxeError::ChatClosed.into());
        }
        if self.pending.is_some() {
            return Err(LuxeError::ReplyPending.into());
        }
        Ok(())
    }

    /// True when the last entry is a bot reply to a user message equal to `text`.
    fn repeats_last_answered(&self, text: &str) -> bool {
        let mut recent = self.log.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(bot), Some(user)) if !bot.is_from_user && user.is_from_user => {
                user.text.trim().eq_ignore_ascii_case(text)
            }
            _ => false,
        }
    }

    fn push_user(&mut self, text: &str) {
        self.log.push(ChatMessage {
            text: text.to_string(),
            is_from_user: true,
            timestamp: Utc::now(),
        });
    }

    fn push_bot(&mut self, response: BotResponse) -> &ChatMessage {
        self.quick_replies = if response.quick_replies.is_empty() {
            None
        } else {
            Some(QuickReplySet {
                labels: response.quick_replies,
                consumed: false,
            })
        };
        self.log.push(ChatMessage {
            text: response.message,
            is_from_user: false,
            timestamp: Utc::now(),
        });
        &self.log[self.log.len() - 1]
    }
}
