//! # Luxe Chatbot Engine
//!
//! File: cli/src/chatbot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The canned-response assistant from the site's chat widget, in two parts:
//! - `matcher`: a stateless, ordered keyword table mapping one message to a reply and quick replies
//! - `conversation`: open/closed state, the message log, turn-taking, typing delay,
//!   repeat detection and quick-reply consumption
//!
//! ```rust,ignore
//! let mut chat = ConversationController::new(ResponseMatcher::new(), TypingDelay::from(&cfg.chatbot));
//! chat.open();
//! let reply = chat.send("Do you do residential projects?").await?;
//! println!("{}", reply.message);
//! ```
//!
pub mod conversation;
pub mod matcher;

pub use conversation::{ChatMessage, ConversationController, SessionSummary, TypingDelay};
pub use matcher::{BotResponse, ResponseMatcher, Topic};
