//! # Luxe Chat Commands
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! - `luxe chat`: an interactive session with the assistant on stdin/stdout.
//! - `luxe ask <text>`: one message through the matcher, no state, no delay.
//!
//! ## Session input
//!
//! | input | effect |
//! |-------|--------|
//! | text | sent as a user message |
//! | `1`..`n` | picks the numbered quick reply, if the current set is still unused |
//! | `/quit`, `/exit`, EOF | closes the chat |
//!
//! When a session with at least one question ends, a `chatbot` notification is
//! written to the shared store unless `--no-notify` is given.
//!
//! ```bash
//! luxe chat
//! luxe chat --no-delay --no-notify < questions.txt
//! luxe ask "Do you handle office fit-outs?"
//! ```
//!
use crate::admin::store::NotificationStore;
use crate::chatbot::{BotResponse, ConversationController, ResponseMatcher, SessionSummary, TypingDelay};
use crate::commands::context::CommandContext;
use crate::core::error::{LuxeError, Result};
use crate::site::forms;
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Chat with the Luxe assistant")]
pub struct ChatArgs {
    /// Skip the simulated typing delay.
    #[arg(long)]
    no_delay: bool,

    /// Do not forward a session summary to the admin notifications.
    #[arg(long)]
    no_notify: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Ask the assistant a single question")]
pub struct AskArgs {
    /// The message to send.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

pub async fn handle_chat(args: ChatArgs, ctx: &CommandContext) -> Result<()> {
    let typing = if args.no_delay {
        TypingDelay::none()
    } else {
        TypingDelay::from(&ctx.config.chatbot)
    };
    let mut chat = ConversationController::new(ResponseMatcher::new(), typing);
    let reader = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    let summary = run_session(&mut chat, reader, &mut out, &ctx.config.chatbot.bot_name).await?;

    if let Some(summary) = summary.filter(|_| !args.no_notify) {
        let mut store = NotificationStore::new(ctx.storage()?);
        store.load_persisted()?;
        let n = store.create(forms::chat_session_notification(&summary))?;
        info!("Forwarded chat session as notification {}", n.id);
    }
    Ok(())
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let text = args.text.join(" ");
    let response = ResponseMatcher::new().try_respond(&text)?;
    let mut out = std::io::stdout();
    print_response(&mut out, &response)?;
    Ok(())
}

/// Runs a chat on `reader` until EOF or `/quit` and returns the session summary.
pub async fn run_session<R, W>(
    chat: &mut ConversationController,
    reader: R,
    out: &mut W,
    bot_name: &str,
) -> Result<Option<SessionSummary>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(welcome) = chat.open() {
        writeln!(out, "{}: {}", bot_name, welcome.text)?;
    }
    print_quick_replies(out, chat)?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "/quit" | "/exit") {
            break;
        }

        let result = match quick_reply_choice(chat, input) {
            Some(label) => match chat.select_quick_reply(&label) {
                Ok(pending) => {
                    writeln!(out, "> {}", label)?;
                    finish_turn(chat, pending.delay).await
                }
                Err(e) => Err(e),
            },
            None => chat.send(input).await,
        };

        match result {
            Ok(response) => {
                writeln!(out, "{}: {}", bot_name, response.message)?;
                print_quick_replies(out, chat)?;
            }
            Err(e) if e.downcast_ref::<LuxeError>().is_some() => {
                warn!("Message rejected: {}", e);
                writeln!(out, "! {}", e)?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(chat.close())
}

async fn finish_turn(
    chat: &mut ConversationController,
    delay: std::time::Duration,
) -> Result<BotResponse> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    chat.deliver()
}

/// Maps `"2"` to the second label of the current, unused quick-reply set.
fn quick_reply_choice(chat: &ConversationController, input: &str) -> Option<String> {
    let n: usize = input.parse().ok()?;
    let set = chat.quick_replies().filter(|s| !s.is_consumed())?;
    n.checked_sub(1)
        .and_then(|i| set.labels().get(i))
        .cloned()
}

fn print_quick_replies<W: Write>(out: &mut W, chat: &ConversationController) -> Result<()> {
    if let Some(set) = chat.quick_replies().filter(|s| !s.is_consumed()) {
        let options: Vec<String> = set
            .labels()
            .iter()
            .enumerate()
            .map(|(i, l)| format!("[{}] {}", i + 1, l))
            .collect();
        writeln!(out, "  {}", options.join("  "))?;
    }
    Ok(())
}

fn print_response<W: Write>(out: &mut W, response: &BotResponse) -> Result<()> {
    writeln!(out, "{}", response.message)?;
    if !response.quick_replies.is_empty() {
        writeln!(out, "Quick replies: {}", response.quick_replies.join(" | "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::matcher::{ALREADY_RESPONDED_MESSAGE, WELCOME_MESSAGE};

    async fn session(input: &str) -> (String, Option<SessionSummary>) {
        let mut chat = ConversationController::new(ResponseMatcher::new(), TypingDelay::none());
        let mut out = Vec::new();
        let summary = run_session(&mut chat, input.as_bytes(), &mut out, "Bot")
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn ask_requires_text() {
        assert!(AskArgs::try_parse_from(["ask"]).is_err());
        let args = AskArgs::try_parse_from(["ask", "home", "price"]).unwrap();
        assert_eq!(args.text.join(" "), "home price");
    }

    #[test]
    fn chat_flags_parse() {
        let args = ChatArgs::try_parse_from(["chat", "--no-delay", "--no-notify"]).unwrap();
        assert!(args.no_delay && args.no_notify);
    }

    #[tokio::test]
    async fn empty_session_has_no_summary() {
        let (out, summary) = session("").await;
        assert!(out.starts_with(&format!("Bot: {}", WELCOME_MESSAGE)));
        assert!(out.contains("[1] Residential Design"));
        assert_eq!(summary, None);
    }

    #[tokio::test]
    async fn numbered_quick_reply_and_repeat() {
        let (out, summary) = session("4\nPricing\n/quit\nignored\n").await;
        assert!(out.contains("> Pricing"));
        assert!(out.contains("Our pricing varies"));
        assert!(out.contains(ALREADY_RESPONDED_MESSAGE));
        let summary = summary.unwrap();
        assert_eq!(summary.user_turns, 2);
        assert_eq!(summary.first_question, "Pricing");
    }

    #[tokio::test]
    async fn out_of_range_number_is_plain_text() {
        let (out, summary) = session("42\n").await;
        assert!(out.contains("Could you tell me a bit more"));
        assert_eq!(summary.unwrap().first_question, "42");
    }
}
