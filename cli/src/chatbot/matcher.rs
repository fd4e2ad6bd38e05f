//! # Luxe Chatbot Response Matcher
//!
//! File: cli/src/chatbot/matcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Maps one free-text user message to a canned [`BotResponse`]: a reply text plus
//! the quick replies offered for the next turn.
//!
//! ## Algorithm
//!
//! 1. Lower-case the input.
//! 2. If the whole message is a greeting ("hi", "hello there!"), answer with the greeting.
//! 3. Walk the rule table in order. Each rule is a set of substrings, and the first
//!    rule with any substring present wins.
//! 4. Otherwise return the fallback, which offers the top-level quick replies.
//!
//! Rule order is fixed. Specific topics (residential, commercial, color, ...) sit
//! ahead of the generic ones (services, pricing), so "home price" is a residential
//! question, not a pricing one.
//!
//! The matcher has no state and no side effects. History, duplicate detection and
//! typing delays belong to [`super::conversation`].
//!
use crate::core::error::{LuxeError, Result};

/// Which canned answer a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Residential,
    Commercial,
    Color,
    Lighting,
    Furniture,
    Appointment,
    Contact,
    Portfolio,
    Services,
    Pricing,
    Fallback,
    /// Produced by the conversation controller for repeated input, never by the matcher.
    AlreadyResponded,
    Welcome,
}

/// A single bot turn: text plus follow-up shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotResponse {
    pub topic: Topic,
    pub message: String,
    pub quick_replies: Vec<String>,
}

impl BotResponse {
    fn canned(topic: Topic, message: &str, quick_replies: &[&str]) -> Self {
        Self {
            topic,
            message: message.to_string(),
            quick_replies: quick_replies.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Quick replies offered at the top level (welcome, fallback, repeats).
pub const TOP_LEVEL_QUICK_REPLIES: &[&str] = &[
    "Residential Design",
    "Commercial Design",
    "Color Consultation",
    "Pricing",
    "Book Consultation",
];

pub const WELCOME_MESSAGE: &str =
    "Hello! Welcome to Luxe Interiors. How can I help you design your dream space today?";

pub const ALREADY_RESPONDED_MESSAGE: &str =
    "I've already answered that one. Is there anything else you'd like to know?";

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hi there",
    "hello there",
    "hey there",
    "good morning",
    "good afternoon",
    "good evening",
];

/// One entry of the ordered rule table.
#[derive(Debug, Clone)]
struct Rule {
    topic: Topic,
    keywords: &'static [&'static str],
    reply: &'static str,
    quick_replies: &'static [&'static str],
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

// Order matters: specific topics first, generic ones last.
const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Residential,
        keywords: &["residential", "home"],
        reply: "Our residential design service transforms homes into personalized sanctuaries. \
                We handle everything from single rooms to complete renovations, balancing \
                comfort, function and your personal style.",
        quick_replies: &["View Portfolio", "Pricing", "Book Consultation"],
    },
    Rule {
        topic: Topic::Commercial,
        keywords: &["commercial", "office", "business"],
        reply: "We design offices, retail spaces and hospitality venues that reflect your brand \
                and work hard for the people who use them every day.",
        quick_replies: &["View Portfolio", "Pricing", "Book Consultation"],
    },
    Rule {
        topic: Topic::Color,
        keywords: &["color", "colour", "palette"],
        reply: "Our color consultation helps you choose a palette that sets the right mood for \
                every room, with samples tested in your own lighting.",
        quick_replies: &["Book Consultation", "Lighting Design", "Pricing"],
    },
    Rule {
        topic: Topic::Lighting,
        keywords: &["lighting", "light"],
        reply: "Lighting design layers ambient, task and accent light so your space looks \
                right from morning to night.",
        quick_replies: &["Color Consultation", "Furniture Selection", "Book Consultation"],
    },
    Rule {
        topic: Topic::Furniture,
        keywords: &["furniture", "sofa"],
        reply: "We source and select furniture that fits your layout, your budget and the way \
                you live, from statement pieces to everyday essentials.",
        quick_replies: &["Residential Design", "Pricing", "Book Consultation"],
    },
    Rule {
        topic: Topic::Appointment,
        keywords: &["appointment", "consultation", "book", "schedule"],
        reply: "I'd be happy to set up a consultation! Share your preferred date and time, or \
                use the appointment form, and our team will confirm within 24 hours.",
        quick_replies: &["Contact Us", "Pricing", "Our Services"],
    },
    Rule {
        topic: Topic::Contact,
        keywords: &["contact", "call", "phone", "email"],
        reply: "You can reach us at +1 (555) 123-4567 or email us at hello@luxeinteriors.com. \
                We're available Monday-Friday, 9 AM-6 PM.",
        quick_replies: &["Book Consultation", "Our Services"],
    },
    Rule {
        topic: Topic::Portfolio,
        keywords: &["portfolio", "work", "project"],
        reply: "You can view our portfolio on our website. We have examples of residential, \
                commercial, and hospitality projects.",
        quick_replies: &["Residential Design", "Commercial Design", "Book Consultation"],
    },
    Rule {
        topic: Topic::Services,
        keywords: &["service", "offer"],
        reply: "We offer residential design, commercial design, color consultation, lighting \
                design, furniture selection, and project management services.",
        quick_replies: &[
            "Residential Design",
            "Commercial Design",
            "Color Consultation",
            "Lighting Design",
            "Furniture Selection",
        ],
    },
    Rule {
        topic: Topic::Pricing,
        keywords: &["price", "pricing", "cost", "budget"],
        reply: "Our pricing varies based on project scope and requirements. I'd recommend \
                scheduling a consultation for a detailed quote.",
        quick_replies: &["Book Consultation", "Our Services"],
    },
];

const GREETING_REPLY: &str =
    "Hello! It's lovely to meet you. Are you planning a home, a commercial space, or something else?";

const FALLBACK_REPLY: &str = "Thank you for your message! I'd be happy to help with your interior \
                              design needs. Could you tell me a bit more, or pick one of the topics below?";

/// The ordered keyword matcher.
#[derive(Debug, Clone, Default)]
pub struct ResponseMatcher;

impl ResponseMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Respond to user input. Never fails; unknown input gets the fallback.
    pub fn respond(&self, input: &str) -> BotResponse {
        let lowered = input.trim().to_lowercase();

        if is_greeting(&lowered) {
            return BotResponse::canned(Topic::Greeting, GREETING_REPLY, TOP_LEVEL_QUICK_REPLIES);
        }

        RULES
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| BotResponse::canned(rule.topic, rule.reply, rule.quick_replies))
            .unwrap_or_else(|| {
                BotResponse::canned(Topic::Fallback, FALLBACK_REPLY, TOP_LEVEL_QUICK_REPLIES)
            })
    }

    /// Fallible version of `respond()`: empty or whitespace-only input is an error.
    pub fn try_respond(&self, input: &str) -> Result<BotResponse> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LuxeError::EmptyInput.into());
        }
        Ok(self.respond(trimmed))
    }

    /// The opening message shown when the chat window first opens.
    pub fn welcome(&self) -> BotResponse {
        BotResponse::canned(Topic::Welcome, WELCOME_MESSAGE, TOP_LEVEL_QUICK_REPLIES)
    }

    /// The static reply for a repeated question.
    pub fn already_responded(&self) -> BotResponse {
        BotResponse::canned(
            Topic::AlreadyResponded,
            ALREADY_RESPONDED_MESSAGE,
            TOP_LEVEL_QUICK_REPLIES,
        )
    }
}

/// Whole-message greeting check, ignoring trailing punctuation.
fn is_greeting(lowered: &str) -> bool {
    let stripped = lowered.trim_end_matches(['!', '.', '?', ',', ' ']);
    GREETINGS.contains(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responds_to_residential_any_case() {
        let bot = ResponseMatcher::new();
        for input in [
            "residential",
            "RESIDENTIAL design please",
            "I want to redo my Home",
            "my HOME office",
        ] {
            assert_eq!(bot.respond(input).topic, Topic::Residential, "input: {input}");
        }
    }

    #[test]
    fn specific_topics_beat_generic_ones() {
        let bot = ResponseMatcher::new();
        assert_eq!(bot.respond("home price").topic, Topic::Residential);
        assert_eq!(bot.respond("office services").topic, Topic::Commercial);
        assert_eq!(bot.respond("what does a color consultation cost?").topic, Topic::Color);
        assert_eq!(bot.respond("how much do your services cost").topic, Topic::Services);
        assert_eq!(bot.respond("what's the price?").topic, Topic::Pricing);
    }

    #[test]
    fn greeting_only_when_whole_message() {
        let bot = ResponseMatcher::new();
        assert_eq!(bot.respond("Hi!").topic, Topic::Greeting);
        assert_eq!(bot.respond("  hello there ").topic, Topic::Greeting);
        // A greeting prefix does not mask a real question.
        assert_eq!(bot.respond("hi, home price").topic, Topic::Residential);
    }

    #[test]
    fn quick_reply_labels_route_to_their_topics() {
        let bot = ResponseMatcher::new();
        let expected = [
            ("Residential Design", Topic::Residential),
            ("Commercial Design", Topic::Commercial),
            ("Color Consultation", Topic::Color),
            ("Lighting Design", Topic::Lighting),
            ("Furniture Selection", Topic::Furniture),
            ("Book Consultation", Topic::Appointment),
            ("Contact Us", Topic::Contact),
            ("View Portfolio", Topic::Portfolio),
            ("Our Services", Topic::Services),
            ("Pricing", Topic::Pricing),
        ];
        for (label, topic) in expected {
            assert_eq!(bot.respond(label).topic, topic, "label: {label}");
        }
    }

    #[test]
    fn unknown_input_falls_back_with_top_level_options() {
        let bot = ResponseMatcher::new();
        let reply = bot.respond("tell me a joke");
        assert_eq!(reply.topic, Topic::Fallback);
        assert_eq!(reply.quick_replies, TOP_LEVEL_QUICK_REPLIES);
    }

    #[test]
    fn every_keyword_reaches_its_rule() {
        let bot = ResponseMatcher::new();
        let table = [
            (Topic::Residential, &["residential", "home"][..]),
            (Topic::Commercial, &["commercial", "office", "business"]),
            (Topic::Color, &["color", "colour", "palette"]),
            (Topic::Lighting, &["lighting", "light"]),
            (Topic::Furniture, &["furniture", "sofa"]),
            (Topic::Appointment, &["appointment", "consultation", "book", "schedule"]),
            (Topic::Contact, &["contact", "call", "phone", "email"]),
            (Topic::Portfolio, &["portfolio", "work", "project"]),
            (Topic::Services, &["service", "offer"]),
            (Topic::Pricing, &["price", "pricing", "cost", "budget"]),
        ];
        for (topic, keywords) in table {
            for keyword in keywords {
                let input = format!("Tell me about {}", keyword.to_uppercase());
                assert_eq!(bot.respond(&input).topic, topic, "keyword: {keyword}");
            }
        }
        assert_eq!(
            bot.respond("I want more natural light in my kitchen").topic,
            Topic::Lighting
        );
    }

    #[test]
    fn try_respond_rejects_blank_input() {
        let bot = ResponseMatcher::new();
        let err = bot.try_respond("   ").unwrap_err();
        assert!(matches!(err.downcast_ref::<LuxeError>(), Some(LuxeError::EmptyInput)));
        assert_eq!(bot.try_respond("pricing").unwrap().topic, Topic::Pricing);
    }
}
