//! # Luxe Site Form Commands
//!
//! File: cli/src/commands/forms.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Submit the public site's forms from the command line. Each successful
//! submission (except the newsletter) prepends a notification to the shared
//! store, where `luxe notify list` and `luxe watch` pick it up.
//!
//! ```bash
//! luxe contact --name "John Smith" --email john@example.com --message "Office refresh"
//! luxe book --name Ana --email ana@example.com --phone 555-0100 \
//!     --service "Residential Design" --date 2024-02-01 --time 10:00
//! luxe callback --name Ben --phone 555-0101 --preferred-time morning
//! luxe newsletter news@example.com
//! ```
//!
use crate::admin::notification::NotificationDraft;
use crate::admin::store::NotificationStore;
use crate::commands::context::CommandContext;
use crate::core::error::Result;
use crate::site::forms::{
    self, AppointmentRequest, CallbackRequest, ContactForm, APPOINTMENT_THANKS, CALLBACK_THANKS,
    CONTACT_THANKS, NEWSLETTER_THANKS,
};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Submit the contact form")]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    message: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    service: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Request an appointment")]
pub struct BookArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    service: String,
    /// Preferred date (YYYY-MM-DD).
    #[arg(long, default_value = "")]
    date: String,
    /// Preferred time (HH:MM).
    #[arg(long, default_value = "")]
    time: String,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Request a call back")]
pub struct CallbackArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long)]
    preferred_time: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Subscribe to the newsletter")]
pub struct NewsletterArgs {
    #[arg(default_value = "")]
    email: String,
}

fn submit(ctx: &CommandContext, draft: NotificationDraft) -> Result<()> {
    let mut store = NotificationStore::new(ctx.storage()?);
    store.load_persisted()?;
    let n = store.create(draft)?;
    info!("Stored {} notification {}", n.kind, n.id);
    Ok(())
}

pub fn handle_contact(args: ContactArgs, ctx: &CommandContext) -> Result<()> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        message: args.message,
        phone: args.phone,
        service: args.service,
    };
    submit(ctx, form.into_notification()?)?;
    println!("{}", CONTACT_THANKS);
    Ok(())
}

pub fn handle_book(args: BookArgs, ctx: &CommandContext) -> Result<()> {
    let request = AppointmentRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        service: args.service,
        date: args.date,
        time: args.time,
        notes: args.notes,
    };
    submit(ctx, request.into_notification()?)?;
    println!("{}", APPOINTMENT_THANKS);
    Ok(())
}

pub fn handle_callback(args: CallbackArgs, ctx: &CommandContext) -> Result<()> {
    let request = CallbackRequest {
        name: args.name,
        phone: args.phone,
        preferred_time: args.preferred_time,
    };
    submit(ctx, request.into_notification()?)?;
    println!("{}", CALLBACK_THANKS);
    Ok(())
}

pub fn handle_newsletter(args: NewsletterArgs) -> Result<()> {
    forms::subscribe_newsletter(&args.email)?;
    println!("{}", NEWSLETTER_THANKS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_parse_as_empty() {
        // Validation, not clap, reports the missing fields.
        let args = ContactArgs::try_parse_from(["contact", "--name", "Jo"]).unwrap();
        assert_eq!(args.email, "");
        assert_eq!(args.phone, None);
    }

    #[test]
    fn callback_preferred_time_flag() {
        let args = CallbackArgs::try_parse_from([
            "callback",
            "--name",
            "Ben",
            "--phone",
            "1",
            "--preferred-time",
            "after 5pm",
        ])
        .unwrap();
        assert_eq!(args.preferred_time.as_deref(), Some("after 5pm"));
    }

    #[test]
    fn newsletter_positional_email() {
        let args = NewsletterArgs::try_parse_from(["newsletter", "a@b.co"]).unwrap();
        assert_eq!(args.email, "a@b.co");
        assert!(handle_newsletter(args).is_ok());
        assert!(handle_newsletter(NewsletterArgs { email: "bad".into() }).is_err());
    }
}
