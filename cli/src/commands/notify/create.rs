//! # Notification Creation
//!
//! File: cli/src/commands/notify/create.rs
//! Author: Christi Mahu
//!
//! The admin "send notification" form. With `--whatsapp` the notification is
//! also forwarded as a WhatsApp deep link, printed and optionally opened.
//!
use crate::admin::notification::{NotificationDraft, NotificationType, Priority};
use crate::commands::context::CommandContext;
use crate::common::process;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Notification type.
    #[arg(long = "type", short = 't', default_value = "system")]
    kind: NotificationType,

    #[arg(long)]
    title: String,

    #[arg(long, short)]
    message: String,

    #[arg(long, short, default_value = "medium")]
    priority: Priority,

    /// Also forward the notification over WhatsApp.
    #[arg(long)]
    whatsapp: bool,

    /// Open the WhatsApp link in the browser (implies --whatsapp).
    #[arg(long)]
    open: bool,
}

pub fn handle_create(args: CreateArgs, ctx: &CommandContext) -> Result<()> {
    let mut panel = ctx.admin_panel()?;
    let draft = NotificationDraft::new(args.kind, args.title, args.message)
        .priority(args.priority)
        .send_whatsapp(args.whatsapp || args.open);

    let sent = panel.send_notification(draft)?;
    println!(
        "Created {} notification {}.",
        sent.notification.kind, sent.notification.id
    );
    if let Some(link) = sent.whatsapp_link {
        println!("WhatsApp: {}", link);
        if args.open {
            process::open_url(&link)?;
        }
    }
    Ok(())
}
