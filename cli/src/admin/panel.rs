//! # Luxe Admin Panel
//!
//! File: cli/src/admin/panel.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `AdminPanel` owns every piece of admin-side state: the notification store,
//! the appointment book, the chatbot conversation log, the WhatsApp log and the
//! settings map. Commands build
//! one panel per invocation; nothing lives in globals.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let mut panel = AdminPanel::open(FileStorage::new(&cfg.storage.directory), &cfg.whatsapp.number)?;
//! let sent = panel.send_notification(draft.send_whatsapp(true))?;
//! if let Some(link) = sent.whatsapp_link { println!("{}", link); }
//! let path = panel.export_to(Path::new("."), Local::now().date_naive())?;
//! ```
//!
use crate::admin::appointment::{Appointment, AppointmentBook, NewAppointment};
use crate::admin::conversations::{ConversationLog, ConversationSummary};
use crate::admin::notification::{Notification, NotificationDraft};
use crate::admin::report::{self, Report};
use crate::admin::settings::AdminSettings;
use crate::admin::store::{LoadOutcome, NotificationStore};
use crate::admin::whatsapp::{self, WhatsAppLog, WhatsAppMessage};
use crate::common::fs::io;
use crate::common::storage::Storage;
use crate::core::error::Result;
use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Document written by `export`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub notifications: &'a [Notification],
    pub appointments: &'a [Appointment],
    pub conversations: &'a [ConversationSummary],
    pub whatsapp_messages: &'a [WhatsAppMessage],
    pub settings: &'a AdminSettings,
}

/// Result of sending a notification from the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub notification: Notification,
    pub whatsapp_link: Option<String>,
}

pub struct AdminPanel<S: Storage> {
    store: NotificationStore<S>,
    appointments: AppointmentBook,
    conversations: ConversationLog,
    whatsapp: WhatsAppLog,
    settings: AdminSettings,
    whatsapp_number: String,
}

impl<S: Storage> AdminPanel<S> {
    /// Loads notifications and settings from `storage`.
    pub fn open(storage: S, whatsapp_number: &str) -> Result<Self> {
        let mut store = NotificationStore::new(storage);
        let outcome = store.load()?;
        let settings = AdminSettings::load(store.storage())?;
        info!("Admin panel opened ({:?})", outcome);
        let conversations = ConversationLog::with_sessions(store.all(), Utc::now());
        Ok(Self {
            store,
            appointments: AppointmentBook::seeded(),
            conversations,
            whatsapp: WhatsAppLog::seeded(),
            settings,
            whatsapp_number: whatsapp_number.to_string(),
        })
    }

    pub fn store(&self) -> &NotificationStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NotificationStore<S> {
        &mut self.store
    }

    pub fn appointments(&self) -> &AppointmentBook {
        &self.appointments
    }

    pub fn appointments_mut(&mut self) -> &mut AppointmentBook {
        &mut self.appointments
    }

    pub fn conversations(&self) -> &ConversationLog {
        &self.conversations
    }

    pub fn whatsapp(&self) -> &WhatsAppLog {
        &self.whatsapp
    }

    pub fn settings(&self) -> &AdminSettings {
        &self.settings
    }

    pub fn reload(&mut self) -> Result<LoadOutcome> {
        self.settings = AdminSettings::load(self.store.storage())?;
        let outcome = self.store.load()?;
        self.conversations = ConversationLog::with_sessions(self.store.all(), Utc::now());
        Ok(outcome)
    }

    /// Creates the notification; when it asks for WhatsApp, also records the
    /// outgoing message and returns the deep link.
    pub fn send_notification(&mut self, draft: NotificationDraft) -> Result<SentNotification> {
        let notification = self.store.create(draft)?;
        let whatsapp_link = if notification.send_whatsapp == Some(true) {
            let text = format!("{}\n\n{}", notification.title, notification.message);
            Some(self.send_whatsapp(&text)?)
        } else {
            None
        };
        Ok(SentNotification {
            notification,
            whatsapp_link,
        })
    }

    /// Records `text` as sent and returns its deep link.
    pub fn send_whatsapp(&mut self, text: &str) -> Result<String> {
        self.whatsapp.record_outgoing(text)?;
        Ok(whatsapp::deep_link(&self.whatsapp_number, text))
    }

    /// Records a test notification and returns it with the admin test message link.
    pub fn send_whatsapp_test(&mut self) -> Result<SentNotification> {
        let text = whatsapp::admin_test_message(Local::now());
        let link = self.send_whatsapp(&text)?;
        let notification = self.store.create_test_notification()?;
        Ok(SentNotification {
            notification,
            whatsapp_link: Some(link),
        })
    }

    /// Adds an appointment and returns it with the WhatsApp link announcing it.
    pub fn add_appointment(&mut self, new: NewAppointment) -> Result<(Appointment, String)> {
        let (appointment, text) = self.appointments.add(new)?;
        let link = self.send_whatsapp(&text)?;
        Ok((appointment, link))
    }

    pub fn save_settings(&mut self, settings: AdminSettings) -> Result<()> {
        settings.save(self.store.storage())?;
        self.settings = settings;
        Ok(())
    }

    pub fn export_document(&self) -> ExportDocument<'_> {
        ExportDocument {
            notifications: self.store.all(),
            appointments: self.appointments.all(),
            conversations: self.conversations.all(),
            whatsapp_messages: self.whatsapp.messages(),
            settings: &self.settings,
        }
    }

    /// Writes the export into `dir` and returns the file path.
    pub fn export_to(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(export_file_name(today));
        let json = serde_json::to_string_pretty(&self.export_document())
            .context("Failed to encode export document")?;
        io::ensure_dir_exists(dir)?;
        io::write_string_atomic(&path, &json)?;
        info!("Exported admin data to {}", path.display());
        Ok(path)
    }

    pub fn report(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Report> {
        report::generate(start, end, self.appointments.all(), self.store.all())
    }
}

/// `luxe-interiors-data-YYYY-MM-DD.json`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("luxe-interiors-data-{}.json", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::notification::NotificationType;
    use crate::common::storage::MemoryStorage;
    use chrono::NaiveTime;
    use tempfile::tempdir;

    fn panel() -> AdminPanel<MemoryStorage> {
        AdminPanel::open(MemoryStorage::new(), "+1 (555) 123-4567").unwrap()
    }

    #[test]
    fn open_shows_seeded_state() {
        let p = panel();
        assert_eq!(p.store().all().len(), 4);
        assert_eq!(p.appointments().all().len(), 3);
        assert_eq!(p.conversations().all().len(), 3);
        assert_eq!(p.whatsapp().messages().len(), 3);
        assert!(p.settings().is_empty());
    }

    #[test]
    fn whatsapp_flag_produces_link_and_log_entry() {
        let mut p = panel();
        let plain = p
            .send_notification(NotificationDraft::new(NotificationType::System, "A", "b"))
            .unwrap();
        assert_eq!(plain.whatsapp_link, None);

        let sent = p
            .send_notification(
                NotificationDraft::new(NotificationType::System, "Heads up", "Site update").send_whatsapp(true),
            )
            .unwrap();
        let link = sent.whatsapp_link.unwrap();
        assert!(link.starts_with("https://wa.me/15551234567?text=Heads%20up"));
        assert_eq!(p.whatsapp().messages().len(), 4);
    }

    #[test]
    fn add_appointment_links_scheduled_message() {
        let mut p = panel();
        let (a, link) = p.add_appointment(NewAppointment {
            client: "Jo".into(),
            email: "jo@example.com".into(),
            phone: "1".into(),
            service: "Consultation".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            notes: String::new(),
        })
        .unwrap();
        assert_eq!(p.appointments().all()[0], a);
        assert!(link.contains("New%20appointment%20scheduled%3A%20Jo"));
    }

    #[test]
    fn export_writes_named_pretty_json() {
        let dir = tempdir().unwrap();
        let mut p = panel();
        p.save_settings(AdminSettings::from_pairs(["siteName=Luxe"]).unwrap())
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();

        let path = p.export_to(dir.path(), today).unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "luxe-interiors-data-2024-05-09.json"
        );
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["notifications"].as_array().unwrap().len(), 4);
        assert_eq!(v["appointments"].as_array().unwrap().len(), 3);
        assert_eq!(v["conversations"].as_array().unwrap().len(), 3);
        assert_eq!(v["conversations"][0]["user"], "Anonymous User");
        assert_eq!(v["whatsappMessages"].as_array().unwrap().len(), 3);
        assert_eq!(v["settings"]["siteName"], "Luxe");
    }

    #[test]
    fn whatsapp_test_also_records_test_notification() {
        let mut p = panel();
        let sent = p.send_whatsapp_test().unwrap();
        assert_eq!(sent.notification.kind, NotificationType::Test);
        assert_eq!(p.store().all()[0], sent.notification);
        assert!(sent
            .whatsapp_link
            .unwrap()
            .starts_with("https://wa.me/15551234567?text=%F0%9F%94%94%20*ADMIN%20PANEL%20TEST*"));
        assert_eq!(p.whatsapp().messages()[0].sender, "Admin");
    }

    #[test]
    fn chat_sessions_show_up_as_conversations() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let mut site = NotificationStore::new(storage.clone());
        site.load_persisted().unwrap();
        site.create(crate::site::forms::chat_session_notification(
            &crate::chatbot::conversation::SessionSummary {
                user_turns: 1,
                messages: 3,
                first_question: "Do you do offices?".into(),
                last_question: "Do you do offices?".into(),
            },
        ))
        .unwrap();

        let p = AdminPanel::open(storage, "1").unwrap();
        let rows = p.conversations().all();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].preview, "Do you do offices?");
        assert_eq!(rows[0].messages, 3);
        assert_eq!(rows[0].time, "Just now");
    }

    #[test]
    fn settings_survive_reload() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let mut p = AdminPanel::open(storage.clone(), "1").unwrap();
        p.save_settings(AdminSettings::from_pairs(["a=1"]).unwrap())
            .unwrap();
        let q = AdminPanel::open(storage, "1").unwrap();
        assert_eq!(q.settings().len(), 1);
    }
}
