//! # Luxe Appointment Book
//!
//! File: cli/src/admin/appointment.rs
//! Author: Christi Mahu
//!
//! In-memory appointments for the admin panel. Nothing here is persisted; a
//! fresh book starts from three mock rows. Adding an appointment yields the
//! WhatsApp text the panel forwards to the studio's number.
//!
use crate::common::ids::IdGenerator;
use crate::core::error::{LuxeError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
        })
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!(
                "unknown status '{}' (expected pending, confirmed or completed)",
                other
            )),
        }
    }
}

/// `all` or a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: u64,
    pub client: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub source: String,
    #[serde(default)]
    pub notes: String,
}

/// Serialises times as `HH:MM`, the format the booking forms submit.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Input for a new appointment entered by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
}

pub const ADMIN_SOURCE: &str = "Admin Panel";

#[derive(Debug)]
pub struct AppointmentBook {
    items: Vec<Appointment>,
    ids: IdGenerator,
}

impl Default for AppointmentBook {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AppointmentBook {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// A book holding the three mock rows.
    pub fn seeded() -> Self {
        let mut book = Self::empty();
        book.items = mock_appointments();
        for a in &book.items {
            book.ids.observe(a.id);
        }
        book
    }

    pub fn all(&self) -> &[Appointment] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Appointment> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn filter(&self, filter: StatusFilter) -> Vec<&Appointment> {
        self.items
            .iter()
            .filter(|a| match filter {
                StatusFilter::All => true,
                StatusFilter::Only(status) => a.status == status,
            })
            .collect()
    }

    /// Adds a pending appointment at the top and returns it with the WhatsApp text.
    pub fn add(&mut self, new: NewAppointment) -> Result<(Appointment, String)> {
        let appointment = Appointment {
            id: self.ids.next_id()?,
            client: new.client,
            email: new.email,
            phone: new.phone,
            service: new.service,
            date: new.date,
            time: new.time,
            status: AppointmentStatus::Pending,
            source: ADMIN_SOURCE.to_string(),
            notes: new.notes,
        };
        let message = scheduled_message(&appointment);
        info!("Added appointment {} for {}", appointment.id, appointment.client);
        self.items.insert(0, appointment.clone());
        Ok((appointment, message))
    }

    pub fn delete(&mut self, id: u64) -> Result<Appointment> {
        let pos = self
            .items
            .iter()
            .position(|a| a.id == id)
            .ok_or(LuxeError::AppointmentNotFound { id })?;
        Ok(self.items.remove(pos))
    }

    pub fn set_status(&mut self, id: u64, status: AppointmentStatus) -> Result<&Appointment> {
        let appointment = self
            .items
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(LuxeError::AppointmentNotFound { id })?;
        appointment.status = status;
        Ok(appointment)
    }
}

/// "New appointment scheduled: <client> - <service> on <date> at <time>"
pub fn scheduled_message(a: &Appointment) -> String {
    format!(
        "New appointment scheduled: {} - {} on {} at {}",
        a.client,
        a.service,
        a.date.format("%Y-%m-%d"),
        a.time.format("%H:%M")
    )
}

fn mock_appointments() -> Vec<Appointment> {
    let row = |id: u64,
               client: &str,
               email: &str,
               phone: &str,
               service: &str,
               (y, m, d): (i32, u32, u32),
               (hh, mm): (u32, u32),
               status,
               source: &str,
               notes: &str| Appointment {
        id,
        client: client.into(),
        email: email.into(),
        phone: phone.into(),
        service: service.into(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(hh, mm, 0).unwrap_or_default(),
        status,
        source: source.into(),
        notes: notes.into(),
    };
    vec![
        row(
            1,
            "Sarah Johnson",
            "sarah@email.com",
            "+1 (555) 123-4567",
            "Consultation",
            (2024, 1, 15),
            (14, 0),
            AppointmentStatus::Confirmed,
            "Chatbot",
            "Interested in residential design",
        ),
        row(
            2,
            "Michael Chen",
            "michael@email.com",
            "+1 (555) 234-5678",
            "Residential Design",
            (2024, 1, 16),
            (10, 0),
            AppointmentStatus::Pending,
            "Website",
            "Complete home renovation project",
        ),
        row(
            3,
            "Emily Rodriguez",
            "emily@email.com",
            "+1 (555) 345-6789",
            "Color Consultation",
            (2024, 1, 17),
            (15, 30),
            AppointmentStatus::Completed,
            "WhatsApp",
            "Kitchen and living room colors",
        ),
    ]
}
