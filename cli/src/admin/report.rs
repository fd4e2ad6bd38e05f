//! # Luxe Activity Report
//!
//! File: cli/src/admin/report.rs
//! Author: Christi Mahu
//!
//! Counts over a date range: appointments by status, notifications by type.
//! Notifications only count when they carry a `createdAt` timestamp; the seed
//! rows and legacy records with a display label alone are skipped.
//!
use crate::admin::appointment::{Appointment, AppointmentStatus};
use crate::admin::notification::{Notification, NotificationType};
use crate::core::error::{LuxeError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MISSING_DATES: &str = "Please select start and end dates";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub appointments: BTreeMap<AppointmentStatus, usize>,
    pub notifications: BTreeMap<NotificationType, usize>,
}

impl Report {
    pub fn total_appointments(&self) -> usize {
        self.appointments.values().sum()
    }

    pub fn total_notifications(&self) -> usize {
        self.notifications.values().sum()
    }
}

/// Checks that both ends are present and ordered.
pub fn date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate)> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(LuxeError::Validation(MISSING_DATES.to_string()).into());
    };
    if end < start {
        return Err(LuxeError::Validation(format!(
            "End date {} is before start date {}",
            end, start
        ))
        .into());
    }
    Ok((start, end))
}

/// Builds the report for the inclusive range `start..=end`.
pub fn generate(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    appointments: &[Appointment],
    notifications: &[Notification],
) -> Result<Report> {
    let (start, end) = date_range(start, end)?;
    let in_range = |d: NaiveDate| d >= start && d <= end;

    let mut by_status = BTreeMap::new();
    for a in appointments.iter().filter(|a| in_range(a.date)) {
        *by_status.entry(a.status).or_insert(0) += 1;
    }

    let mut by_type = BTreeMap::new();
    for n in notifications {
        if let Some(created) = n.created_at {
            if in_range(created.date_naive()) {
                *by_type.entry(n.kind).or_insert(0) += 1;
            }
        }
    }

    Ok(Report {
        start,
        end,
        appointments: by_status,
        notifications: by_type,
    })
}
