//! # Luxe Admin Poll Loop
//!
//! File: cli/src/admin/poller.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Keeps an admin view current by re-reading the shared notification key on a
//! fixed interval. Storage is the only channel between the site and the panel,
//! so the poll is coarse and lossy: two writes between ticks show up as one
//! change.
//!
//! The optional activity simulation runs on its own, slower interval.
//!
//! Storage failures on either arm are logged and the loop keeps going.
//!
//! ## Termination
//!
//! The loop ends when the tick limit is reached or the `shutdown` future
//! resolves (the CLI passes Ctrl-C).
//!
use crate::admin::notification::Notification;
use crate::admin::store::NotificationStore;
use crate::common::storage::Storage;
use crate::core::config::AdminConfig;
use crate::core::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub poll_interval: Duration,
    /// Interval and probability of the activity simulation, when enabled.
    pub simulate: Option<(Duration, f64)>,
    /// Stop after this many poll ticks.
    pub max_ticks: Option<u64>,
}

impl WatchOptions {
    pub fn from_config(admin: &AdminConfig, max_ticks: Option<u64>) -> Self {
        Self {
            poll_interval: admin.poll_interval(),
            simulate: admin
                .simulate_activity
                .then(|| (admin.simulate_interval(), admin.simulate_probability)),
            max_ticks,
        }
    }
}

/// Something the watcher noticed.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchUpdate {
    Changed { total: usize, unread: usize },
    Simulated(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchSummary {
    pub ticks: u64,
    pub changes: u64,
}

/// Polls `store` until the tick limit or `shutdown`.
pub async fn watch<S, F, Fut>(
    store: &mut NotificationStore<S>,
    options: &WatchOptions,
    shutdown: Fut,
    mut on_update: F,
) -> Result<WatchSummary>
where
    S: Storage,
    F: FnMut(&WatchUpdate),
    Fut: Future<Output = ()>,
{
    store.load()?;
    let mut last = (store.all().len(), store.unread_count());
    let mut summary = WatchSummary::default();

    let mut poll = interval(options.poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick is immediate; the initial load already covered it.
    poll.tick().await;

    // Without simulation this interval never fires.
    let sim_period = options
        .simulate
        .map_or(Duration::from_secs(86_400 * 365), |(d, _)| d);
    let mut sim = interval(sim_period);
    sim.tick().await;

    info!(
        "Watching notifications every {:?} (simulation: {})",
        options.poll_interval,
        options.simulate.is_some()
    );

    tokio::pin!(shutdown);
    loop {
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping watch");
                break;
            }
            _ = poll.tick() => {
                summary.ticks += 1;
                if let Err(e) = store.refresh() {
                    warn!("Refresh failed: {:#}", e);
                    continue;
                }
                let now = (store.all().len(), store.unread_count());
                if now != last {
                    last = now;
                    summary.changes += 1;
                    on_update(&WatchUpdate::Changed { total: now.0, unread: now.1 });
                } else {
                    debug!("No change after tick {}", summary.ticks);
                }
            }
            _ = sim.tick(), if options.simulate.is_some() => {
                let p = options.simulate.map_or(0.0, |(_, p)| p);
                match store.simulate_activity(p) {
                    Ok(Some(n)) => {
                        last = (store.all().len(), store.unread_count());
                        on_update(&WatchUpdate::Simulated(n));
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Simulated activity failed: {:#}", e),
                }
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::notification::{NotificationDraft, NotificationType};
    use crate::common::storage::{FileStorage, FullStorage, NOTIFICATIONS_KEY};
    use tempfile::tempdir;

    fn fast(ticks: u64) -> WatchOptions {
        WatchOptions {
            poll_interval: Duration::from_millis(10),
            simulate: None,
            max_ticks: Some(ticks),
        }
    }

    #[tokio::test]
    async fn stops_after_tick_limit_without_changes() {
        let dir = tempdir().unwrap();
        let mut store = NotificationStore::new(FileStorage::new(dir.path()));
        let mut updates = Vec::new();
        let summary = watch(&mut store, &fast(3), std::future::pending(), |u| {
            updates.push(u.clone())
        })
        .await
        .unwrap();
        assert_eq!(summary, WatchSummary { ticks: 3, changes: 0 });
        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn reports_writes_from_another_handle() {
        let dir = tempdir().unwrap();
        let mut site = NotificationStore::new(FileStorage::new(dir.path()));
        site.load_persisted().unwrap();
        site.create(NotificationDraft::new(NotificationType::Contact, "t", "m"))
            .unwrap();

        let mut admin = NotificationStore::new(FileStorage::new(dir.path()));
        let mut updates = Vec::new();
        let writer = FileStorage::new(dir.path());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(15)).await;
            writer.set_item(NOTIFICATIONS_KEY, "[]").unwrap();
        });

        let summary = watch(&mut admin, &fast(5), std::future::pending(), |u| {
            updates.push(u.clone())
        })
        .await
        .unwrap();
        handle.await.unwrap();

        assert_eq!(summary.changes, 1);
        assert_eq!(updates, vec![WatchUpdate::Changed { total: 0, unread: 0 }]);
    }

    #[tokio::test]
    async fn shutdown_future_ends_loop() {
        let dir = tempdir().unwrap();
        let mut store = NotificationStore::new(FileStorage::new(dir.path()));
        let options = WatchOptions {
            max_ticks: None,
            ..fast(0)
        };
        let summary = watch(&mut store, &options, async {}, |_| {}).await.unwrap();
        assert_eq!(summary.ticks, 0);
    }

    #[tokio::test]
    async fn simulation_with_certain_probability_reports() {
        let dir = tempdir().unwrap();
        let mut store = NotificationStore::new(FileStorage::new(dir.path()));
        let options = WatchOptions {
            poll_interval: Duration::from_millis(50),
            simulate: Some((Duration::from_millis(10), 1.0)),
            max_ticks: Some(2),
        };
        let mut simulated = 0;
        watch(&mut store, &options, std::future::pending(), |u| {
            if matches!(u, WatchUpdate::Simulated(_)) {
                simulated += 1;
            }
        })
        .await
        .unwrap();
        assert!(simulated >= 1);
    }

    #[tokio::test]
    async fn failed_simulation_writes_do_not_stop_the_loop() {
        let storage = FullStorage::default();
        storage.inner.set_item(NOTIFICATIONS_KEY, "[]").unwrap();
        let mut store = NotificationStore::new(storage);
        let options = WatchOptions {
            poll_interval: Duration::from_millis(20),
            simulate: Some((Duration::from_millis(5), 1.0)),
            max_ticks: Some(3),
        };
        let mut simulated = 0;
        let summary = watch(&mut store, &options, std::future::pending(), |u| {
            if matches!(u, WatchUpdate::Simulated(_)) {
                simulated += 1;
            }
        })
        .await
        .unwrap();

        assert_eq!(summary.ticks, 3);
        assert_eq!(simulated, 0);
        assert!(store.all().is_empty());
        assert_eq!(
            store.storage().get_item(NOTIFICATIONS_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn options_follow_config() {
        let mut admin = AdminConfig::default();
        assert_eq!(WatchOptions::from_config(&admin, None).simulate, None);
        admin.simulate_activity = true;
        let opts = WatchOptions::from_config(&admin, Some(4));
        assert_eq!(opts.simulate, Some((Duration::from_secs(30), 0.1)));
        assert_eq!(opts.poll_interval, Duration::from_secs(5));
        assert_eq!(opts.max_ticks, Some(4));
    }
}
