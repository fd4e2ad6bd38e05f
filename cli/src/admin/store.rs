//! # Luxe Notification Store
//!
//! File: cli/src/admin/store.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! An in-memory list of [`Notification`]s kept in sync with the shared
//! `adminNotifications` storage key.
//!
//! ## Synchronisation model
//!
//! - Writers (site forms, admin actions) build the new array, write it back whole,
//!   and only then adopt it. A failed write leaves memory as it was. New records
//!   are prepended.
//! - Readers replace their whole in-memory copy on every `load`/`refresh`. There is
//!   no diffing and no locking: the last writer wins on the next read.
//! - Processes that share a store value also get a [`StoreEvent`] on a broadcast
//!   channel for every change, so they do not need to poll.
//!
//! ## Loading
//!
//! | storage state | admin `load()` | producer `load_persisted()` |
//! |---------------|----------------|-----------------------------|
//! | key missing   | mock seed rows (not written back) | empty |
//! | valid array   | that array | that array |
//! | unparseable   | empty, warning logged | empty, warning logged |
//!
use crate::admin::notification::{
    default_notifications, Notification, NotificationDraft, NotificationFilter, NotificationType,
    Priority,
};
use crate::common::ids::IdGenerator;
use crate::common::random;
use crate::common::storage::{Storage, NOTIFICATIONS_KEY};
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use chrono::Utc;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Change notifications for in-process subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Created(Notification),
    MarkedRead(u64),
    Deleted(u64),
    Cleared,
    Reloaded { count: usize },
}

/// How the last load resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Seeded,
    Empty,
    Corrupt,
}

/// Raw and parsed views of storage, for troubleshooting sync problems.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugSnapshot {
    pub in_memory: usize,
    pub unread: usize,
    pub raw: Option<String>,
    pub stored: usize,
}

const EVENT_CAPACITY: usize = 64;

pub struct NotificationStore<S: Storage> {
    storage: S,
    items: Vec<Notification>,
    ids: IdGenerator,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: Storage> NotificationStore<S> {
    /// An empty store over `storage`. Call `load` or `load_persisted` to read it.
    pub fn new(storage: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            items: Vec::new(),
            ids: IdGenerator::new(),
            events,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Admin-side load: missing key shows the mock seed rows.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        self.load_inner(true)
    }

    /// Producer-side load: missing key means an empty list.
    pub fn load_persisted(&mut self) -> Result<LoadOutcome> {
        self.load_inner(false)
    }

    /// Re-reads storage. Returns true when the visible list changed.
    pub fn refresh(&mut self) -> Result<bool> {
        let before = self.items.clone();
        self.load()?;
        Ok(before != self.items)
    }

    fn load_inner(&mut self, seed_when_missing: bool) -> Result<LoadOutcome> {
        let raw = self
            .storage
            .get_item(NOTIFICATIONS_KEY)
            .context("Failed to read notifications from storage")?;

        let (items, outcome) = match raw {
            None if seed_when_missing => {
                debug!("No stored notifications, showing defaults");
                (default_notifications(), LoadOutcome::Seeded)
            }
            None => (Vec::new(), LoadOutcome::Empty),
            Some(raw) => match serde_json::from_str::<Vec<Notification>>(&raw) {
                Ok(items) => {
                    let n = items.len();
                    (items, LoadOutcome::Loaded(n))
                }
                Err(e) => {
                    warn!("Error parsing notifications from storage: {}", e);
                    (Vec::new(), LoadOutcome::Corrupt)
                }
            },
        };

        for n in &items {
            self.ids.observe(n.id);
        }
        self.items = items;
        let _ = self.events.send(StoreEvent::Reloaded {
            count: self.items.len(),
        });
        Ok(outcome)
    }

    /// Writes `items` and adopts them once storage accepted the write.
    fn commit(&mut self, items: Vec<Notification>) -> Result<()> {
        let encoded = serde_json::to_string(&items).context("Failed to encode notifications")?;
        self.storage.set_item(NOTIFICATIONS_KEY, &encoded)?;
        self.items = items;
        Ok(())
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn filter(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.items.iter().filter(|n| filter.matches(n)).collect()
    }

    /// Badge count.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Prepends a new record and writes the array back.
    pub fn create(&mut self, draft: NotificationDraft) -> Result<Notification> {
        let notification = Notification {
            id: self.ids.next_id()?,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            time: "Just now".to_string(),
            priority: draft.priority,
            read: false,
            data: draft.data,
            created_at: Some(Utc::now()),
            send_whatsapp: draft.send_whatsapp.then_some(true),
        };
        let items = std::iter::once(notification.clone())
            .chain(self.items.iter().cloned())
            .collect();
        self.commit(items)?;
        info!(
            "Created {} notification {}: {}",
            notification.kind, notification.id, notification.title
        );
        let _ = self.events.send(StoreEvent::Created(notification.clone()));
        Ok(notification)
    }

    pub fn mark_read(&mut self, id: u64) -> Result<()> {
        let pos = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or(LuxeError::NotificationNotFound { id })?;
        if !self.items[pos].read {
            let mut items = self.items.clone();
            items[pos].read = true;
            self.commit(items)?;
        }
        let _ = self.events.send(StoreEvent::MarkedRead(id));
        Ok(())
    }

    /// Marks every record read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> Result<usize> {
        let changed = self.unread_count();
        if changed > 0 {
            let mut items = self.items.clone();
            items.iter_mut().for_each(|n| n.read = true);
            self.commit(items)?;
        }
        Ok(changed)
    }

    /// Removes exactly the record with `id`; the rest keep their order.
    pub fn delete(&mut self, id: u64) -> Result<Notification> {
        let pos = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or(LuxeError::NotificationNotFound { id })?;
        let mut items = self.items.clone();
        let removed = items.remove(pos);
        self.commit(items)?;
        let _ = self.events.send(StoreEvent::Deleted(id));
        Ok(removed)
    }

    /// Empties the list and removes the storage key.
    pub fn clear_all(&mut self) -> Result<()> {
        self.storage
            .remove_item(NOTIFICATIONS_KEY)
            .context("Failed to clear stored notifications")?;
        self.items.clear();
        info!("All notifications cleared");
        let _ = self.events.send(StoreEvent::Cleared);
        Ok(())
    }

    pub fn create_test_notification(&mut self) -> Result<Notification> {
        self.create(
            NotificationDraft::new(
                NotificationType::Test,
                "Test Notification",
                "This is a test notification created from admin panel.",
            )
            .data(json!({ "source": "admin-panel-test" })),
        )
    }

    /// One tick of the activity simulation: with probability `p`, adds a
    /// "New Activity" record of a random everyday type.
    pub fn simulate_activity(&mut self, p: f64) -> Result<Option<Notification>> {
        if !random::chance(p) {
            return Ok(None);
        }
        const KINDS: [NotificationType; 4] = [
            NotificationType::Chatbot,
            NotificationType::Appointment,
            NotificationType::Contact,
            NotificationType::System,
        ];
        let kind = KINDS[random::index(KINDS.len())];
        self.create(
            NotificationDraft::new(kind, "New Activity", "New activity detected in the system")
                .priority(Priority::Medium)
                .data(json!({ "source": "simulation" })),
        )
        .map(Some)
    }

    pub fn debug_snapshot(&self) -> Result<DebugSnapshot> {
        let raw = self.storage.get_item(NOTIFICATIONS_KEY)?;
        let stored = raw
            .as_deref()
            .and_then(|r| serde_json::from_str::<Vec<serde_json::Value>>(r).ok())
            .map_or(0, |v| v.len());
        Ok(DebugSnapshot {
            in_memory: self.items.len(),
            unread: self.unread_count(),
            raw,
            stored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::storage::{FileStorage, FullStorage, MemoryStorage};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn stored(storage: &impl Storage) -> Vec<Notification> {
        let raw = storage.get_item(NOTIFICATIONS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn contact(title: &str) -> NotificationDraft {
        NotificationDraft::new(NotificationType::Contact, title, "message body")
    }

    #[test]
    fn load_seeds_defaults_without_persisting() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        assert_eq!(store.load().unwrap(), LoadOutcome::Seeded);
        assert_eq!(store.all().len(), 4);
        assert_eq!(store.storage().get_item(NOTIFICATIONS_KEY).unwrap(), None);

        let mut producer = NotificationStore::new(MemoryStorage::new());
        assert_eq!(producer.load_persisted().unwrap(), LoadOutcome::Empty);
        assert!(producer.all().is_empty());
    }

    #[test]
    fn corrupt_storage_falls_back_to_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(NOTIFICATIONS_KEY, "{broken").unwrap();
        let mut store = NotificationStore::new(storage);
        assert_eq!(store.load().unwrap(), LoadOutcome::Corrupt);
        assert!(store.all().is_empty());
    }

    #[test]
    fn create_prepends_and_persists() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        store.load_persisted().unwrap();
        store.create(contact("first")).unwrap();
        let created = store.create(contact("second")).unwrap();

        let persisted = stored(store.storage());
        assert_eq!(persisted[0], created);
        assert_eq!(persisted[1].title, "first");
        assert_eq!(created.time, "Just now");
        assert!(persisted[0].id > persisted[1].id);
    }

    #[test]
    fn failed_writes_leave_memory_unchanged() {
        let storage = FullStorage::default();
        storage
            .inner
            .set_item(NOTIFICATIONS_KEY, &serde_json::to_string(&default_notifications()).unwrap())
            .unwrap();
        let mut store = NotificationStore::new(storage);
        store.load().unwrap();
        let before = store.all().to_vec();

        let err = store.create(contact("lost")).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert!(store.delete(before[0].id).is_err());
        assert!(store.mark_read(before[0].id).is_err());
        assert!(store.mark_all_read().is_err());

        assert_eq!(store.all(), &before[..]);
        assert_eq!(stored(&store.storage().inner), before);
    }

    #[test]
    fn largest_possible_stored_id_is_an_error_not_a_panic() {
        let storage = MemoryStorage::new();
        let mut row = default_notifications().remove(0);
        row.id = u64::MAX;
        storage
            .set_item(NOTIFICATIONS_KEY, &serde_json::to_string(&vec![row]).unwrap())
            .unwrap();
        let mut store = NotificationStore::new(storage);
        store.load().unwrap();

        let err = store.create(contact("one too many")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LuxeError>(),
            Some(LuxeError::IdsExhausted { .. })
        ));
        assert_eq!(store.all().len(), 1);
        assert_eq!(stored(store.storage()).len(), 1);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        store.load_persisted().unwrap();
        let ids: Vec<u64> = ["a", "b", "c", "d"]
            .iter()
            .map(|t| store.create(contact(t)).unwrap().id)
            .collect();

        store.delete(ids[2]).unwrap();

        let titles: Vec<&str> = store.all().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "b", "a"]);
        let persisted: Vec<String> = stored(store.storage()).into_iter().map(|n| n.title).collect();
        assert_eq!(persisted, vec!["d", "b", "a"]);

        let err = store.delete(ids[2]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LuxeError>(),
            Some(LuxeError::NotificationNotFound { .. })
        ));
    }

    #[test]
    fn clear_all_empties_memory_and_key() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.create_test_notification().unwrap();
        store.clear_all().unwrap();

        assert!(store.all().is_empty());
        assert_eq!(store.storage().get_item(NOTIFICATIONS_KEY).unwrap(), None);
        // The admin view falls back to seeds again after a clear.
        assert_eq!(store.load().unwrap(), LoadOutcome::Seeded);
    }

    #[test]
    fn mark_read_updates_badge_and_storage() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        store.load().unwrap();
        assert_eq!(store.unread_count(), 4);

        store.mark_read(2).unwrap();
        assert_eq!(store.unread_count(), 3);
        assert!(stored(store.storage()).iter().any(|n| n.id == 2 && n.read));

        assert_eq!(store.mark_all_read().unwrap(), 3);
        assert_eq!(store.unread_count(), 0);
        assert!(store.mark_read(999).is_err());
    }

    #[test]
    fn test_notification_payload() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        let n = store.create_test_notification().unwrap();
        assert_eq!(n.kind, NotificationType::Test);
        assert_eq!(n.data.unwrap()["source"], "admin-panel-test");
    }

    #[test]
    fn refresh_picks_up_other_writers() {
        let dir = tempdir().unwrap();
        let mut admin = NotificationStore::new(FileStorage::new(dir.path()));
        let mut site = NotificationStore::new(FileStorage::new(dir.path()));

        admin.load().unwrap();
        assert!(!admin.refresh().unwrap());

        site.load_persisted().unwrap();
        let created = site.create(contact("from the site")).unwrap();

        assert!(admin.refresh().unwrap());
        assert_eq!(admin.all(), &[created]);
        // Loaded ids are never reissued.
        let next = admin.create(contact("admin")).unwrap();
        assert!(next.id > admin.all()[1].id);
    }

    #[test]
    fn filter_by_type_and_unread() {
        let mut store = NotificationStore::new(Arc::new(MemoryStorage::new()));
        store.load().unwrap();
        store.mark_read(1).unwrap();
        assert_eq!(
            store
                .filter(NotificationFilter::Type(NotificationType::System))
                .len(),
            1
        );
        assert_eq!(store.filter(NotificationFilter::Unread).len(), 3);
        assert_eq!(store.filter(NotificationFilter::All).len(), 4);
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        let mut rx = store.subscribe();
        store.load_persisted().unwrap();
        let created = store.create(contact("evt")).unwrap();
        store.delete(created.id).unwrap();
        store.clear_all().unwrap();

        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Reloaded { count: 0 });
        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Created(created.clone()));
        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Deleted(created.id));
        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Cleared);
    }

    #[test]
    fn simulation_respects_probability() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        assert_eq!(store.simulate_activity(0.0).unwrap(), None);
        let n = store.simulate_activity(1.0).unwrap().unwrap();
        assert_eq!(n.title, "New Activity");
        assert!(matches!(
            n.kind,
            NotificationType::Chatbot
                | NotificationType::Appointment
                | NotificationType::Contact
                | NotificationType::System
        ));
    }

    #[test]
    fn debug_snapshot_counts() {
        let mut store = NotificationStore::new(MemoryStorage::new());
        store.load().unwrap();
        let snap = store.debug_snapshot().unwrap();
        assert_eq!((snap.in_memory, snap.stored, snap.raw), (4, 0, None));

        store.create_test_notification().unwrap();
        let snap = store.debug_snapshot().unwrap();
        assert_eq!((snap.in_memory, snap.stored, snap.unread), (5, 5, 5));
    }
}
