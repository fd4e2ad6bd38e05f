//! # Luxe Id Generation (`common::ids`)
//!
//! File: cli/src/common/ids.rs
//! Author: Christi Mahu
//!
//! Record ids are Unix-epoch milliseconds, so they stay compatible with ids
//! written by older producers. Two records created in the same millisecond would
//! collide, so the generator hands out `max(now_ms, last + 1)`. The sequence is
//! strictly increasing within one generator. Once `u64::MAX` has been issued or
//! observed the generator refuses to hand out more.
//!
use crate::core::error::{LuxeError, Result};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic, clock-seeded id source.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id, never equal to or below any id previously issued or observed.
    pub fn next_id(&self) -> Result<u64> {
        let now = now_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = last
                .checked_add(1)
                .ok_or(LuxeError::IdsExhausted { last })?
                .max(now);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return Ok(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    /// Records an id that exists elsewhere (e.g. loaded from storage) so it is never reissued.
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::Relaxed);
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase_in_a_burst() {
        let ids = IdGenerator::new();
        let burst: Vec<u64> = (0..1_000).map(|_| ids.next_id().unwrap()).collect();
        assert!(burst.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ids_are_clock_based() {
        let before = now_millis();
        let id = IdGenerator::new().next_id().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_observe_skips_past_foreign_ids() {
        let ids = IdGenerator::new();
        let far_future = now_millis() + 1_000_000;
        ids.observe(far_future);
        assert_eq!(ids.next_id().unwrap(), far_future + 1);
        // Observing a smaller id changes nothing.
        ids.observe(5);
        assert_eq!(ids.next_id().unwrap(), far_future + 2);
    }

    #[test]
    fn test_exhausted_id_space_is_an_error() {
        let ids = IdGenerator::new();
        ids.observe(u64::MAX - 1);
        assert_eq!(ids.next_id().unwrap(), u64::MAX);
        let err = ids.next_id().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LuxeError>(),
            Some(LuxeError::IdsExhausted { last: u64::MAX })
        ));
        // Still refuses rather than wrapping around.
        assert!(ids.next_id().is_err());
    }
}
