//! # Luxe Randomness Helpers (`common::random`)
//!
//! File: cli/src/common/random.rs
//! Author: Christi Mahu
//!
//! Small helpers over `getrandom` for the chatbot typing jitter and the admin
//! activity simulation. None of this is security sensitive. If the OS source
//! fails, the helpers fall back to the low bits of the clock.
//!
use chrono::Utc;
use tracing::warn;

fn random_u64() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            warn!("OS randomness unavailable ({}), using clock bits", e);
            Utc::now().timestamp_subsec_nanos() as u64
        }
    }
}

/// Uniform value in `min..=max`. Returns `min` when the range is empty.
pub fn in_range(min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    match (max - min).checked_add(1) {
        Some(span) => min + random_u64() % span,
        // The range covers every u64.
        None => random_u64(),
    }
}

/// Uniform index below `len`. `len` must be non-zero.
pub fn index(len: usize) -> usize {
    debug_assert!(len > 0);
    (random_u64() % len as u64) as usize
}

/// True with probability `p` (clamped to 0..=1).
pub fn chance(p: f64) -> bool {
    if p <= 0.0 {
        return false;
    }
    if p >= 1.0 {
        return true;
    }
    // 53 random bits give a uniform float in [0, 1).
    let unit = (random_u64() >> 11) as f64 / (1u64 << 53) as f64;
    unit < p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_bounds() {
        for _ in 0..500 {
            let v = in_range(1000, 2000);
            assert!((1000..=2000).contains(&v));
        }
        assert_eq!(in_range(7, 7), 7);
        assert_eq!(in_range(9, 3), 9);
        // Full-width ranges must not overflow.
        in_range(0, u64::MAX);
        assert!(in_range(u64::MAX - 1, u64::MAX) >= u64::MAX - 1);
    }

    #[test]
    fn test_index_bounds() {
        for _ in 0..200 {
            assert!(index(4) < 4);
        }
    }

    #[test]
    fn test_chance_extremes() {
        assert!(!chance(0.0));
        assert!(chance(1.0));
        assert!(!chance(-3.0));
    }
}
