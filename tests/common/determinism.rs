//! Deterministic timestamps
//!
//! Sessions are ordered by timestamp, so tests that care about order use a
//! fixed clock instead of `Utc::now()`.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// Fixed timestamp for testing (2024-01-01 00:00:00 UTC)
pub const TEST_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// Get a fixed chrono DateTime for testing
pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(TEST_TIMESTAMP)
        .expect("Invalid test timestamp")
        .with_timezone(&Utc)
}

/// Clock that advances one second per tick from [`TEST_TIMESTAMP`]
pub struct TestClock {
    ticks: AtomicI64,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }

    /// Return the next timestamp
    pub fn tick(&self) -> DateTime<Utc> {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst);
        test_now() + Duration::seconds(n)
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_timestamp() {
        let ts = test_now();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn test_clock_is_strictly_increasing() {
        let clock = TestClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a, test_now());
        assert_eq!(b - a, Duration::seconds(1));
    }
}
