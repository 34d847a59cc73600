//! Testing utilities.
//!
//! Mock implementations of the capability traits live in [`crate::mocks`];
//! this module holds the deterministic clock shared by unit tests,
//! integration tests and the demo binary.

use crate::clock::Clock;
use chrono::{DateTime, Utc};

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making tests reproducible.
///
/// # Example
///
/// ```
/// use hemoflow::testing::FixedClock;
/// use hemoflow::clock::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-06-15 12:00:00 UTC).
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which cannot happen.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}
