//! Time as an injected dependency.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability.
///
/// Production uses [`SystemClock`]; tests use
/// [`FixedClock`](crate::testing::FixedClock) for deterministic time.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
