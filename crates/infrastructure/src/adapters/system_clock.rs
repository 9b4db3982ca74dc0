//! Wall-clock time for token expiry checks.

use chrono::{DateTime, Utc};
use windams_application::ports::Clock;

/// Reads UTC from the operating system.
///
/// Production clock for the shared `TokenCache`, which compares every
/// cached token's expiry against it before reuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
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
