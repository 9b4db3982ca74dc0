//! Clock port for token expiry checks

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// The token cache compares every entry against this clock, so tests can
/// move time forward without sleeping.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
