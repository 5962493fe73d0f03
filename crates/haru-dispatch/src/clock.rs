//! Clock capability.
//!
//! Business logic never reads the wall clock directly; it asks the injected
//! clock, so tests can pin time and the time-of-day fare default becomes
//! deterministic.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Seconds east of UTC for Korea Standard Time.
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Provides the current instant.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Local (KST) hour of day for the current instant, 0–23. Drives the
    /// time-of-day fare default when the request does not supply one.
    fn local_hour(&self) -> u32 {
        match FixedOffset::east_opt(KST_OFFSET_SECS) {
            Some(offset) => self.now().with_timezone(&offset).hour(),
            None => self.now().hour(),
        }
    }
}

/// Production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
