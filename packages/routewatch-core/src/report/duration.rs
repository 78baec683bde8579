//! Days/hours/minutes breakdown of a time-in-status counter.
//!
//! The controller reports duration as whole seconds. The breakdown uses
//! floor division throughout; leftover seconds are dropped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInStatus {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl TimeInStatus {
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            days: secs / 86_400,
            hours: (secs % 86_400) / 3_600,
            minutes: (secs % 3_600) / 60,
        }
    }
}

impl fmt::Display for TimeInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}
