//! Timestamps for stored records.
//!
//! Values are UTC truncated to microseconds, the finest precision every
//! supported backend keeps, so a timestamp handed back to a caller compares
//! equal to the one read from the store later.

use chrono::{DateTime, FixedOffset, SubsecRound, TimeDelta, Utc};

pub type Timestamp = DateTime<FixedOffset>;

pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

/// Current time, or one microsecond past `previous` when the clock has not
/// moved beyond it. Mutations use this so `updated_at` always increases.
pub fn after(previous: Timestamp) -> Timestamp {
    let now = now();
    if now > previous {
        return now;
    }
    previous.trunc_subsecs(6) + TimeDelta::microseconds(1)
}
