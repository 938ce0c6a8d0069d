//! Date window for selecting calendar entries.
//!
//! All canonical timestamps are local wall-clock values ([`NaiveDateTime`]);
//! [`TimeWindow`] uses the same representation so comparisons never need a
//! timezone.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A closed interval `[start, end]` in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: NaiveDateTime,
    /// End of the window (inclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window, swapping the bounds if given in reverse.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates the window `[now - past_days, now + future_days]`.
    ///
    /// Negative day counts are treated as zero. Returns `None` when either
    /// bound falls outside the representable date range.
    pub fn around(now: NaiveDateTime, past_days: i64, future_days: i64) -> Option<Self> {
        let past = TimeDelta::try_days(past_days.max(0))?;
        let future = TimeDelta::try_days(future_days.max(0))?;

        Some(Self::new(
            now.checked_sub_signed(past)?,
            now.checked_add_signed(future)?,
        ))
    }

    /// Checks if an entry spanning `[start, end]` touches this window.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end && end >= self.start
    }
}
