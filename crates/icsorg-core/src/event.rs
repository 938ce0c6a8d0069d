//! Event types for calendar entries.
//!
//! This module provides the canonical model every output sink renders from:
//! - [`Event`]: A normalized event or recurrence occurrence
//! - [`Attendee`]: An invitee with the "is this me" flag resolved
//! - [`Duration`]: A calendar duration split into weeks/days/hours/minutes/seconds

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: u64 = 86_400;

/// The length of an event, as calendar components express it.
///
/// Durations are not always `end - start`: a feed may declare `DURATION`
/// independently of `DTEND`, so the value is carried as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub is_negative: bool,
}

impl Duration {
    /// Builds a duration from a signed number of seconds.
    ///
    /// Whole days are folded into weeks only when the day count is an exact
    /// multiple of seven, so ten days stay `10 d` while fourteen become `2 wk`.
    pub fn from_seconds(total: i64) -> Self {
        let is_negative = total < 0;
        let mut secs = total.unsigned_abs();

        let total_days = secs / SECONDS_PER_DAY;
        let (weeks, days) = if total_days % 7 == 0 {
            (total_days / 7, 0)
        } else {
            (0, total_days)
        };
        secs -= total_days * SECONDS_PER_DAY;

        let hours = secs / 3600;
        secs -= hours * 3600;
        let minutes = secs / 60;

        Self {
            weeks,
            days,
            hours,
            minutes,
            seconds: secs - minutes * 60,
            is_negative,
        }
    }

    /// Builds a duration from the distance between two timestamps.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::from_delta(end - start)
    }

    /// Builds a duration from a chrono delta.
    pub fn from_delta(delta: TimeDelta) -> Self {
        Self::from_seconds(delta.num_seconds())
    }

    /// Returns the signed length in seconds.
    pub fn to_seconds(&self) -> i64 {
        let days = self.weeks * 7 + self.days;
        let secs = days * SECONDS_PER_DAY + self.hours * 3600 + self.minutes * 60 + self.seconds;
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        if self.is_negative { -secs } else { secs }
    }

    /// Returns the length as a chrono delta.
    pub fn to_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.to_seconds())
    }
}

/// An attendee of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// The participation role (e.g., "REQ-PARTICIPANT").
    pub role: Option<String>,
    /// The participation status (e.g., "ACCEPTED", "NEEDS-ACTION").
    pub status: String,
    /// The common name or identity string used for display and matching.
    pub cn: String,
    /// The calendar user type (e.g., "INDIVIDUAL", "ROOM").
    pub category: Option<String>,
    /// Number of additional guests the attendee brings.
    pub guests: Option<u32>,
    /// Whether this attendee is the configured user.
    pub me: bool,
}

impl Attendee {
    /// Creates a new attendee with the given identity and status.
    pub fn new(cn: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            role: None,
            status: status.into(),
            cn: cn.into(),
            category: None,
            guests: None,
            me: false,
        }
    }

    /// Builder method to mark the attendee as the configured user.
    pub fn with_me(mut self, me: bool) -> Self {
        self.me = me;
        self
    }
}

/// A normalized calendar event.
///
/// Both single events and expanded recurrence occurrences end up as an
/// `Event`. The `id` is empty after normalization and is assigned exactly
/// once by the pipeline driver, before any sink renders the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Freshly generated identifier, unique per run.
    pub id: String,
    /// When the event (or occurrence) starts, in local wall-clock time.
    pub start_date: NaiveDateTime,
    /// When the event (or occurrence) ends, in local wall-clock time.
    pub end_date: NaiveDateTime,
    /// Attendees in source order.
    pub attendees: Vec<Attendee>,
    pub description: Option<String>,
    pub duration: Option<Duration>,
    pub location: Option<String>,
    /// The organizer's calendar address (usually `mailto:...`).
    pub organizer: Option<String>,
    /// The source UID, shared by all occurrences of a series.
    pub uid: String,
    /// The `STATUS` property, empty when the component has none.
    pub status: String,
    /// The `LAST-MODIFIED` property, if present.
    pub modified: Option<NaiveDateTime>,
    pub summary: String,
}

impl Event {
    /// Creates a new Event with required fields.
    ///
    /// An `end` earlier than `start` is clamped to `start`.
    pub fn new(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: String::new(),
            start_date,
            end_date: end_date.max(start_date),
            attendees: Vec::new(),
            description: None,
            duration: None,
            location: None,
            organizer: None,
            uid: uid.into(),
            status: String::new(),
            modified: None,
            summary: summary.into(),
        }
    }

    /// Builder method to set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method to set attendees.
    pub fn with_attendees(mut self, attendees: Vec<Attendee>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Builder method to add an attendee.
    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder method to set the last-modified timestamp.
    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }
}
