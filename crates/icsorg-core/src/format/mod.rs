//! Org-mode formatting for calendar events.
//!
//! This module provides the text primitives every sink is built from:
//! - **Timestamps**: active `<2024-01-01 Mon 09:00>` and inactive `[...]` forms
//! - **Ranges**: same-day collapsing `<2024-01-01 Mon 09:00-10:30>`
//! - **Durations**: tiered `"1 wk 0 d 02:02 hh:mm"` / `"2 d 01:30 hh:mm"` / `"00:15 hh:mm"`
//! - **Links**: `[[John Smith][John Smith]]` tokens for attendee identities
//! - **File names**: summary slugs and daily-log names
//!
//! The [`org`] submodule assembles these into the aggregate file, note files
//! and daily-log entries.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use icsorg_core::format::{format_range, linkify};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let start = day.and_hms_opt(9, 0, 0).unwrap();
//! let end = day.and_hms_opt(10, 30, 0).unwrap();
//!
//! assert_eq!(format_range(start, end), "<2024-01-01 Mon 09:00-10:30>");
//! assert_eq!(
//!     linkify("mailto:john.smith@example.com"),
//!     "[[John Smith][John Smith]]"
//! );
//! ```

pub mod org;

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::{Duration, Event};

pub use org::{
    OrgHeader, render_aggregate, render_daily_entry, render_daily_header, render_entry,
    render_header, render_note,
};

const MAILTO_PREFIX: &str = "mailto:";

/// Date and time portion shared by every timestamp form.
const STAMP_FORMAT: &str = "%Y-%m-%d %a %H:%M";

/// Regex for `first.last@domain` identities.
static FULL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Za-z_]+)\.([0-9A-Za-z_]+)@.+?$").expect("Invalid full name regex")
});

/// Regex for runs of characters that are not allowed in a slug.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z]+").expect("Invalid slug regex"));

/// Whether a timestamp is shown in the agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampKind {
    /// `<...>`, shows up in the agenda.
    #[default]
    Active,
    /// `[...]`, informational only.
    Inactive,
}

impl TimestampKind {
    /// Returns the opening and closing delimiters.
    pub fn delimiters(&self) -> (char, char) {
        match self {
            Self::Active => ('<', '>'),
            Self::Inactive => ('[', ']'),
        }
    }
}

/// Formats a timestamp as `<yyyy-MM-dd Www HH:mm>` or `[yyyy-MM-dd Www HH:mm]`.
///
/// An absent date renders as the empty string.
pub fn format_timestamp(date: Option<NaiveDateTime>, kind: TimestampKind) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let (open, close) = kind.delimiters();
    format!("{}{}{}", open, date.format(STAMP_FORMAT), close)
}

/// Formats an active timestamp range.
///
/// Windows that start and end on the same calendar day collapse into a
/// single bracket pair carrying only the end time; anything else renders as
/// two full timestamps joined by `--`. No timezone conversion is applied.
pub fn format_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        return format!("<{}-{}>", start.format(STAMP_FORMAT), end.format("%H:%M"));
    }
    format!(
        "{}--{}",
        format_timestamp(Some(start), TimestampKind::Active),
        format_timestamp(Some(end), TimestampKind::Active)
    )
}

/// Formats a duration for the `DURATION` drawer property.
///
/// The tier is chosen by the largest non-zero unit. The weeks tier repeats
/// the hours value in both halves of `HH:mm`; existing note archives carry
/// that layout, so it is kept as-is.
pub fn format_duration(duration: &Duration) -> String {
    if duration.weeks != 0 {
        format!(
            "{} wk {} d {:02}:{:02} hh:mm",
            duration.weeks, duration.days, duration.hours, duration.hours
        )
    } else if duration.days != 0 {
        format!(
            "{} d {:02}:{:02} hh:mm",
            duration.days, duration.hours, duration.minutes
        )
    } else {
        format!("{:02}:{:02} hh:mm", duration.hours, duration.minutes)
    }
}

/// Turns an identity into a `[[text][text]]` link token.
///
/// A leading `mailto:` is stripped. Identities shaped like
/// `first.last@domain` are displayed as `First Last`; anything else is used
/// verbatim.
pub fn linkify(identity: &str) -> String {
    let identity = identity.strip_prefix(MAILTO_PREFIX).unwrap_or(identity);

    let text = match FULL_NAME_REGEX.captures(identity) {
        Some(caps) => format!("{} {}", capitalize(&caps[1]), capitalize(&caps[2])),
        None => identity.to_string(),
    };

    format!("[[{}][{}]]", text, text)
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives a filesystem-safe slug from a summary.
///
/// Every run of characters outside `[0-9A-Za-z]` collapses to a single
/// underscore and the result is lowercased.
pub fn slugify(summary: &str) -> String {
    SLUG_REGEX.replace_all(summary, "_").to_lowercase()
}

/// Returns the note file name for an event: `{YYYYMMDDhhmmss}-{slug}.org`.
///
/// The hour field is the 12-hour clock value, matching the names of
/// previously generated notes.
pub fn note_file_name(event: &Event) -> String {
    format!(
        "{}-{}.org",
        event.start_date.format("%Y%m%d%I%M%S"),
        slugify(&event.summary)
    )
}

/// Returns the daily-log file name for a calendar day: `{YYYY-MM-DD}.org`.
pub fn daily_file_name(day: NaiveDate) -> String {
    format!("{}.org", day.format("%Y-%m-%d"))
}
