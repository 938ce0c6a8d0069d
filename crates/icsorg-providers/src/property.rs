//! Type-directed property reads.
//!
//! [`extract`] is the single place where iCalendar value typing leaks into
//! the canonical model: a property is read as text, as a local timestamp, or
//! as its raw string, depending on its `VALUE` parameter or, failing that,
//! the default type RFC 5545 assigns to its name. Lookups never fail; a
//! missing, empty or unparsable property reads as [`PropertyValue::Empty`].

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use icsorg_core::Duration;

use crate::raw_event::{RawComponent, RawProperty};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Properties whose default value type is DATE-TIME.
const DATE_TIME_PROPERTIES: &[&str] = &[
    "DTSTAMP",
    "CREATED",
    "LAST-MODIFIED",
    "COMPLETED",
    "DTSTART",
    "DTEND",
    "DUE",
    "RECURRENCE-ID",
];

/// Properties whose default value type is TEXT.
const TEXT_PROPERTIES: &[&str] = &[
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "STATUS",
    "UID",
    "COMMENT",
    "CLASS",
    "CATEGORIES",
    "TRANSP",
    "CONTACT",
    "RESOURCES",
];

/// How a property's value should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    DateTime,
    Other,
}

impl ValueKind {
    /// Determines the value kind of a property.
    pub fn of(property: &RawProperty) -> Self {
        if let Some(value) = property.param("VALUE") {
            return match value.to_ascii_uppercase().as_str() {
                "TEXT" => Self::Text,
                "DATE-TIME" | "DATE" => Self::DateTime,
                _ => Self::Other,
            };
        }

        let name = property.name.as_str();
        if DATE_TIME_PROPERTIES
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
        {
            Self::DateTime
        } else if name.to_ascii_uppercase().starts_with("X-")
            || TEXT_PROPERTIES.iter().any(|p| p.eq_ignore_ascii_case(name))
        {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// The result of a typed property read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Absent, empty, or unparsable.
    #[default]
    Empty,
    Text(String),
    /// A date or date-time, converted to local wall-clock time.
    Timestamp(NaiveDateTime),
}

impl PropertyValue {
    /// Returns the timestamp, if this is a date-time value.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Consumes the value, returning its text or an empty string.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            _ => String::new(),
        }
    }
}

/// Reads the first property named `name` from `component`.
pub fn extract(name: &str, component: &RawComponent) -> PropertyValue {
    let Some(property) = component.first_property(name) else {
        return PropertyValue::Empty;
    };
    if property.value.trim().is_empty() {
        return PropertyValue::Empty;
    }

    match ValueKind::of(property) {
        ValueKind::Text => PropertyValue::Text(unescape_text(&property.value)),
        ValueKind::DateTime => IcsTime::from_property(property)
            .map(|t| PropertyValue::Timestamp(t.to_local()))
            .unwrap_or_else(|| {
                debug!(property = name, value = %property.value, "Unparsable date-time");
                PropertyValue::Empty
            }),
        ValueKind::Other => PropertyValue::Text(property.value.clone()),
    }
}

/// A date or date-time as written in the feed, before local conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcsTime {
    /// `VALUE=DATE`, an all-day date.
    Date(NaiveDate),
    /// A `...Z` value.
    Utc(NaiveDateTime),
    /// A value with no zone, used as-is.
    Floating(NaiveDateTime),
    /// A value qualified by a known `TZID`.
    Zoned {
        datetime: NaiveDateTime,
        tz: chrono_tz::Tz,
    },
}

impl IcsTime {
    /// Reads the first value of a date or date-time property.
    pub fn from_property(property: &RawProperty) -> Option<Self> {
        Self::all_from_property(property).into_iter().next()
    }

    /// Reads every comma-separated value of a property (RDATE, EXDATE).
    pub fn all_from_property(property: &RawProperty) -> Vec<Self> {
        let is_date = property
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"));
        let tz = property.param("TZID").and_then(parse_tzid);

        property
            .value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| Self::parse(s, is_date, tz))
            .collect()
    }

    fn parse(value: &str, is_date: bool, tz: Option<chrono_tz::Tz>) -> Option<Self> {
        if is_date || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())) {
            let date = value.get(..8)?;
            return NaiveDate::parse_from_str(date, DATE_FORMAT)
                .ok()
                .map(Self::Date);
        }

        if let Some(utc) = value.strip_suffix('Z') {
            return NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT)
                .ok()
                .map(Self::Utc);
        }

        let datetime = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()?;
        Some(match tz {
            Some(tz) => Self::Zoned { datetime, tz },
            None => Self::Floating(datetime),
        })
    }

    /// Returns true for all-day dates.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Converts to local wall-clock time. Dates become local midnight.
    pub fn to_local(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            Self::Utc(datetime) => datetime.and_utc().with_timezone(&Local).naive_local(),
            Self::Floating(datetime) => *datetime,
            Self::Zoned { datetime, tz } => tz
                .from_local_datetime(datetime)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(datetime))
                .with_timezone(&Local)
                .naive_local(),
        }
    }
}

/// Resolves a `TZID` parameter to a known zone.
///
/// Some producers prefix the id with a `/`, which is dropped. Unknown ids
/// yield `None` so the value is treated as floating.
fn parse_tzid(tzid: &str) -> Option<chrono_tz::Tz> {
    let tzid = tzid.trim().trim_start_matches('/');
    let tz = tzid.parse::<chrono_tz::Tz>().ok();
    if tz.is_none() {
        debug!(tzid, "Unknown TZID, treating value as floating");
    }
    tz
}

/// Parses an RFC 5545 duration such as `PT15M`, `-P1D` or `P2W`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (is_negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let parsed = iso8601::duration(rest).ok()?;
    let std_duration: std::time::Duration = parsed.into();
    let secs = i64::try_from(std_duration.as_secs()).ok()?;

    Some(Duration::from_seconds(if is_negative { -secs } else { secs }))
}

/// Undoes RFC 5545 TEXT escaping (`\n`, `\,`, `\;`, `\\`).
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
