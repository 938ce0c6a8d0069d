//! Raw calendar records produced by ICS expansion.
//!
//! This module defines the two record shapes the normalizer consumes:
//! - [`EventRecord`]: a single, non-recurring event (or an orphaned exception)
//! - [`OccurrenceRecord`]: one resolved window of a recurring series, with
//!   the series' [`EventRecord`] as its `item`
//!
//! Both carry the owning [`RawComponent`] so property lookups stay lazy and
//! typed at the point of use. Names and parameter keys are stored uppercase.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use icsorg_core::Duration;

use crate::property::{parse_duration, unescape_text};

/// A single content line of a calendar component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProperty {
    /// Property name, uppercase (e.g., "DTSTART").
    pub name: String,
    /// Parameters as `(KEY, value)` pairs, keys uppercase, quotes stripped.
    pub params: Vec<(String, String)>,
    /// The raw value, still escaped.
    pub value: String,
}

impl RawProperty {
    /// Creates a property without parameters.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// Builder method to add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into().to_uppercase(), value.into()));
        self
    }

    /// Returns the first parameter with the given key (case-insensitive).
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// A calendar component (VEVENT) with its own properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComponent {
    /// Component name, uppercase (e.g., "VEVENT").
    pub name: String,
    pub properties: Vec<RawProperty>,
}

impl RawComponent {
    /// Creates an empty component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            properties: Vec::new(),
        }
    }

    /// Builder method to add a property.
    pub fn with_property(mut self, property: RawProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the first property with the given name (case-insensitive).
    pub fn first_property(&self, name: &str) -> Option<&RawProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns every property with the given name, in source order.
    pub fn properties_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RawProperty> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the unescaped text of the first property with the given name.
    ///
    /// Empty values are treated as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.first_property(name)
            .map(|p| unescape_text(&p.value))
            .filter(|v| !v.is_empty())
    }
}

/// An `ATTENDEE` line, split into the parameters the resolver needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendee {
    /// The calendar address (usually `mailto:...`).
    pub address: String,
    /// The `CN` parameter.
    pub cn: Option<String>,
    /// The `ROLE` parameter.
    pub role: Option<String>,
    /// The `PARTSTAT` parameter.
    pub partstat: Option<String>,
    /// The `CUTYPE` parameter.
    pub cutype: Option<String>,
    /// The `X-NUM-GUESTS` parameter, when it parses as a number.
    pub guests: Option<u32>,
}

impl RawAttendee {
    /// Reads an attendee from an `ATTENDEE` property.
    pub fn from_property(property: &RawProperty) -> Self {
        let param = |key: &str| {
            property
                .param(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            address: property.value.clone(),
            cn: param("CN"),
            role: param("ROLE"),
            partstat: param("PARTSTAT"),
            cutype: param("CUTYPE"),
            guests: property
                .param("X-NUM-GUESTS")
                .and_then(|v| v.trim().parse().ok()),
        }
    }
}

/// A single event, with its start and end already resolved to local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The VEVENT this record was read from.
    pub component: RawComponent,
}

impl EventRecord {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, component: RawComponent) -> Self {
        Self {
            start,
            end,
            component,
        }
    }

    pub fn uid(&self) -> String {
        self.component.text("UID").unwrap_or_default()
    }

    pub fn summary(&self) -> String {
        self.component.text("SUMMARY").unwrap_or_default()
    }

    pub fn description(&self) -> Option<String> {
        self.component.text("DESCRIPTION")
    }

    pub fn location(&self) -> Option<String> {
        self.component.text("LOCATION")
    }

    /// The organizer's calendar address.
    pub fn organizer(&self) -> Option<String> {
        self.component
            .first_property("ORGANIZER")
            .map(|p| p.value.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// The declared `DURATION`, or the distance from start to end.
    pub fn duration(&self) -> Duration {
        self.component
            .first_property("DURATION")
            .and_then(|p| parse_duration(&p.value))
            .unwrap_or_else(|| Duration::between(self.start, self.end))
    }

    /// Every `ATTENDEE` line, in source order.
    pub fn attendees(&self) -> Vec<RawAttendee> {
        self.component
            .properties_named("ATTENDEE")
            .map(RawAttendee::from_property)
            .collect()
    }
}

/// One occurrence of a recurring event.
///
/// `start`/`end` are the occurrence window; every other field is read from
/// `item`, the series (or the exception that replaced this occurrence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub item: EventRecord,
}

impl OccurrenceRecord {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, item: EventRecord) -> Self {
        Self { start, end, item }
    }
}

/// Either kind of record produced by expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawRecord {
    Event(EventRecord),
    Occurrence(OccurrenceRecord),
}

impl RawRecord {
    /// The window this record covers.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            Self::Event(e) => (e.start, e.end),
            Self::Occurrence(o) => (o.start, o.end),
        }
    }

    /// The record that owns the descriptive fields.
    pub fn item(&self) -> &EventRecord {
        match self {
            Self::Event(e) => e,
            Self::Occurrence(o) => &o.item,
        }
    }
}

impl From<EventRecord> for RawRecord {
    fn from(record: EventRecord) -> Self {
        Self::Event(record)
    }
}

impl From<OccurrenceRecord> for RawRecord {
    fn from(record: OccurrenceRecord) -> Self {
        Self::Occurrence(record)
    }
}
