//! ICS parsing and recurrence expansion.
//!
//! This module turns iCalendar (RFC 5545) text into the two record lists the
//! normalizer consumes. Every VEVENT is read, at any nesting depth:
//! - Events without `RRULE`/`RDATE` become [`EventRecord`]s when they touch
//!   the window.
//! - Recurring events are expanded with the `rrule` crate; each occurrence
//!   that touches the window becomes an [`OccurrenceRecord`].
//! - `RECURRENCE-ID` exceptions replace the occurrence they name. An
//!   exception whose series is absent is kept as a single event.

use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use icalendar::parser::{Component, read_calendar, unfold};
use rrule::RRuleSet;
use serde::Serialize;
use tracing::{debug, warn};

use icsorg_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::property::{IcsTime, parse_duration};
use crate::raw_event::{EventRecord, OccurrenceRecord, RawComponent, RawProperty, RawRecord};

/// Upper bound on occurrences generated per recurring event.
pub const DEFAULT_MAX_ITERATIONS: u16 = 1000;

/// Occurrences are generated this far outside the window before the exact
/// overlap check, so that zone offsets never drop an edge occurrence.
const EXPANSION_MARGIN_DAYS: i64 = 2;

const ICS_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// The records produced from one calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Single events, in source order.
    pub events: Vec<EventRecord>,
    /// Occurrences, grouped by series in source order, chronological within a series.
    pub occurrences: Vec<OccurrenceRecord>,
}

impl Expansion {
    /// Returns all records, events first.
    pub fn into_records(self) -> Vec<RawRecord> {
        self.events
            .into_iter()
            .map(RawRecord::from)
            .chain(self.occurrences.into_iter().map(RawRecord::from))
            .collect()
    }
}

/// Parses calendar text and returns every VEVENT.
pub fn parse_calendar(text: &str) -> ProviderResult<Vec<RawComponent>> {
    let unfolded = unfold(text);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| ProviderError::parse(format!("failed to parse calendar: {}", e)))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        collect_events(component, &mut events);
    }

    debug!(count = events.len(), "Parsed VEVENT components");
    Ok(events)
}

fn collect_events(component: &Component<'_>, out: &mut Vec<RawComponent>) {
    if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
        out.push(convert_component(component));
    }
    for child in &component.components {
        collect_events(child, out);
    }
}

fn convert_component(component: &Component<'_>) -> RawComponent {
    let mut raw = RawComponent::new(component.name.as_ref());
    for prop in &component.properties {
        let mut property = RawProperty::new(prop.name.as_ref(), prop.val.as_ref());
        for param in &prop.params {
            let value = param
                .val
                .as_ref()
                .map(|v| v.as_ref().trim_matches('"').to_string())
                .unwrap_or_default();
            property = property.with_param(param.key.as_ref(), value);
        }
        raw = raw.with_property(property);
    }
    raw
}

/// Parses calendar text and expands it against `window`.
///
/// # Errors
///
/// Returns a parse error if the text is not a calendar. Individual events
/// that cannot be read (no `DTSTART`, a broken `RRULE`) are logged and
/// skipped or kept as single events instead.
pub fn expand(text: &str, window: &TimeWindow, max_iterations: u16) -> ProviderResult<Expansion> {
    let components = parse_calendar(text)?;

    let (exceptions, masters): (Vec<_>, Vec<_>) = components
        .into_iter()
        .partition(|c| c.first_property("RECURRENCE-ID").is_some());

    let series_uids: HashSet<String> = masters
        .iter()
        .filter(|c| is_recurring(c))
        .filter_map(|c| c.text("UID"))
        .collect();

    let mut overrides: HashMap<String, Vec<(NaiveDateTime, EventRecord)>> = HashMap::new();
    let mut expansion = Expansion::default();

    for component in exceptions {
        let uid = component.text("UID").unwrap_or_default();
        let recurrence_id = component
            .first_property("RECURRENCE-ID")
            .and_then(IcsTime::from_property)
            .map(|t| t.to_local());
        let Some((record, _)) = read_event(component) else {
            continue;
        };

        match recurrence_id {
            Some(id) if series_uids.contains(&uid) => {
                overrides.entry(uid).or_default().push((id, record));
            }
            _ => {
                debug!(uid = %uid, "Exception without a series, keeping as single event");
                if window.overlaps(record.start, record.end) {
                    expansion.events.push(record);
                }
            }
        }
    }

    for component in masters {
        let recurring = is_recurring(&component);
        let Some((record, start)) = read_event(component) else {
            continue;
        };

        if recurring {
            let uid = record.uid();
            let series_overrides = overrides.get(&uid).map(Vec::as_slice).unwrap_or(&[]);
            match expand_series(&record, &start, series_overrides, window, max_iterations) {
                Ok(occurrences) => {
                    debug!(uid = %uid, count = occurrences.len(), "Expanded recurring event");
                    expansion.occurrences.extend(occurrences);
                    continue;
                }
                Err(e) => {
                    warn!(uid = %uid, error = %e, "Cannot expand recurring event, keeping as single event");
                }
            }
        }

        if window.overlaps(record.start, record.end) {
            expansion.events.push(record);
        }
    }

    debug!(
        events = expansion.events.len(),
        occurrences = expansion.occurrences.len(),
        "Expansion complete"
    );
    Ok(expansion)
}

fn is_recurring(component: &RawComponent) -> bool {
    component.first_property("RRULE").is_some() || component.first_property("RDATE").is_some()
}

/// Builds an [`EventRecord`] with its window resolved to local time.
///
/// A missing `DTEND` falls back to `DTSTART + DURATION`, then to one day
/// for all-day events, then to `DTSTART`.
fn read_event(component: RawComponent) -> Option<(EventRecord, IcsTime)> {
    let Some(start) = component
        .first_property("DTSTART")
        .and_then(IcsTime::from_property)
    else {
        debug!(uid = ?component.text("UID"), "Skipping VEVENT without a usable DTSTART");
        return None;
    };

    let start_local = start.to_local();
    let end_local = component
        .first_property("DTEND")
        .and_then(IcsTime::from_property)
        .map(|end| end.to_local())
        .or_else(|| {
            component
                .first_property("DURATION")
                .and_then(|p| parse_duration(&p.value))
                .map(|d| start_local + d.to_delta())
        })
        .unwrap_or_else(|| {
            if start.is_date() {
                start_local + TimeDelta::days(1)
            } else {
                start_local
            }
        });

    Some((EventRecord::new(start_local, end_local, component), start))
}

/// Expands one recurring event into the occurrences that touch `window`.
fn expand_series(
    master: &EventRecord,
    start: &IcsTime,
    overrides: &[(NaiveDateTime, EventRecord)],
    window: &TimeWindow,
    max_iterations: u16,
) -> ProviderResult<Vec<OccurrenceRecord>> {
    let length = master.end - master.start;
    let component = &master.component;

    let mut starts = rrule_starts(master, start, length, window, max_iterations)?;
    starts.extend(
        component
            .properties_named("RDATE")
            .flat_map(IcsTime::all_from_property)
            .map(|t| t.to_local()),
    );

    let excluded: HashSet<NaiveDateTime> = component
        .properties_named("EXDATE")
        .flat_map(IcsTime::all_from_property)
        .map(|t| t.to_local())
        .collect();

    starts.retain(|s| !excluded.contains(s));
    starts.sort();
    starts.dedup();

    let occurrences = starts
        .into_iter()
        .map(|occurrence_start| {
            match overrides.iter().find(|(id, _)| *id == occurrence_start) {
                Some((_, exception)) => {
                    OccurrenceRecord::new(exception.start, exception.end, exception.clone())
                }
                None => OccurrenceRecord::new(
                    occurrence_start,
                    occurrence_start + length,
                    master.clone(),
                ),
            }
        })
        .filter(|o| window.overlaps(o.start, o.end))
        .collect();

    Ok(occurrences)
}

/// Returns the local start of every `RRULE` occurrence near `window`.
fn rrule_starts(
    master: &EventRecord,
    start: &IcsTime,
    length: TimeDelta,
    window: &TimeWindow,
    max_iterations: u16,
) -> ProviderResult<Vec<NaiveDateTime>> {
    let rules: Vec<&RawProperty> = master.component.properties_named("RRULE").collect();
    if rules.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = vec![dtstart_line(start)];
    lines.extend(rules.iter().map(|r| rrule_line(&r.value, start)));
    let rule_text = lines.join("\n");

    let rule_set: RRuleSet = rule_text.parse().map_err(|e| {
        ProviderError::parse(format!(
            "failed to parse RRULE for event '{}': {}",
            master.uid(),
            e
        ))
    })?;

    // Bounds are expressed in the frame of DTSTART; the margin absorbs the
    // difference between that frame and local time.
    let margin = TimeDelta::days(EXPANSION_MARGIN_DAYS);
    let tz = rrule::Tz::UTC;
    let after = (window.start - length - margin).and_utc().with_timezone(&tz);
    let before = (window.end + margin).and_utc().with_timezone(&tz);

    let result = rule_set.after(after).before(before).all(max_iterations);
    if result.limited {
        debug!(uid = %master.uid(), max_iterations, "Recurrence expansion hit the iteration cap");
    }

    Ok(result
        .dates
        .iter()
        .map(|dt| match start {
            IcsTime::Date(_) | IcsTime::Floating(_) => dt.naive_utc(),
            IcsTime::Utc(_) | IcsTime::Zoned { .. } => dt.with_timezone(&Local).naive_local(),
        })
        .collect())
}

/// Renders DTSTART for the `rrule` parser.
///
/// Dates and floating times are expanded as if they were UTC and read back
/// with `naive_utc`, which keeps their wall-clock value.
fn dtstart_line(start: &IcsTime) -> String {
    match start {
        IcsTime::Date(date) => format!("DTSTART:{}T000000Z", date.format("%Y%m%d")),
        IcsTime::Utc(dt) | IcsTime::Floating(dt) => {
            format!("DTSTART:{}Z", dt.format(ICS_DATE_TIME_FORMAT))
        }
        IcsTime::Zoned { datetime, tz } => format!(
            "DTSTART;TZID={}:{}",
            tz.name(),
            datetime.format(ICS_DATE_TIME_FORMAT)
        ),
    }
}

/// Renders an RRULE for the `rrule` parser, with `UNTIL` moved into the
/// same frame as [`dtstart_line`].
///
/// Feeds write `UNTIL` in the form of their DTSTART (a date or a floating
/// time) while the parser wants UTC whenever DTSTART is UTC.
fn rrule_line(rule: &str, start: &IcsTime) -> String {
    let parts: Vec<String> = rule
        .trim()
        .split(';')
        .map(|part| match part.split_once('=') {
            Some((key, value)) if key.eq_ignore_ascii_case("UNTIL") => {
                format!("UNTIL={}", until_in_frame(value.trim(), start))
            }
            _ => part.to_string(),
        })
        .collect();
    format!("RRULE:{}", parts.join(";"))
}

/// Rewrites a date or floating `UNTIL` as UTC in the frame of `start`.
///
/// A date `UNTIL` covers its whole day. Values already in UTC, or that do
/// not parse, are left for the parser to judge.
fn until_in_frame(until: &str, start: &IcsTime) -> String {
    if until.ends_with(['Z', 'z']) {
        return until.to_string();
    }

    let parsed = if until.len() == 8 {
        NaiveDate::parse_from_str(until, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(23, 59, 59))
    } else {
        NaiveDateTime::parse_from_str(until, ICS_DATE_TIME_FORMAT).ok()
    };
    let Some(wall) = parsed else {
        return until.to_string();
    };

    let utc = match start {
        IcsTime::Zoned { tz, .. } => tz
            .from_local_datetime(&wall)
            .earliest()
            .map(|dt| dt.naive_utc())
            .unwrap_or(wall),
        IcsTime::Date(_) | IcsTime::Utc(_) | IcsTime::Floating(_) => wall,
    };
    format!("{}Z", utc.format(ICS_DATE_TIME_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn january() -> TimeWindow {
        TimeWindow::new(at(1, 1, 0, 0), at(1, 31, 23, 59))
    }

    fn calendar(events: &[&str]) -> String {
        let mut text = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//Test//EN\r\n");
        for event in events {
            text.push_str("BEGIN:VEVENT\r\n");
            for line in event.lines() {
                text.push_str(line.trim());
                text.push_str("\r\n");
            }
            text.push_str("END:VEVENT\r\n");
        }
        text.push_str("END:VCALENDAR\r\n");
        text
    }

    const STANDUP: &str = "UID:standup-1@example.com
        SUMMARY:Standup
        DTSTART:20240101T090000
        DTEND:20240101T091500";

    const DAILY: &str = "UID:daily-1@example.com
        SUMMARY:Daily
        DTSTART:20240101T090000
        DTEND:20240101T091500
        RRULE:FREQ=DAILY;COUNT=5";

    mod parsing {
        use super::*;

        #[test]
        fn reads_properties_and_params() {
            let text = calendar(&["UID:x
                SUMMARY:Review
                DTSTART;TZID=Europe/Paris:20240101T090000
                ATTENDEE;CN=\"Smith, John\";PARTSTAT=ACCEPTED:mailto:john.smith@example.com"]);
            let components = parse_calendar(&text).unwrap();

            assert_eq!(components.len(), 1);
            let event = &components[0];
            assert_eq!(event.name, "VEVENT");
            assert_eq!(event.text("SUMMARY").as_deref(), Some("Review"));
            let dtstart = event.first_property("DTSTART").unwrap();
            assert_eq!(dtstart.param("TZID"), Some("Europe/Paris"));
            let attendee = event.first_property("ATTENDEE").unwrap();
            assert_eq!(attendee.param("CN"), Some("Smith, John"));
            assert_eq!(attendee.value, "mailto:john.smith@example.com");
        }

        #[test]
        fn folded_lines_are_joined() {
            let text = "BEGIN:VCALENDAR\r\n\
                        VERSION:2.0\r\n\
                        BEGIN:VEVENT\r\n\
                        UID:folded\r\n\
                        DTSTART:20240101T090000\r\n\
                        DESCRIPTION:Hello \r\n world\r\n\
                        END:VEVENT\r\n\
                        END:VCALENDAR\r\n";
            let components = parse_calendar(text).unwrap();
            assert_eq!(
                components[0].text("DESCRIPTION").as_deref(),
                Some("Hello world")
            );
        }
    }

    mod single_events {
        use super::*;

        #[test]
        fn event_in_window() {
            let expansion = expand(&calendar(&[STANDUP]), &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert_eq!(expansion.events.len(), 1);
            assert!(expansion.occurrences.is_empty());
            let event = &expansion.events[0];
            assert_eq!(event.start, at(1, 1, 9, 0));
            assert_eq!(event.end, at(1, 1, 9, 15));
            assert_eq!(event.summary(), "Standup");
        }

        #[test]
        fn event_outside_window_is_dropped() {
            let window = TimeWindow::new(at(2, 1, 0, 0), at(2, 28, 0, 0));
            let expansion = expand(&calendar(&[STANDUP]), &window, DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion, Expansion::default());
        }

        #[test]
        fn all_day_without_end_lasts_one_day() {
            let text = calendar(&["UID:holiday
                SUMMARY:Holiday
                DTSTART;VALUE=DATE:20240110"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            let event = &expansion.events[0];
            assert_eq!(event.start, at(1, 10, 0, 0));
            assert_eq!(event.end, at(1, 11, 0, 0));
        }

        #[test]
        fn end_from_duration() {
            let text = calendar(&["UID:call
                SUMMARY:Call
                DTSTART:20240110T100000
                DURATION:PT45M"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion.events[0].end, at(1, 10, 10, 45));
        }

        #[test]
        fn no_end_and_no_duration_is_instant() {
            let text = calendar(&["UID:ping
                SUMMARY:Ping
                DTSTART:20240110T100000"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion.events[0].end, at(1, 10, 10, 0));
        }

        #[test]
        fn utc_times_are_localized() {
            let text = calendar(&["UID:utc
                SUMMARY:Utc
                DTSTART:20240110T100000Z
                DTEND:20240110T110000Z"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            let expected = at(1, 10, 10, 0).and_utc().with_timezone(&Local).naive_local();
            assert_eq!(expansion.events[0].start, expected);
        }

        #[test]
        fn missing_dtstart_is_skipped() {
            let text = calendar(&["UID:broken\nSUMMARY:Broken", STANDUP]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion.events.len(), 1);
            assert_eq!(expansion.events[0].uid(), "standup-1@example.com");
        }
    }

    mod recurrence {
        use super::*;

        fn starts(expansion: &Expansion) -> Vec<NaiveDateTime> {
            expansion.occurrences.iter().map(|o| o.start).collect()
        }

        #[test]
        fn daily_count() {
            let expansion = expand(&calendar(&[DAILY]), &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert!(expansion.events.is_empty());
            assert_eq!(
                starts(&expansion),
                (1..=5).map(|d| at(1, d, 9, 0)).collect::<Vec<_>>()
            );
            for occurrence in &expansion.occurrences {
                assert_eq!(occurrence.end - occurrence.start, TimeDelta::minutes(15));
                assert_eq!(occurrence.item.summary(), "Daily");
                assert_eq!(occurrence.item.start, at(1, 1, 9, 0));
            }
        }

        #[test]
        fn window_limits_occurrences() {
            let window = TimeWindow::new(at(1, 2, 0, 0), at(1, 3, 23, 59));
            let expansion = expand(&calendar(&[DAILY]), &window, DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(starts(&expansion), vec![at(1, 2, 9, 0), at(1, 3, 9, 0)]);
        }

        #[test]
        fn exdate_removes_occurrence() {
            let text = calendar(&[format!("{}\nEXDATE:20240103T090000", DAILY).as_str()]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(
                starts(&expansion),
                vec![at(1, 1, 9, 0), at(1, 2, 9, 0), at(1, 4, 9, 0), at(1, 5, 9, 0)]
            );
        }

        #[test]
        fn rdate_adds_occurrence() {
            let text = calendar(&[format!("{}\nRDATE:20240120T090000", DAILY).as_str()]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion.occurrences.len(), 6);
            assert_eq!(expansion.occurrences[5].start, at(1, 20, 9, 0));
        }

        #[test]
        fn date_until_includes_last_day() {
            let text = calendar(&["UID:holiday
                SUMMARY:Holiday
                DTSTART;VALUE=DATE:20240101
                DTEND;VALUE=DATE:20240102
                RRULE:FREQ=DAILY;UNTIL=20240105"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert!(expansion.events.is_empty());
            assert_eq!(
                starts(&expansion),
                (1..=5).map(|d| at(1, d, 0, 0)).collect::<Vec<_>>()
            );
            assert_eq!(expansion.occurrences[4].end, at(1, 6, 0, 0));
        }

        #[test]
        fn floating_until() {
            let text = calendar(&["UID:floating
                SUMMARY:Floating
                DTSTART:20240101T090000
                DTEND:20240101T091500
                RRULE:FREQ=DAILY;UNTIL=20240105T090000"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert!(expansion.events.is_empty());
            assert_eq!(
                starts(&expansion),
                (1..=5).map(|d| at(1, d, 9, 0)).collect::<Vec<_>>()
            );
        }

        #[test]
        fn zoned_series_with_local_until() {
            let text = calendar(&["UID:zoned
                SUMMARY:Zoned
                DTSTART;TZID=Europe/Paris:20240102T090000
                DTEND;TZID=Europe/Paris:20240102T091500
                RRULE:FREQ=DAILY;UNTIL=20240106T090000"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert!(expansion.events.is_empty());
            assert_eq!(expansion.occurrences.len(), 5);
        }

        #[test]
        fn until_is_moved_into_the_expansion_frame() {
            let date = IcsTime::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            assert_eq!(
                rrule_line("FREQ=DAILY;UNTIL=20240105", &date),
                "RRULE:FREQ=DAILY;UNTIL=20240105T235959Z"
            );

            let floating = IcsTime::Floating(at(1, 1, 9, 0));
            assert_eq!(
                rrule_line("FREQ=WEEKLY;UNTIL=20240105T090000;BYDAY=MO", &floating),
                "RRULE:FREQ=WEEKLY;UNTIL=20240105T090000Z;BYDAY=MO"
            );
            assert_eq!(
                rrule_line("FREQ=DAILY;UNTIL=20240105T090000Z", &floating),
                "RRULE:FREQ=DAILY;UNTIL=20240105T090000Z"
            );

            let paris = IcsTime::Zoned {
                datetime: at(1, 1, 9, 0),
                tz: chrono_tz::Europe::Paris,
            };
            assert_eq!(
                rrule_line("FREQ=DAILY;UNTIL=20240105T090000", &paris),
                "RRULE:FREQ=DAILY;UNTIL=20240105T080000Z"
            );
            assert_eq!(rrule_line("FREQ=DAILY;COUNT=3", &paris), "RRULE:FREQ=DAILY;COUNT=3");
        }

        #[test]
        fn iteration_cap() {
            let text = calendar(&["UID:forever
                SUMMARY:Forever
                DTSTART:20240101T090000
                DTEND:20240101T093000
                RRULE:FREQ=DAILY"]);
            let expansion = expand(&text, &january(), 3).unwrap();
            assert_eq!(expansion.occurrences.len(), 3);
        }

        #[test]
        fn exception_replaces_occurrence() {
            let moved = "UID:daily-1@example.com
                SUMMARY:Daily (moved)
                RECURRENCE-ID:20240102T090000
                DTSTART:20240102T140000
                DTEND:20240102T143000";
            let expansion =
                expand(&calendar(&[DAILY, moved]), &january(), DEFAULT_MAX_ITERATIONS).unwrap();

            assert!(expansion.events.is_empty());
            assert_eq!(expansion.occurrences.len(), 5);
            let second = &expansion.occurrences[1];
            assert_eq!(second.start, at(1, 2, 14, 0));
            assert_eq!(second.end, at(1, 2, 14, 30));
            assert_eq!(second.item.summary(), "Daily (moved)");
            assert_eq!(expansion.occurrences[2].item.summary(), "Daily");
        }

        #[test]
        fn orphan_exception_is_single_event() {
            let orphan = "UID:gone@example.com
                SUMMARY:Orphan
                RECURRENCE-ID:20240102T090000
                DTSTART:20240102T090000
                DTEND:20240102T100000";
            let expansion = expand(&calendar(&[orphan]), &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(expansion.events.len(), 1);
            assert_eq!(expansion.events[0].summary(), "Orphan");
        }

        #[test]
        fn broken_rule_keeps_single_event() {
            let text = calendar(&["UID:bad
                SUMMARY:Bad rule
                DTSTART:20240110T090000
                DTEND:20240110T100000
                RRULE:FREQ=SOMETIMES"]);
            let expansion = expand(&text, &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            assert!(expansion.occurrences.is_empty());
            assert_eq!(expansion.events.len(), 1);
        }

        #[test]
        fn records_are_events_first() {
            let expansion =
                expand(&calendar(&[DAILY, STANDUP]), &january(), DEFAULT_MAX_ITERATIONS).unwrap();
            let records = expansion.into_records();
            assert_eq!(records.len(), 6);
            assert!(matches!(records[0], RawRecord::Event(_)));
            assert!(
                records[1..]
                    .iter()
                    .all(|r| matches!(r, RawRecord::Occurrence(_)))
            );
        }
    }
}
