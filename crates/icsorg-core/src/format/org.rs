//! Org-mode layouts for the aggregate file, note files and daily logs.
//!
//! Every function here is pure: it renders text from an [`Event`] (and a
//! header for the aggregate file) and leaves writing to the caller. Field
//! names in the property drawer are consumed by downstream org tooling and
//! must not change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{TimestampKind, format_duration, format_range, format_timestamp, linkify};
use crate::event::Event;

/// Column at which drawer values start.
const DRAWER_KEY_WIDTH: usize = 16;

/// Header block written at the top of the aggregate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgHeader {
    pub title: String,
    pub author: String,
    pub email: String,
    pub description: String,
    pub category: String,
    pub startup: String,
    pub filetags: String,
}

impl Default for OrgHeader {
    fn default() -> Self {
        Self {
            title: "Calendar".to_string(),
            author: String::new(),
            email: String::new(),
            description: "converted using icsorg node script".to_string(),
            category: String::new(),
            startup: String::new(),
            filetags: String::new(),
        }
    }
}

/// Renders the aggregate file header, including the trailing blank line.
pub fn render_header(header: &OrgHeader) -> String {
    let mut out = String::new();
    keyword(&mut out, "TITLE", &header.title);
    keyword(&mut out, "AUTHOR", &header.author);
    keyword(&mut out, "EMAIL", &header.email);
    keyword(&mut out, "DESCRIPTION", &header.description);
    keyword(&mut out, "CATEGORY", &header.category);
    keyword(&mut out, "STARTUP", &header.startup);
    keyword(&mut out, "FILETAGS", &header.filetags);
    out.push('\n');
    out
}

/// Renders one aggregate-file entry: heading, drawer, range, description.
pub fn render_entry(event: &Event) -> String {
    let mut out = format!("* {}\n", event.summary);
    render_drawer(&mut out, event, false);
    out.push_str(&format_range(event.start_date, event.end_date));
    out.push('\n');
    if let Some(description) = non_empty(event.description.as_deref()) {
        out.push_str(&format!("\n{}\n", description));
    }
    out
}

/// Renders the full aggregate file: header followed by every entry in order.
pub fn render_aggregate(header: &OrgHeader, events: &[Event]) -> String {
    let mut out = render_header(header);
    for event in events {
        out.push_str(&render_entry(event));
    }
    out
}

/// Renders a per-event note file.
///
/// The drawer additionally carries `START_DATE`/`END_DATE`, and the summary
/// becomes a `#+title:` directive instead of a heading.
pub fn render_note(event: &Event) -> String {
    let mut out = String::new();
    render_drawer(&mut out, event, true);
    out.push_str(&format!("#+title: {}\n", event.summary));
    out
}

/// Renders the header of a new daily-log file.
pub fn render_daily_header(day: NaiveDate, id: &str) -> String {
    let day = day.format("%Y-%m-%d");
    format!(
        ":PROPERTIES:\n\
         :ID:       {id}\n\
         :END:\n\
         #+title: {day}\n\
         * Daily Log for: {day}\n\
         ** Calendar Events\n"
    )
}

/// Renders the bullet appended to a daily log for one event.
pub fn render_daily_entry(event: &Event) -> String {
    format!(
        "- [[id:{}][{}]]\n  {}\n",
        event.id,
        event.summary,
        format_range(event.start_date, event.end_date)
    )
}

/// Renders the property drawer shared by aggregate entries and notes.
fn render_drawer(out: &mut String, event: &Event, with_dates: bool) {
    out.push_str(":PROPERTIES:\n");
    property(out, "ICAL_EVENT", "t");
    property(out, "ID", &event.id);

    if let Some(organizer) = non_empty(event.organizer.as_deref()) {
        property(out, "ORGANIZER", &linkify(organizer));
    }
    if !event.status.is_empty() {
        property(out, "STATUS", &event.status);
    }
    if event.modified.is_some() {
        property(
            out,
            "LAST_MODIFIED",
            &format_timestamp(event.modified, TimestampKind::Inactive),
        );
    }
    if with_dates {
        property(
            out,
            "START_DATE",
            &format_timestamp(Some(event.start_date), TimestampKind::Active),
        );
        property(
            out,
            "END_DATE",
            &format_timestamp(Some(event.end_date), TimestampKind::Active),
        );
    }
    if let Some(location) = non_empty(event.location.as_deref()) {
        property(out, "LOCATION", location);
    }
    if let Some(ref duration) = event.duration {
        property(out, "DURATION", &format_duration(duration));
    }
    if !event.attendees.is_empty() {
        let attendees: Vec<String> = event
            .attendees
            .iter()
            .map(|a| format!("{} ({})", linkify(&a.cn), a.status))
            .collect();
        property(out, "ATTENDEES", &attendees.join(", "));
    }

    out.push_str(":END:\n");
}

fn property(out: &mut String, key: &str, value: &str) {
    let key = format!(":{}:", key);
    out.push_str(&format!("{:<width$}{}\n", key, value, width = DRAWER_KEY_WIDTH));
}

fn keyword(out: &mut String, key: &str, value: &str) {
    let key = format!("#+{}:", key);
    out.push_str(&format!("{:<15}{}\n", key, value));
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
