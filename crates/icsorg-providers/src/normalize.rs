//! Raw record to [`Event`] conversion.
//!
//! This module maps the two record kinds produced by expansion into the
//! canonical [`Event`] every sink renders from:
//! 1. Takes the window from the record (the occurrence window for occurrences)
//! 2. Reads every descriptive field from the owning event item
//! 3. Reads `STATUS` and `LAST-MODIFIED` through [`extract`]
//! 4. Resolves attendees against the configured identity
//!
//! Ids are left empty; the pipeline assigns them after all records of a
//! run are normalized.

use icsorg_core::Event;

use crate::attendee::resolve_attendees;
use crate::property::extract;
use crate::raw_event::RawRecord;

/// Converts one [`RawRecord`] to an [`Event`].
///
/// # Arguments
///
/// * `raw` - An event or occurrence record
/// * `author` - The configured user's name, for attendee matching
/// * `email` - The configured user's email, for attendee matching
pub fn normalize(raw: &RawRecord, author: &str, email: &str) -> Event {
    let (start, end) = raw.window();
    let item = raw.item();
    let component = &item.component;

    let mut event = Event::new(item.uid(), item.summary(), start, end)
        .with_attendees(resolve_attendees(&item.attendees(), author, email))
        .with_duration(item.duration())
        .with_status(extract("status", component).into_text());

    if let Some(modified) = extract("last-modified", component).as_timestamp() {
        event = event.with_modified(modified);
    }

    if let Some(description) = item.description() {
        event = event.with_description(description);
    }

    if let Some(location) = item.location() {
        event = event.with_location(location);
    }

    if let Some(organizer) = item.organizer() {
        event = event.with_organizer(organizer);
    }

    event
}

/// Batch normalize records, preserving input order.
pub fn normalize_all(raw: &[RawRecord], author: &str, email: &str) -> Vec<Event> {
    raw.iter()
        .map(|record| normalize(record, author, email))
        .collect()
}
