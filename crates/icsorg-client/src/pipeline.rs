//! The conversion run: fetch, expand, normalize, render.
//!
//! Events are processed strictly in order. The aggregate file is written
//! once, then each event gets its note file followed by its daily-log entry.

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use icsorg_core::Event;
use icsorg_providers::{DEFAULT_MAX_ITERATIONS, expand, fetch, normalize_all};

use crate::config::Config;
use crate::error::ClientResult;
use crate::sinks::{append_daily, write_note, write_org_file};

/// Fetches the calendar and returns normalized events with fresh ids.
///
/// Single events come first, then recurrence occurrences.
pub async fn load_events(config: &Config) -> ClientResult<Vec<Event>> {
    let text = fetch(config.ics_file.as_deref()).await?;
    let expansion = expand(&text, &config.window, DEFAULT_MAX_ITERATIONS)?;

    let mut events = normalize_all(
        &expansion.into_records(),
        &config.author,
        &config.email,
    );
    assign_ids(&mut events);

    debug!(count = events.len(), "Loaded events");
    Ok(events)
}

/// Gives every event a fresh UUID v4.
pub fn assign_ids(events: &mut [Event]) {
    for event in events {
        event.id = Uuid::new_v4().to_string();
    }
}

/// Writes every output file for `events`.
pub async fn write_all(config: &Config, events: &[Event]) -> ClientResult<()> {
    write_org_file(Path::new(&config.org_file), &config.header(), events).await?;

    for event in events {
        write_note(&config.roam_path, event).await?;
        append_daily(&config.daily_path, event).await?;
    }

    Ok(())
}

/// Runs a full conversion and returns the number of entries written.
///
/// # Errors
///
/// Fails before any output when `ORG_FILE` is unset, and aborts on the
/// first fetch, parse or write failure.
pub async fn run(config: &Config) -> ClientResult<usize> {
    config.require_output()?;

    let events = load_events(config).await?;
    write_all(config, &events).await?;

    info!(org_file = %config.org_file, entries = events.len(), "Conversion complete");
    Ok(events.len())
}
