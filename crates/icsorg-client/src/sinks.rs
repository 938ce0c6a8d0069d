//! Output file writers.
//!
//! Three sinks, all rendered by `icsorg_core::format`:
//! - the aggregate org file, truncated and rewritten on every run
//! - one note file per event, overwritten on every run
//! - one daily log per calendar day, created with a header once and
//!   appended to afterwards, across runs
//!
//! Every IO failure is wrapped in [`ClientError::Render`] naming the sink.
//! Nothing is rolled back: files written before a failure stay on disk.

use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use icsorg_core::{
    Event, OrgHeader, daily_file_name, note_file_name, render_aggregate, render_daily_entry,
    render_daily_header, render_note,
};

use crate::error::{ClientError, ClientResult, Sink};

/// Writes the aggregate org file.
pub async fn write_org_file(path: &Path, header: &OrgHeader, events: &[Event]) -> ClientResult<()> {
    let content = render_aggregate(header, events);
    fs::write(path, content)
        .await
        .map_err(|e| ClientError::render(Sink::OrgFile, e))?;

    debug!(path = %path.display(), entries = events.len(), "Wrote org file");
    Ok(())
}

/// Writes the note file for `event` into `dir`, creating `dir` if needed.
///
/// Returns the path written.
pub async fn write_note(dir: &Path, event: &Event) -> ClientResult<PathBuf> {
    let wrap = |e| ClientError::render(Sink::RoamFile, e);

    fs::create_dir_all(dir).await.map_err(wrap)?;
    let path = dir.join(note_file_name(event));
    fs::write(&path, render_note(event)).await.map_err(wrap)?;

    debug!(path = %path.display(), "Wrote note file");
    Ok(path)
}

/// Appends `event` to the daily log for its start day.
///
/// The log is created with a header (carrying a fresh id) when it does not
/// exist yet. Returns the path written.
pub async fn append_daily(dir: &Path, event: &Event) -> ClientResult<PathBuf> {
    let wrap = |e| ClientError::render(Sink::DailyFile, e);

    fs::create_dir_all(dir).await.map_err(wrap)?;
    let day = event.start_date.date();
    let path = dir.join(daily_file_name(day));
    let exists = fs::try_exists(&path).await.map_err(wrap)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .map_err(wrap)?;

    if !exists {
        let header = render_daily_header(day, &Uuid::new_v4().to_string());
        file.write_all(header.as_bytes()).await.map_err(wrap)?;
        debug!(path = %path.display(), "Created daily log");
    }

    file.write_all(render_daily_entry(event).as_bytes())
        .await
        .map_err(wrap)?;
    file.flush().await.map_err(wrap)?;

    Ok(path)
}
