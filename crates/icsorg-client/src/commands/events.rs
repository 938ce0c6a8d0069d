//! Event dump command.

use std::io::Write;

use icsorg_core::Event;

use crate::config::Config;
use crate::error::ClientResult;
use crate::pipeline::load_events;

/// Fetch and normalize events, then print them as pretty JSON.
///
/// No output files are written.
pub async fn dump(config: &Config) -> ClientResult<()> {
    let events = load_events(config).await?;
    let stdout = std::io::stdout();
    write_events(&events, &mut stdout.lock())
}

/// Writes `events` to `out` as a pretty-printed JSON array.
pub fn write_events(events: &[Event], out: &mut impl Write) -> ClientResult<()> {
    serde_json::to_writer_pretty(&mut *out, events)?;
    writeln!(out)?;
    Ok(())
}
