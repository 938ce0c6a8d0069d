//! Configuration commands.

use std::io::Write;

use crate::config::Config;
use crate::error::ClientResult;

/// Dump the resolved configuration to stdout as `KEY = value` lines.
pub fn dump(config: &Config) -> ClientResult<()> {
    let stdout = std::io::stdout();
    write_dump(config, &mut stdout.lock())
}

/// Writes the configuration dump to `out`.
pub fn write_dump(config: &Config, out: &mut impl Write) -> ClientResult<()> {
    for (key, value) in config.entries() {
        writeln!(out, "{} = {}", key, value)?;
    }
    Ok(())
}
