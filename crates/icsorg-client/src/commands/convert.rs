//! The default command: convert the calendar into org files.

use crate::config::Config;
use crate::error::ClientResult;
use crate::pipeline;

/// Run the conversion and report the result on stdout.
pub async fn convert(config: &Config) -> ClientResult<()> {
    let entries = pipeline::run(config).await?;
    println!(
        "Generated new org file in {} with {} entries",
        config.org_file, entries
    );
    Ok(())
}
