//! Diagnostics for the icsorg binary.
//!
//! Logs are written to stderr only. Stdout belongs to the summary line and
//! the two dump commands, which users pipe into other tools.
//!
//! ```ignore
//! use icsorg_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::for_cli(cli.debug))?;
//! ```
//!
//! `RUST_LOG` always wins over the configured level, e.g.
//! `RUST_LOG=icsorg_providers=trace icsorg -i calendar.ics -o out.org`.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events pass the default filter.
const ICSORG_TARGETS: &[&str] = &["icsorg", "icsorg_core", "icsorg_providers", "icsorg_client"];

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("tracing already initialized: {0}")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How each log line is rendered, selected with `--log-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    #[default]
    Compact,
    Pretty,
    /// One JSON object per line, with timestamps.
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for icsorg crates when `RUST_LOG` is not set.
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Adds source location and target to every line.
    pub verbose: bool,
}

impl Default for TracingConfig {
    /// Warnings only: a normal run prints nothing but its summary.
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            verbose: false,
        }
    }
}

impl TracingConfig {
    /// Preset for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            verbose: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_cli(debug: bool) -> Self {
        if debug {
            Self::cli_debug()
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Directive enabling `level` for the icsorg crates only, so dependency
    /// chatter (reqwest, hyper) stays hidden.
    pub fn default_directive(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        ICSORG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `RUST_LOG` when it is set and valid, the default directive otherwise.
    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.default_directive())?),
        }
    }
}

/// Installs the global subscriber. Call once, first thing in `main`.
///
/// # Errors
///
/// Fails when a subscriber is already installed.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.env_filter()?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.verbose)
        .with_line_number(config.verbose)
        .with_target(config.verbose);

    let layer = match config.format {
        TracingOutputFormat::Compact => layer.compact().without_time().boxed(),
        TracingOutputFormat::Pretty => layer.pretty().without_time().boxed(),
        TracingOutputFormat::Json => layer.json().boxed(),
    };

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(filter).with(layer))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_run_is_quiet() {
        let config = TracingConfig::for_cli(false);
        assert_eq!(config, TracingConfig::default());
        assert_eq!(config.level, Level::WARN);
        assert!(!config.verbose);
    }

    #[test]
    fn debug_flag_is_verbose() {
        let config = TracingConfig::for_cli(true);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.verbose);
        assert_eq!(config.format, TracingOutputFormat::Compact);
    }

    #[test]
    fn directive_lists_every_crate() {
        assert_eq!(
            TracingConfig::cli_debug().default_directive(),
            "icsorg=debug,icsorg_core=debug,icsorg_providers=debug,icsorg_client=debug"
        );
        assert_eq!(
            TracingConfig::default().default_directive(),
            "icsorg=warn,icsorg_core=warn,icsorg_providers=warn,icsorg_client=warn"
        );
    }

    #[test]
    fn format_is_kept_by_presets() {
        let config = TracingConfig::cli_debug().with_format(TracingOutputFormat::Json);
        assert_eq!(config.format, TracingOutputFormat::Json);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.verbose);
    }
}
