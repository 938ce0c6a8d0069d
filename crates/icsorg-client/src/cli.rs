//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use icsorg_core::TracingOutputFormat;

/// icsorg - Convert an ICS calendar into org-mode files
#[derive(Debug, Default, Parser)]
#[command(name = "icsorg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Used for attendee matching
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// Used for attendee matching
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Path to configuration file [default: ~/.icsorgrc]
    #[arg(long = "config-file", short = 'c')]
    pub config_file: Option<PathBuf>,

    /// Directory for per-event note files
    #[arg(long = "roam-path", short = 'r')]
    pub roam_path: Option<String>,

    /// Directory for daily log files
    #[arg(long = "daily-path", short = 'd')]
    pub daily_path: Option<String>,

    /// Path or http(s) URL of the ICS file to use as input
    #[arg(long = "input-file", short = 'i')]
    pub input_file: Option<String>,

    /// Path to the org file to be created
    #[arg(long = "output-file", short = 'o')]
    pub output_file: Option<String>,

    /// Number of days into the future to include events from [default: 365]
    #[arg(long = "future-days", short = 'f')]
    pub future_days: Option<i64>,

    /// Number of days in the past to include events from [default: 7]
    #[arg(long = "past-days", short = 'p')]
    pub past_days: Option<i64>,

    /// Dump the current configuration and exit
    #[arg(long)]
    pub dump: bool,

    /// Print the normalized events as JSON and exit without writing files
    #[arg(long = "dump-events")]
    pub dump_events: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Format of the diagnostics written to stderr
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Values accepted by `--log-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
        }
    }
}
