//! CLI, configuration resolution, output sinks and the conversion run
//!
//! This crate provides the `icsorg` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod sinks;

pub use cli::Cli;
pub use config::Config;
pub use error::{ClientError, ClientResult, Sink};
