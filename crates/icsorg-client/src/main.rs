//! icsorg CLI entry point.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use icsorg_client::cli::Cli;
use icsorg_client::commands;
use icsorg_client::config::Config;
use icsorg_client::error::ClientResult;
use icsorg_core::tracing::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = TracingConfig::for_cli(cli.debug).with_format(cli.log_format.into());
    if let Err(e) = init_tracing(log_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = Config::load(&cli, Local::now().naive_local())?;

    if cli.dump {
        return commands::config::dump(&config);
    }

    if cli.dump_events {
        return commands::events::dump(&config).await;
    }

    commands::convert::convert(&config).await
}
