//! ondk-setup - ONDK toolchain installer
//!
//! Prints the install path on stdout; everything else goes to stderr.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use console::Style;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use ondk_setup::commands::SetupCommand;

/// Main entry point
#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let command = SetupCommand {
        version: cli.version,
    };

    match command.execute().await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let red = Style::new().red().for_stderr();
            eprintln!("{}", red.apply_to(format!("Error: {err}")));
            ExitCode::FAILURE
        }
    }
}
