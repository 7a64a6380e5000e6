//! Themeforge CLI - modular stylesheet theme builder
//!
//! Entry point for the themeforge command-line application.

use anyhow::Result;
use clap::Parser;

use themeforge::cli::output::{display_error, OutputConfig};
use themeforge::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber with verbosity from the CLI flags
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
