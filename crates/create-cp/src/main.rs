//! create-cp - scaffold a project from a curated template repository
//!
//! This is the main entry point for the create-cp command-line interface.

mod cli;
mod create;
mod output;
mod prompts;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let code = match create::run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            output::error(&format!("{:#}", e));
            1
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Warnings only by default so prompts stay readable
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
