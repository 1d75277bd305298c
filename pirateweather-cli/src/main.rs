//! Binary crate for the `pirateweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive wizard
//! - Printing the report produced by `pirateweather-core`

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod interactive;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Initialize the global tracing subscriber.
///
/// Honours `RUST_LOG` (e.g. `RUST_LOG=pirateweather_core=debug`); otherwise
/// only warnings are shown. Logs go to stderr so stdout carries just the report.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pirateweather=warn,pirateweather_core=warn"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
