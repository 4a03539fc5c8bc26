//! Sygmare CLI - quality-gated build orchestration
//!
//! Entry point for the sygmare command-line application.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sygmare::cli::output::{display_error, OutputConfig};
use sygmare::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG, when set, replaces the level chosen by -v
    let level = OutputConfig::log_level(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
