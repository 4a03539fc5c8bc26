//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;
pub mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::defaults::{DEFAULT_MANIFEST, ENV_MANIFEST};
use crate::core::settings::Settings;
use commands::{Commands, Project};
use output::OutputConfig;

/// Sygmare - quality-gated build orchestration
///
/// Builds the components of a multi-technology ecosystem in dependency
/// order, checking each one before it is built.
#[derive(Parser, Debug)]
#[command(name = "sygmare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Manifest describing the components (discovered from the root if absent)
    #[arg(long, global = true, env = ENV_MANIFEST)]
    pub manifest: Option<PathBuf>,

    /// Project root used for settings lookup and discovery
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let settings = Settings::load(&root).context("Failed to load project settings")?;

        let manifest_path = self
            .manifest
            .or_else(|| settings.run.manifest.clone())
            .unwrap_or_else(|| root.join(DEFAULT_MANIFEST));
        let manifest_path = if manifest_path.is_absolute() {
            manifest_path
        } else {
            root.join(manifest_path)
        };

        let json = self.json || settings.output.json.unwrap_or(false);
        let output = OutputConfig::new(self.quiet, json);

        let project = Project {
            root,
            manifest_path,
            settings,
            output,
        };
        command.run(&project)
    }
}
