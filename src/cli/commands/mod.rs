//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod plan;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::output::OutputConfig;
use crate::core::component::Component;
use crate::core::planner;
use crate::core::settings::Settings;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build components in dependency order behind the quality gate
    Build {
        /// Show the actions without executing them
        #[arg(long)]
        dry_run: bool,

        /// Stop at the first build or quality failure
        #[arg(long)]
        stop_on_failure: bool,

        /// Only components whose name contains FILTER (repeatable)
        #[arg(long = "only", value_name = "FILTER")]
        only: Vec<String>,
    },

    /// Show the build order without building
    Plan {
        /// Only components whose name contains FILTER (repeatable)
        #[arg(long = "only", value_name = "FILTER")]
        only: Vec<String>,
    },

    /// Run the quality gate without building
    Check {
        /// Only components whose name contains FILTER (repeatable)
        #[arg(long = "only", value_name = "FILTER")]
        only: Vec<String>,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self, project: &Project) -> Result<()> {
        match self {
            Self::Build {
                dry_run,
                stop_on_failure,
                only,
            } => build::execute(
                project,
                &build::BuildOptions {
                    dry_run,
                    stop_on_failure,
                    only,
                },
            ),
            Self::Plan { only } => plan::execute(project, &only),
            Self::Check { only } => check::execute(project, &only),
        }
    }
}

/// Resolved invocation context shared by all commands
#[derive(Debug)]
pub struct Project {
    /// Project root
    pub root: PathBuf,
    /// Manifest file (may not exist, in which case components are discovered)
    pub manifest_path: PathBuf,
    /// Settings file contents
    pub settings: Settings,
    /// Output preferences
    pub output: OutputConfig,
}

impl Project {
    /// Load the manifest, plan it, then apply `--only` filters
    pub fn planned(&self, only: &[String]) -> Result<Vec<Component>> {
        planner::load_plan(&self.manifest_path, &self.root, only).with_context(|| {
            format!(
                "Failed to plan components from {}",
                self.manifest_path.display()
            )
        })
    }
}
