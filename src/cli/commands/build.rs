//! Build command implementation
//!
//! Implements `sygmare build`: plan the components, run each through the
//! quality gate and its builder, then print the run summary.

use anyhow::{bail, Context, Result};

use super::Project;
use crate::cli::output::{status, ProgressObserver};
use crate::cli::render;
use crate::core::pipeline::{NoopObserver, Orchestrator, OrchestratorConfig, PipelineObserver};
use crate::core::status::BuildStatus;
use crate::infra::builders::default_registry;

/// Build command options
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Log commands instead of running them
    pub dry_run: bool,
    /// Abort at the first failing component
    pub stop_on_failure: bool,
    /// Name filters applied to the planned order
    pub only: Vec<String>,
}

impl BuildOptions {
    /// Combine the flags with the settings file; a set flag always wins
    fn resolve(&self, project: &Project) -> OrchestratorConfig {
        let run = &project.settings.run;
        OrchestratorConfig {
            dry_run: self.dry_run || run.dry_run.unwrap_or(false),
            stop_on_failure: self.stop_on_failure || run.stop_on_failure.unwrap_or(false),
        }
    }
}

/// Execute the build command
pub fn execute(project: &Project, options: &BuildOptions) -> Result<()> {
    let config = options.resolve(project);
    let plan = project.planned(&options.only)?;

    if plan.is_empty() {
        if project.output.is_text() {
            println!("{} No components to build", status::INFO);
        }
        return Ok(());
    }

    tracing::info!(
        "Building {} component(s) (dry_run: {}, stop_on_failure: {})",
        plan.len(),
        config.dry_run,
        config.stop_on_failure
    );

    if config.dry_run && project.output.is_text() {
        println!("{} Dry run: commands are logged, not executed", status::INFO);
    }

    let orchestrator = Orchestrator::new(config, default_registry());
    let mut progress = ProgressObserver::default();
    let mut noop = NoopObserver;
    let observer: &mut dyn PipelineObserver = if project.output.show_progress() {
        &mut progress
    } else {
        &mut noop
    };
    let report = orchestrator.run_with_observer(&plan, observer);

    if project.output.json {
        println!(
            "{}",
            render::render_json(&report).context("Failed to serialize build report")?
        );
    } else if !project.output.quiet {
        println!("\n{}", render::render_table(&report));
    }

    if let Some(abort) = report.aborted() {
        bail!("{abort}");
    }
    let totals = report.totals();
    if totals.has_failures() {
        bail!(
            "{} component(s) failed to build or pass the quality gate",
            totals.get(BuildStatus::Failed) + totals.get(BuildStatus::QualityFailed)
        );
    }

    if project.output.is_text() {
        println!("\n{} Build completed", status::SUCCESS);
    }
    Ok(())
}
