//! Check command implementation
//!
//! Implements `sygmare check` to run the quality gate on every planned
//! component without building anything.

use anyhow::{bail, Context, Result};

use super::Project;
use crate::cli::output::status;
use crate::cli::render;
use crate::core::quality::{QualityInspector, StrictQualityInspector};

/// Execute the check command
pub fn execute(project: &Project, only: &[String]) -> Result<()> {
    let plan = project.planned(only)?;
    let inspector = StrictQualityInspector;

    let results: Vec<_> = plan
        .into_iter()
        .map(|component| {
            let report = inspector.evaluate(&component);
            tracing::debug!("{}: {}", component.name(), report.formatted());
            (component, report)
        })
        .collect();

    if project.output.json {
        println!(
            "{}",
            render::render_check_json(&results).context("Failed to serialize quality reports")?
        );
    } else if !project.output.quiet {
        if results.is_empty() {
            println!("{} No components to check", status::INFO);
        } else {
            println!("{}", render::render_check(&results));
        }
    }

    let failing: Vec<&str> = results
        .iter()
        .filter(|(_, report)| !report.passed())
        .map(|(component, _)| component.name())
        .collect();
    if !failing.is_empty() {
        bail!("Quality gate failed for: {}", failing.join(", "));
    }

    let warnings = results
        .iter()
        .flat_map(|(_, report)| report.findings())
        .count();
    if project.output.is_text() {
        if warnings > 0 {
            println!("\n{} All components passed with {warnings} warning(s)", status::WARNING);
        } else {
            println!("\n{} All components passed", status::SUCCESS);
        }
    }
    Ok(())
}
