//! Plan command implementation
//!
//! Implements `sygmare plan` to print the build order without building.

use anyhow::{Context, Result};

use super::Project;
use crate::cli::output::status;
use crate::cli::render;
use crate::infra::builders::default_registry;

/// Execute the plan command
pub fn execute(project: &Project, only: &[String]) -> Result<()> {
    let plan = project.planned(only)?;

    if project.output.json {
        println!(
            "{}",
            render::render_plan_json(&plan).context("Failed to serialize build order")?
        );
        return Ok(());
    }
    if project.output.quiet {
        return Ok(());
    }

    if plan.is_empty() {
        println!("{} No components to build", status::INFO);
        return Ok(());
    }
    println!("{}", render::render_plan(&plan));

    let registry = default_registry();
    for component in plan.iter().filter(|c| !registry.supports(c.kind())) {
        println!(
            "{} {}: no builder for kind '{}', it will be skipped",
            status::WARNING,
            component.name(),
            component.kind()
        );
    }
    Ok(())
}
