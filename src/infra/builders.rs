//! Builder capabilities for the built-in component kinds
//!
//! Every builder converts its own I/O failures into a `failed` outcome so
//! the pipeline never sees an error.

use std::path::Path;
use std::time::Instant;

use crate::core::builder::{BuildOutcome, Builder, BuilderRegistry};
use crate::core::component::{BuildKind, Component};
use crate::infra::process::{command_exists, failure_details, readable_cmd, run_command};

/// Registry with the python, node and shell builders
pub fn default_registry() -> BuilderRegistry {
    let mut registry = BuilderRegistry::new();
    registry.register(BuildKind::Python, PythonBuilder);
    registry.register(BuildKind::Node, NodeBuilder);
    registry.register(BuildKind::Shell, ShellBuilder);
    registry
}

/// Run commands in order, stopping at the first failure
fn run_all(commands: &[Vec<String>], cwd: Option<&Path>, dry_run: bool) -> BuildOutcome {
    for cmd in commands {
        match run_command(cmd, cwd, dry_run) {
            Ok(result) if result.success => {}
            Ok(result) => return BuildOutcome::failed(failure_details(cmd, &result)),
            Err(e) => {
                return BuildOutcome::failed(format!("Failed to run `{}`: {e}", readable_cmd(cmd)))
            }
        }
    }
    BuildOutcome::built()
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

/// Byte-compiles Python sources
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonBuilder;

impl PythonBuilder {
    fn interpreter() -> Option<&'static str> {
        ["python3", "python"].into_iter().find(|p| command_exists(p))
    }
}

impl Builder for PythonBuilder {
    fn build(&self, component: &Component, dry_run: bool) -> BuildOutcome {
        let started = Instant::now();
        let path = component.path();

        if !path.exists() {
            return BuildOutcome::missing(format!("Directory {} not found", path.display()));
        }

        let has_sources = walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .any(|e| e.path().extension().is_some_and(|ext| ext == "py"));
        if !has_sources {
            return BuildOutcome::skipped("No Python files to compile");
        }

        let outcome = if component.build_commands().is_empty() {
            let Some(python) = Self::interpreter() else {
                return BuildOutcome::skipped("No Python interpreter found in PATH");
            };
            let cmd = vec![
                python.to_string(),
                "-m".to_string(),
                "compileall".to_string(),
                "-q".to_string(),
                path.display().to_string(),
            ];
            run_all(&[cmd], None, dry_run)
        } else {
            let cwd = if path.is_dir() { path } else { path.parent().unwrap_or(path) };
            run_all(component.build_commands(), Some(cwd), dry_run)
        };

        outcome.with_duration(started.elapsed())
    }
}

/// Installs and builds npm projects
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeBuilder;

impl Builder for NodeBuilder {
    fn build(&self, component: &Component, dry_run: bool) -> BuildOutcome {
        let started = Instant::now();
        let path = component.path();

        if !path.join("package.json").is_file() {
            return BuildOutcome::missing(format!("package.json not found in {}", path.display()));
        }

        if !command_exists("npm") {
            return BuildOutcome::skipped("npm is not installed in this environment");
        }

        let defaults;
        let commands: &[Vec<String>] = if component.build_commands().is_empty() {
            defaults = vec![argv(&["npm", "install"]), argv(&["npm", "run", "build"])];
            &defaults
        } else {
            component.build_commands()
        };

        run_all(commands, Some(path), dry_run).with_duration(started.elapsed())
    }
}

/// Lints and runs shell scripts
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellBuilder;

impl ShellBuilder {
    #[cfg(unix)]
    fn make_executable(path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = std::fs::metadata(path)?.permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        std::fs::set_permissions(path, permissions)
    }

    #[cfg(not(unix))]
    fn make_executable(_path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

impl Builder for ShellBuilder {
    fn build(&self, component: &Component, dry_run: bool) -> BuildOutcome {
        let started = Instant::now();
        let path = component.path();

        if !path.exists() {
            return BuildOutcome::missing(format!("Script {} not found", path.display()));
        }
        if !path.is_file() {
            return BuildOutcome::failed(format!(
                "Expected an executable file, found {}",
                path.display()
            ));
        }

        if !dry_run {
            if let Err(e) = Self::make_executable(path) {
                return BuildOutcome::failed(format!(
                    "Cannot mark {} executable: {e}",
                    path.display()
                ));
            }
        }

        if command_exists("shellcheck") {
            let lint = vec!["shellcheck".to_string(), path.display().to_string()];
            let outcome = run_all(&[lint], None, dry_run);
            if outcome.status().is_failure() {
                return outcome.with_duration(started.elapsed());
            }
        } else {
            tracing::debug!("shellcheck not found, skipping lint of {}", path.display());
        }

        let cwd = path.parent().unwrap_or(path);
        run_all(component.build_commands(), Some(cwd), dry_run).with_duration(started.elapsed())
    }
}
