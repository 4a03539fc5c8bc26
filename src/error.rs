//! Error types for sygmare
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::status::BuildStatus;

/// Dependency planning errors
///
/// Both variants are fatal to a run: no component is processed when
/// planning fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A component references names that are not part of the manifest
    #[error("Unknown dependencies for '{component}': {}", missing.join(", "))]
    UnknownDependencies {
        component: String,
        missing: Vec<String>,
    },

    /// The dependency relation is not acyclic
    #[error("Circular dependency detected: {}", cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },
}

impl PlanError {
    /// Whether this error was caused by a dependency cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

/// Manifest loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read the manifest file
    #[error("Failed to read manifest '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Manifest content is not valid JSON for the expected schema
    #[error("Failed to parse manifest '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// A component entry is structurally invalid
    #[error("Component '{component}' is missing required field '{field}'")]
    MissingField { component: String, field: String },

    /// Two components share a name
    #[error("Duplicate component name '{name}' in manifest")]
    DuplicateComponent { name: String },

    /// Auto-discovery could not read the project root
    #[error("Failed to discover components under '{path}': {error}")]
    DiscoveryError { path: PathBuf, error: String },
}

/// Project settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse settings file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Run-level pipeline failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The run stopped early because of the stop-on-failure policy
    #[error("Run aborted at '{component}' ({status})")]
    Aborted {
        component: String,
        status: BuildStatus,
    },
}

/// Errors that stop a run before any component is processed
#[derive(Error, Debug)]
pub enum SygmareError {
    /// The manifest could not be loaded or discovered
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The components could not be ordered
    #[error(transparent)]
    Plan(#[from] PlanError),
}
