//! Sygmare - dependency-ordered, quality-gated build orchestration
//!
//! This library plans the build of a set of heterogeneous components
//! according to their declared dependencies, gates each one behind a
//! structural quality check and records a status per component.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Component model, planner, quality gate and pipeline
//! - [`infra`] - Infrastructure layer (external processes, builders)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

pub use crate::core::component::{BuildKind, Component, Manifest, QualitySpec};
pub use crate::core::pipeline::{Orchestrator, OrchestratorConfig};
pub use crate::core::status::{BuildRecord, BuildStatus};
