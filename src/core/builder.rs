//! Builder capabilities
//!
//! A builder performs the kind-specific build of one component. Builders
//! are looked up by [`BuildKind`] in a [`BuilderRegistry`]; adding a kind
//! means registering another builder, the pipeline does not change.

use std::collections::HashMap;
use std::time::Duration;

use crate::core::component::{BuildKind, Component};
use crate::core::status::BuildStatus;

/// What a builder reports for one component
///
/// Only `built`, `failed`, `skipped` and `missing` can be constructed;
/// `quality_failed` belongs to the quality gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    status: BuildStatus,
    details: Option<String>,
    duration: Option<Duration>,
}

impl BuildOutcome {
    fn with_status(status: BuildStatus, details: Option<String>) -> Self {
        Self {
            status,
            details,
            duration: None,
        }
    }

    pub fn built() -> Self {
        Self::with_status(BuildStatus::Built, None)
    }

    pub fn failed(details: impl Into<String>) -> Self {
        Self::with_status(BuildStatus::Failed, Some(details.into()))
    }

    pub fn skipped(details: impl Into<String>) -> Self {
        Self::with_status(BuildStatus::Skipped, Some(details.into()))
    }

    pub fn missing(details: impl Into<String>) -> Self {
        Self::with_status(BuildStatus::Missing, Some(details.into()))
    }

    /// Attach the time the builder measured itself
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub(crate) fn into_parts(self) -> (BuildStatus, Option<String>, Option<Duration>) {
        (self.status, self.details, self.duration)
    }
}

/// Kind-specific build strategy
///
/// Implementations may assume the quality gate passed, and must report
/// every internal failure as [`BuildOutcome::failed`] instead of panicking.
pub trait Builder {
    fn build(&self, component: &Component, dry_run: bool) -> BuildOutcome;
}

/// Mapping from kind to builder
#[derive(Default)]
pub struct BuilderRegistry {
    builders: HashMap<BuildKind, Box<dyn Builder>>,
}

impl BuilderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the builder for `kind`
    pub fn register(&mut self, kind: BuildKind, builder: impl Builder + 'static) {
        self.builders.insert(kind, Box::new(builder));
    }

    /// Builder for `kind`; `None` means the kind is unsupported here
    pub fn get(&self, kind: &BuildKind) -> Option<&dyn Builder> {
        self.builders.get(kind).map(|b| &**b)
    }

    /// Whether a builder exists for `kind`
    pub fn supports(&self, kind: &BuildKind) -> bool {
        self.builders.contains_key(kind)
    }
}

impl std::fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.builders.keys().map(BuildKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("BuilderRegistry").field("kinds", &kinds).finish()
    }
}
