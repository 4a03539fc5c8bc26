//! Build status taxonomy and per-component build records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::core::component::Component;

/// Terminal outcome of one component in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// Builder ran and succeeded
    Built,
    /// Nothing to do, or no builder for the kind
    Skipped,
    /// Component path or required resource absent; no build attempted
    Missing,
    /// Builder ran and did not succeed
    Failed,
    /// Rejected by the quality gate; never handed to a builder
    QualityFailed,
}

impl BuildStatus {
    /// Every status, in report order
    pub const ALL: [BuildStatus; 5] = [
        Self::Built,
        Self::Skipped,
        Self::Missing,
        Self::Failed,
        Self::QualityFailed,
    ];

    /// Machine-readable identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Skipped => "skipped",
            Self::Missing => "missing",
            Self::Failed => "failed",
            Self::QualityFailed => "quality_failed",
        }
    }

    /// Human-readable label used in tables
    pub fn label(self) -> &'static str {
        match self {
            Self::Built => "Built",
            Self::Skipped => "Skipped",
            Self::Missing => "Missing",
            Self::Failed => "Failed",
            Self::QualityFailed => "Quality failed",
        }
    }

    /// Single-glyph status marker
    pub fn icon(self) -> &'static str {
        match self {
            Self::Built => "✓",
            Self::Skipped => "○",
            Self::Missing => "?",
            Self::Failed => "✗",
            Self::QualityFailed => "⚠",
        }
    }

    /// Whether this status degrades the run outcome
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::QualityFailed)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome entry for one component in one run
///
/// Records are built once by the pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    component: Component,
    status: BuildStatus,
    details: Option<String>,
    duration: Option<Duration>,
}

impl BuildRecord {
    /// Create a record with no details or timing
    pub fn new(component: Component, status: BuildStatus) -> Self {
        Self {
            component,
            status,
            details: None,
            duration: None,
        }
    }

    /// Attach free-text details
    #[must_use]
    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Attach a duration
    #[must_use]
    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn component(&self) -> &Component {
        &self.component
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
}
