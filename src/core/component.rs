//! Component model
//!
//! A [`Component`] is one buildable unit of the ecosystem; a [`Manifest`]
//! is the ordered, name-unique set of components for one run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ManifestError;

/// Technology kind of a component
///
/// Unrecognised kinds are kept as [`BuildKind::Other`] so that a manifest
/// may reference kinds this deployment has no builder for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildKind {
    /// Python package (compiled with `compileall`)
    Python,
    /// Node project driven by `package.json`
    Node,
    /// Single shell script
    Shell,
    /// Any other kind
    Other(String),
}

impl BuildKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Python => "python",
            Self::Node => "node",
            Self::Shell => "shell",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "python" => Self::Python,
            "node" => Self::Node,
            "shell" => Self::Shell,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for BuildKind {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<BuildKind> for String {
    fn from(value: BuildKind) -> Self {
        value.as_str().to_string()
    }
}

/// Declarative quality gate attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySpec {
    /// Paths relative to the component base that must exist
    #[serde(default)]
    pub required_paths: Vec<String>,

    /// Reject an empty component directory or zero-byte file
    #[serde(default = "default_forbid_empty")]
    pub forbid_empty: bool,

    /// Human-readable description of the gate
    #[serde(default)]
    pub description: Option<String>,
}

fn default_forbid_empty() -> bool {
    true
}

impl Default for QualitySpec {
    fn default() -> Self {
        Self {
            required_paths: Vec::new(),
            forbid_empty: default_forbid_empty(),
            description: None,
        }
    }
}

impl QualitySpec {
    /// Gate that only requires the given paths
    pub fn requiring<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_paths: paths.into_iter().map(Into::into).collect(),
            forbid_empty: false,
            description: None,
        }
    }

    /// Resolve every required path against `base`
    pub fn materialized_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.required_paths.iter().map(|rel| base.join(rel)).collect()
    }
}

/// A buildable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    path: PathBuf,
    kind: BuildKind,
    dependencies: Vec<String>,
    build_commands: Vec<Vec<String>>,
    quality: Option<QualitySpec>,
}

impl Component {
    /// Create a component with no dependencies, commands or quality gate
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: BuildKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            dependencies: Vec::new(),
            build_commands: Vec::new(),
            quality: None,
        }
    }

    /// Set declared dependencies (duplicates are collapsed, order kept)
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deps: Vec<String> = Vec::new();
        for dep in dependencies {
            let dep = dep.into();
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self.dependencies = deps;
        self
    }

    /// Set build commands (each an argument vector)
    #[must_use]
    pub fn with_commands(mut self, commands: Vec<Vec<String>>) -> Self {
        self.build_commands = commands;
        self
    }

    /// Attach a quality gate
    #[must_use]
    pub fn with_quality(mut self, quality: QualitySpec) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &BuildKind {
        &self.kind
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn build_commands(&self) -> &[Vec<String>] {
        &self.build_commands
    }

    pub fn quality(&self) -> Option<&QualitySpec> {
        self.quality.as_ref()
    }
}

/// Ordered, name-unique collection of components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    components: Vec<Component>,
}

impl Manifest {
    /// Build a manifest, rejecting duplicate component names
    pub fn new(components: Vec<Component>) -> Result<Self, ManifestError> {
        let mut seen = std::collections::HashSet::new();
        for component in &components {
            if !seen.insert(component.name()) {
                return Err(ManifestError::DuplicateComponent {
                    name: component.name().to_string(),
                });
            }
        }
        Ok(Self { components })
    }

    /// Components in declaration order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Name lookup table
    pub fn by_name(&self) -> HashMap<&str, &Component> {
        self.components.iter().map(|c| (c.name(), c)).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
