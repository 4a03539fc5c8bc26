//! Manifest loading
//!
//! A manifest is either read from a JSON file (an array of component
//! entries) or, when no file exists, discovered by scanning the project
//! root. Supports environment variable substitution using ${VAR} syntax
//! in paths and command arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::component::{BuildKind, Component, Manifest, QualitySpec};
use crate::error::ManifestError;

/// Directory names never treated as components during discovery
const IGNORED_DIRS: &[&str] = &["node_modules", "target", "__pycache__", "venv"];

/// One component entry as written in the manifest file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentEntry {
    /// Unique component name
    #[serde(default)]
    pub name: Option<String>,

    /// Path, relative to the manifest file unless absolute
    #[serde(default)]
    pub path: Option<String>,

    /// Technology kind
    #[serde(default = "default_kind")]
    pub kind: BuildKind,

    /// Build commands, each an argument vector
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commands: Vec<Vec<String>>,

    /// Names of components that must be built first
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,

    /// Optional quality gate
    #[serde(default)]
    pub quality: Option<QualitySpec>,
}

fn default_kind() -> BuildKind {
    BuildKind::Python
}

/// An explicit `null` list is the same as an absent one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ComponentEntry {
    /// Convert to a component, resolving the path against `base`
    pub fn into_component(self, base: &Path) -> Result<Component, ManifestError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ManifestError::MissingField {
                component: "<unnamed>".to_string(),
                field: "name".to_string(),
            })?;
        let raw_path = self
            .path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ManifestError::MissingField {
                component: name.clone(),
                field: "path".to_string(),
            })?;

        let path = PathBuf::from(substitute_env_vars(&raw_path));
        let path = if path.is_absolute() {
            path
        } else {
            base.join(path)
        };

        let commands = self
            .commands
            .into_iter()
            .map(|cmd| cmd.iter().map(|arg| substitute_env_vars(arg)).collect())
            .collect();

        let mut component = Component::new(name, path, self.kind)
            .with_dependencies(self.dependencies)
            .with_commands(commands);
        if let Some(quality) = self.quality {
            component = component.with_quality(quality);
        }
        Ok(component)
    }
}

/// Parse manifest JSON; relative paths resolve against `base`
pub fn from_json(content: &str, source: &Path, base: &Path) -> Result<Manifest, ManifestError> {
    let entries: Vec<ComponentEntry> =
        serde_json::from_str(content).map_err(|e| ManifestError::ParseError {
            path: source.to_path_buf(),
            error: e.to_string(),
        })?;

    let components = entries
        .into_iter()
        .map(|entry| entry.into_component(base))
        .collect::<Result<Vec<_>, _>>()?;
    Manifest::new(components)
}

/// Read a manifest file
pub fn load_file(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    from_json(&content, path, base)
}

/// Load `manifest_path` if it exists, otherwise discover components under `root`
pub fn load_or_discover(manifest_path: &Path, root: &Path) -> Result<Manifest, ManifestError> {
    if manifest_path.is_file() {
        tracing::info!("Loading manifest from {}", manifest_path.display());
        load_file(manifest_path)
    } else {
        tracing::info!(
            "No manifest at {}, discovering components under {}",
            manifest_path.display(),
            root.display()
        );
        discover(root)
    }
}

/// Build a manifest from the layout of `root`
///
/// Subdirectories with `package.json` become node components, those with
/// Python sources become python components, and top-level `*.sh` files
/// become shell components. Entries are visited in name order.
pub fn discover(root: &Path) -> Result<Manifest, ManifestError> {
    let discovery_error = |e: std::io::Error| ManifestError::DiscoveryError {
        path: root.to_path_buf(),
        error: e.to_string(),
    };

    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .map_err(discovery_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let mut components = Vec::new();
    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') || IGNORED_DIRS.contains(&name.as_str()) {
            continue;
        }

        let kind = if path.is_dir() {
            if path.join("package.json").is_file() {
                Some(BuildKind::Node)
            } else if has_python_sources(&path) {
                Some(BuildKind::Python)
            } else {
                None
            }
        } else if path.extension().is_some_and(|ext| ext == "sh") {
            Some(BuildKind::Shell)
        } else {
            None
        };

        if let Some(kind) = kind {
            tracing::debug!("Discovered {kind} component '{name}'");
            components.push(Component::new(name, path, kind).with_quality(QualitySpec::default()));
        }
    }

    Manifest::new(components)
}

fn has_python_sources(dir: &Path) -> bool {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            e.file_name()
                .to_str()
                .map_or(true, |n| !IGNORED_DIRS.contains(&n))
        })
        .filter_map(Result::ok)
        .any(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "py"))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid env var pattern")
    })
}

/// Replace `${VAR}` with the environment value (empty when unset)
pub fn substitute_env_vars(input: &str) -> String {
    env_var_pattern()
        .replace_all(input, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}
