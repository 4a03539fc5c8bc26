//! Quality gate
//!
//! Read-only structural validation run before a component reaches its
//! builder. Findings are collected exhaustively so one pass shows the
//! whole defect list; only a missing component path short-circuits.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::component::{BuildKind, Component};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Error,
    Warning,
}

impl fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// One quality finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityFinding {
    pub level: FindingLevel,
    pub message: String,
}

/// Result of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    findings: Vec<QualityFinding>,
}

impl QualityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.findings.push(QualityFinding {
            level: FindingLevel::Error,
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.findings.push(QualityFinding {
            level: FindingLevel::Warning,
            message: message.into(),
        });
    }

    pub fn findings(&self) -> &[QualityFinding] {
        &self.findings
    }

    /// No error-level finding exists
    pub fn passed(&self) -> bool {
        self.findings.iter().all(|f| f.level != FindingLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.level == FindingLevel::Error)
            .count()
    }

    /// One `[LEVEL] message` line per finding, or `OK`
    pub fn formatted(&self) -> String {
        if self.findings.is_empty() {
            return "OK".to_string();
        }
        self.findings
            .iter()
            .map(|f| format!("[{}] {}", f.level, f.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Quality evaluation seam used by the pipeline
pub trait QualityInspector {
    fn evaluate(&self, component: &Component) -> QualityReport;
}

/// Default inspector: existence, kind-specific content and declared gate checks
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictQualityInspector;

impl QualityInspector for StrictQualityInspector {
    fn evaluate(&self, component: &Component) -> QualityReport {
        let mut report = QualityReport::new();
        let path = component.path();

        if !path.exists() {
            report.add_error(format!("Path {} does not exist", path.display()));
            return report;
        }

        match component.kind() {
            BuildKind::Python => {
                if !contains_source_file(path, "py") {
                    report.add_error("No Python source files found");
                }
            }
            BuildKind::Node => {
                if !path.join("package.json").is_file() {
                    report.add_error("package.json is required to build a Node project");
                }
            }
            BuildKind::Shell => check_script(path, &mut report),
            BuildKind::Other(kind) => {
                tracing::debug!("No structural checks for kind '{kind}'");
            }
        }

        if let Some(spec) = component.quality() {
            let base = if path.is_file() {
                path.parent().unwrap_or(path)
            } else {
                path
            };
            for required in spec.materialized_paths(base) {
                if !required.exists() {
                    report.add_error(format!("Missing required resource: {}", required.display()));
                }
            }
            if spec.forbid_empty && *component.kind() != BuildKind::Shell && is_empty(path) {
                report.add_error(if path.is_dir() {
                    "Component directory is empty"
                } else {
                    "Component file is empty"
                });
            }
        }

        report
    }
}

fn check_script(path: &Path, report: &mut QualityReport) {
    if !path.is_file() {
        report.add_error("A shell component must point to a single script file");
        return;
    }
    match fs::read(path) {
        Ok(content) if content.is_empty() => report.add_error("Shell script is empty"),
        Ok(content) => {
            if !content.starts_with(b"#!") {
                report.add_warning("Shell script has no shebang line");
            }
        }
        Err(e) => report.add_error(format!("Cannot read script {}: {e}", path.display())),
    }
}

/// A file with the extension exists at or below `path`
fn contains_source_file(path: &Path, extension: &str) -> bool {
    let matches = |p: &Path| p.extension().is_some_and(|ext| ext == extension);
    if path.is_file() {
        return matches(path);
    }
    walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .any(|entry| entry.file_type().is_file() && matches(entry.path()))
}

fn is_empty(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
    } else {
        fs::metadata(path).is_ok_and(|m| m.len() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::QualitySpec;
    use tempfile::TempDir;

    fn errors(report: &QualityReport) -> Vec<&str> {
        report
            .findings()
            .iter()
            .filter(|f| f.level == FindingLevel::Error)
            .map(|f| f.message.as_str())
            .collect()
    }

    #[test]
    fn test_missing_path_yields_single_error() {
        let temp = TempDir::new().unwrap();
        let component = Component::new("ghost", temp.path().join("nope"), BuildKind::Node)
            .with_quality(QualitySpec::requiring(["a", "b"]));

        let report = StrictQualityInspector.evaluate(&component);

        assert!(!report.passed());
        assert_eq!(report.findings().len(), 1);
        assert!(report.findings()[0].message.contains("does not exist"));
    }

    #[test]
    fn test_python_package_with_nested_source_passes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("core/sub")).unwrap();
        fs::write(temp.path().join("core/sub/mod.py"), "x = 1\n").unwrap();
        let component = Component::new("core", temp.path().join("core"), BuildKind::Python);

        let report = StrictQualityInspector.evaluate(&component);
        assert!(report.passed(), "{}", report.formatted());
        assert_eq!(report.formatted(), "OK");
    }

    #[test]
    fn test_python_single_file_component() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("tool.py");
        fs::write(&file, "print('hi')\n").unwrap();

        let ok = StrictQualityInspector.evaluate(&Component::new("tool", &file, BuildKind::Python));
        assert!(ok.passed());

        let txt = temp.path().join("notes.txt");
        fs::write(&txt, "hello").unwrap();
        let bad = StrictQualityInspector.evaluate(&Component::new("notes", &txt, BuildKind::Python));
        assert_eq!(errors(&bad), vec!["No Python source files found"]);
    }

    #[test]
    fn test_node_requires_package_json() {
        let temp = TempDir::new().unwrap();
        let component = Component::new("ui", temp.path(), BuildKind::Node);

        let report = StrictQualityInspector.evaluate(&component);
        assert_eq!(errors(&report).len(), 1);

        fs::write(temp.path().join("package.json"), "{}").unwrap();
        assert!(StrictQualityInspector.evaluate(&component).passed());
    }

    #[test]
    fn test_shell_must_be_non_empty_file() {
        let temp = TempDir::new().unwrap();

        let dir = Component::new("boot", temp.path(), BuildKind::Shell);
        assert!(!StrictQualityInspector.evaluate(&dir).passed());

        let script = temp.path().join("boot.sh");
        fs::write(&script, "").unwrap();
        let empty = Component::new("boot", &script, BuildKind::Shell)
            .with_quality(QualitySpec::default());
        let report = StrictQualityInspector.evaluate(&empty);
        // forbid_empty does not apply to scripts; the kind check already covers it
        assert_eq!(errors(&report), vec!["Shell script is empty"]);
    }

    #[test]
    fn test_shell_without_shebang_is_only_a_warning() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "echo hi\n").unwrap();

        let report = StrictQualityInspector.evaluate(&Component::new("run", &script, BuildKind::Shell));
        assert!(report.passed());
        assert_eq!(report.findings().len(), 1);
        assert_eq!(report.findings()[0].level, FindingLevel::Warning);
    }

    #[test]
    fn test_every_missing_required_path_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.py"), "pass\n").unwrap();
        let component = Component::new("core", temp.path(), BuildKind::Python)
            .with_quality(QualitySpec::requiring(["__init__.py", "setup.cfg", "main.py"]));

        let report = StrictQualityInspector.evaluate(&component);
        let errs = errors(&report);
        assert_eq!(errs.len(), 2);
        assert!(errs[0].ends_with("__init__.py"));
        assert!(errs[1].ends_with("setup.cfg"));
    }

    #[test]
    fn test_required_paths_resolve_against_parent_of_file_component() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("tool.py");
        fs::write(&file, "pass\n").unwrap();
        fs::write(temp.path().join("README"), "docs").unwrap();
        let component = Component::new("tool", &file, BuildKind::Python)
            .with_quality(QualitySpec::requiring(["README"]));

        assert!(StrictQualityInspector.evaluate(&component).passed());
    }

    #[test]
    fn test_forbid_empty_rejects_empty_directory() {
        let temp = TempDir::new().unwrap();
        let component = Component::new("data", temp.path(), BuildKind::Other("assets".into()))
            .with_quality(QualitySpec::default());

        let report = StrictQualityInspector.evaluate(&component);
        assert_eq!(errors(&report), vec!["Component directory is empty"]);
    }

    #[test]
    fn test_forbid_empty_rejects_zero_byte_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("tool.py");
        fs::write(&file, "").unwrap();

        let strict = Component::new("tool", &file, BuildKind::Python)
            .with_quality(QualitySpec::default());
        let report = StrictQualityInspector.evaluate(&strict);
        assert_eq!(errors(&report), vec!["Component file is empty"]);

        let lenient = Component::new("tool", &file, BuildKind::Python).with_quality(QualitySpec {
            forbid_empty: false,
            ..QualitySpec::default()
        });
        assert!(StrictQualityInspector.evaluate(&lenient).passed());
    }

    #[test]
    fn test_findings_accumulate_across_checks() {
        let temp = TempDir::new().unwrap();
        let component = Component::new("ui", temp.path(), BuildKind::Node).with_quality(QualitySpec {
            required_paths: vec!["src".into()],
            forbid_empty: true,
            description: None,
        });

        let report = StrictQualityInspector.evaluate(&component);
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.formatted().lines().count(), 3);
    }
}
