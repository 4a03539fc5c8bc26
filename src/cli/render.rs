//! Report rendering
//!
//! Turns run results, plans and quality reports into text tables or JSON.

use serde::Serialize;
use std::fmt::Write as _;

use crate::core::component::Component;
use crate::core::quality::{QualityFinding, QualityReport};
use crate::core::report::{RunReport, Totals};
use crate::core::status::{BuildRecord, BuildStatus};
use crate::error::PipelineError;

#[derive(Serialize)]
struct RecordView<'a> {
    name: &'a str,
    path: String,
    kind: &'a str,
    status: BuildStatus,
    status_label: &'static str,
    duration: Option<f64>,
    details: Option<&'a str>,
}

impl<'a> From<&'a BuildRecord> for RecordView<'a> {
    fn from(record: &'a BuildRecord) -> Self {
        let component = record.component();
        Self {
            name: component.name(),
            path: component.path().display().to_string(),
            kind: component.kind().as_str(),
            status: record.status(),
            status_label: record.status().label(),
            duration: record.duration().map(|d| d.as_secs_f64()),
            details: record.details(),
        }
    }
}

#[derive(Serialize)]
struct AbortView<'a> {
    component: &'a str,
    status: BuildStatus,
}

#[derive(Serialize)]
struct RunView<'a> {
    records: Vec<RecordView<'a>>,
    totals: Totals,
    aborted: Option<AbortView<'a>>,
    succeeded: bool,
}

/// Render a run as pretty JSON
pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    let view = RunView {
        records: report.records().iter().map(RecordView::from).collect(),
        totals: report.totals(),
        aborted: report.aborted().map(|abort| match abort {
            PipelineError::Aborted { component, status } => AbortView {
                component,
                status: *status,
            },
        }),
        succeeded: report.succeeded(),
    };
    serde_json::to_string_pretty(&view)
}

/// Render a run as a text table followed by totals
pub fn render_table(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Build summary:");
    let _ = writeln!(out, "{:<18}{:>10}  Name", "Status", "Duration");
    let _ = writeln!(out, "{}{}  {}", "-".repeat(18), "-".repeat(10), "-".repeat(40));

    for record in report.records() {
        let duration = record
            .duration()
            .map_or_else(|| "-".to_string(), |d| format!("{:.2}s", d.as_secs_f64()));
        let _ = writeln!(
            out,
            "{} {:<16}{:>10}  {}",
            record.status().icon(),
            record.status().label(),
            duration,
            record.component().name()
        );
        if let Some(details) = record.details() {
            for line in details.lines() {
                let _ = writeln!(out, "    ↳ {line}");
            }
        }
    }

    let _ = writeln!(out);
    let totals = report.totals();
    let _ = writeln!(out, "Totals ({} component(s)):", totals.total());
    for (status, count) in totals.iter() {
        let _ = writeln!(out, "  {} {:<16}: {count}", status.icon(), status.label());
    }
    out.trim_end().to_string()
}

#[derive(Serialize)]
struct PlanEntry<'a> {
    position: usize,
    name: &'a str,
    kind: &'a str,
    path: String,
    dependencies: &'a [String],
}

/// Render a build order as pretty JSON
pub fn render_plan_json(plan: &[Component]) -> serde_json::Result<String> {
    let entries: Vec<PlanEntry<'_>> = plan
        .iter()
        .enumerate()
        .map(|(i, c)| PlanEntry {
            position: i + 1,
            name: c.name(),
            kind: c.kind().as_str(),
            path: c.path().display().to_string(),
            dependencies: c.dependencies(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Render a build order as a numbered list
pub fn render_plan(plan: &[Component]) -> String {
    let mut out = String::from("Build order:\n");
    for (i, component) in plan.iter().enumerate() {
        let _ = write!(out, "  {:>3}. {} ({})", i + 1, component.name(), component.kind());
        if !component.dependencies().is_empty() {
            let _ = write!(out, " <- {}", component.dependencies().join(", "));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[derive(Serialize)]
struct CheckEntry<'a> {
    name: &'a str,
    kind: &'a str,
    passed: bool,
    findings: &'a [QualityFinding],
}

/// Render quality reports as pretty JSON
pub fn render_check_json(results: &[(Component, QualityReport)]) -> serde_json::Result<String> {
    let entries: Vec<CheckEntry<'_>> = results
        .iter()
        .map(|(c, r)| CheckEntry {
            name: c.name(),
            kind: c.kind().as_str(),
            passed: r.passed(),
            findings: r.findings(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Render quality reports as text, one block per component
pub fn render_check(results: &[(Component, QualityReport)]) -> String {
    let mut out = String::new();
    for (component, report) in results {
        let marker = if report.passed() {
            BuildStatus::Built.icon()
        } else {
            BuildStatus::QualityFailed.icon()
        };
        let _ = writeln!(out, "{marker} {} ({})", component.name(), component.kind());
        if let Some(description) = component.quality().and_then(|q| q.description.as_deref()) {
            let _ = writeln!(out, "    {description}");
        }
        for finding in report.findings() {
            let _ = writeln!(out, "    ↳ [{}] {}", finding.level, finding.message);
        }
    }
    out.trim_end().to_string()
}
