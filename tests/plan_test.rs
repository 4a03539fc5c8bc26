//! Integration tests for `sygmare plan`
//!
//! The plan command prints the build order and never builds anything.

mod common;

use common::{stderr, stdout, TestProject};
use serde_json::json;

fn names(plan: &serde_json::Value) -> Vec<&str> {
    plan.as_array()
        .expect("plan array")
        .iter()
        .map(|entry| entry["name"].as_str().expect("entry name"))
        .collect()
}

#[test]
fn test_plan_orders_dependencies_first() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "ui", "path": "ui", "kind": "node", "dependencies": ["api", "core"] },
        { "name": "api", "path": "api", "kind": "python", "dependencies": ["core"] },
        { "name": "core", "path": "core", "kind": "python" }
    ]));

    let (output, plan) = project.run_json(&["plan"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(names(&plan), vec!["core", "api", "ui"]);
    assert_eq!(plan[0]["position"], 1);
    assert_eq!(plan[2]["dependencies"], json!(["api", "core"]));
}

#[test]
fn test_plan_keeps_valid_declaration_order() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "c", "path": "c", "kind": "shell" },
        { "name": "a", "path": "a", "kind": "shell" },
        { "name": "b", "path": "b", "kind": "shell", "dependencies": ["a"] }
    ]));

    let (_, plan) = project.run_json(&["plan"]);

    assert_eq!(names(&plan), vec!["c", "a", "b"]);
}

#[test]
fn test_plan_text_output() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "core", "path": "core", "kind": "python" },
        { "name": "ui", "path": "ui", "kind": "node", "dependencies": ["core"] }
    ]));

    let output = project.run(&["plan"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Build order:"));
    assert!(out.contains("1. core (python)"));
    assert!(out.contains("2. ui (node) <- core"));
}

#[test]
fn test_plan_warns_about_kinds_without_builder() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "core", "path": "core", "kind": "python" },
        { "name": "api", "path": "api", "kind": "rust", "dependencies": ["core"] }
    ]));

    let output = project.run(&["plan"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("api: no builder for kind 'rust', it will be skipped"));
    assert!(!out.contains("core: no builder"));
}

#[test]
fn test_plan_does_not_touch_components() {
    let project = TestProject::new();
    project.create_file("boot.sh", "#!/bin/sh\n");
    project.write_manifest(&json!([
        {
            "name": "boot",
            "path": "boot.sh",
            "kind": "shell",
            "commands": [["touch", "built"]]
        }
    ]));

    let output = project.run(&["plan"]);

    assert!(output.status.success());
    assert!(!project.file_exists("built"));
}

#[test]
fn test_plan_self_dependency_is_a_cycle() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "x", "path": "x", "kind": "python", "dependencies": ["x"] }
    ]));

    let output = project.run(&["plan"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Circular dependency detected: x -> x"));
}

#[test]
fn test_plan_filters_after_ordering() {
    let project = TestProject::new();
    project.write_manifest(&json!([
        { "name": "web-ui", "path": "ui", "kind": "node", "dependencies": ["core"] },
        { "name": "core", "path": "core", "kind": "python" },
        { "name": "web-api", "path": "api", "kind": "python", "dependencies": ["core"] }
    ]));

    let (_, plan) = project.run_json(&["plan", "--only", "web"]);

    assert_eq!(names(&plan), vec!["web-ui", "web-api"]);
}

#[test]
fn test_plan_discovers_components_without_manifest() {
    let project = TestProject::new();
    project.create_file("web/package.json", "{}");
    project.create_file("core/pkg/main.py", "print('hi')\n");
    project.create_file("boot.sh", "#!/bin/sh\n");
    project.create_file("docs/README.md", "# docs\n");
    project.create_file("node_modules/left-pad/package.json", "{}");
    project.create_file(".cache/stale.py", "\n");

    let (output, plan) = project.run_json(&["plan"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(names(&plan), vec!["boot.sh", "core", "web"]);
    assert_eq!(plan[0]["kind"], "shell");
    assert_eq!(plan[1]["kind"], "python");
    assert_eq!(plan[2]["kind"], "node");
}

#[test]
fn test_plan_invalid_manifest_fails() {
    let project = TestProject::new();
    project.create_file("sygmare_manifest.json", "{ not json");

    let output = project.run(&["plan"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse manifest"));
}

#[test]
fn test_plan_missing_name_fails() {
    let project = TestProject::new();
    project.write_manifest(&json!([{ "path": "core" }]));

    let output = project.run(&["plan"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing required field 'name'"));
}
