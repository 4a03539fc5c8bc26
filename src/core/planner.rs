//! Dependency planning
//!
//! Computes the build order for a manifest: every component appears after
//! all of its dependencies. Ordering is a depth-first post-order walked in
//! declaration order, so identical manifests always yield identical plans
//! and an already-ordered manifest keeps its order.

use std::collections::{HashMap, HashSet};

use std::path::Path;

use crate::core::component::{Component, Manifest};
use crate::core::manifest;
use crate::error::{PlanError, SygmareError};

/// Dependency graph over component names
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Adjacency list: component -> dependencies
    edges: HashMap<String, Vec<String>>,
    /// Nodes in insertion order
    nodes: Vec<String>,
    /// Membership index for `nodes`
    known: HashSet<String>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&mut self, name: &str) {
        if self.known.insert(name.to_string()) {
            self.nodes.push(name.to_string());
        }
    }

    /// Add a component to the graph
    pub fn add_component(&mut self, name: &str, dependencies: Vec<String>) {
        self.add_node(name);
        for dep in &dependencies {
            self.add_node(dep);
        }
        self.edges.insert(name.to_string(), dependencies);
    }

    /// Compute topological sort (build order)
    ///
    /// Returns names in order such that dependencies come before dependents.
    /// The walk keeps an explicit stack, so chain length is bounded by memory
    /// rather than thread stack size.
    pub fn topological_sort(&self) -> Result<Vec<String>, PlanError> {
        let mut visited: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        let mut on_path: HashSet<&str> = HashSet::new();
        let mut result = Vec::with_capacity(self.nodes.len());
        // (node, index of the next dependency to explore)
        let mut stack: Vec<(&str, usize)> = Vec::new();

        for root in &self.nodes {
            if visited.contains(root.as_str()) {
                continue;
            }
            stack.push((root.as_str(), 0));
            on_path.insert(root.as_str());

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let deps: &[String] = self.edges.get(node).map_or(&[], Vec::as_slice);

                let Some(dep) = deps.get(frame.1) else {
                    stack.pop();
                    on_path.remove(node);
                    visited.insert(node);
                    result.push(node.to_string());
                    continue;
                };
                frame.1 += 1;
                let dep = dep.as_str();

                if on_path.contains(dep) {
                    // Only the looping suffix of the walk is part of the cycle
                    let start = stack.iter().position(|(n, _)| *n == dep).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        stack[start..].iter().map(|(n, _)| (*n).to_string()).collect();
                    cycle.push(dep.to_string());
                    return Err(PlanError::CircularDependency { cycle });
                }
                if !visited.contains(dep) {
                    on_path.insert(dep);
                    stack.push((dep, 0));
                }
            }
        }

        Ok(result)
    }
}

/// Order the manifest's components for building
///
/// Fails if any component names an unknown dependency (all unknown names
/// of the first offending component are reported) or if the dependency
/// relation contains a cycle, self-dependencies included.
pub fn plan(manifest: &Manifest) -> Result<Vec<Component>, PlanError> {
    let index = manifest.by_name();
    let mut graph = DependencyGraph::new();

    for component in manifest.components() {
        let missing: Vec<String> = component
            .dependencies()
            .iter()
            .filter(|dep| !index.contains_key(dep.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PlanError::UnknownDependencies {
                component: component.name().to_string(),
                missing,
            });
        }
        graph.add_component(component.name(), component.dependencies().to_vec());
    }

    let order = graph.topological_sort()?;
    tracing::debug!("Planned build order: {}", order.join(", "));

    Ok(order
        .iter()
        .filter_map(|name| index.get(name.as_str()).map(|c| (*c).clone()))
        .collect())
}

/// Keep components whose name contains any filter (case-insensitive)
///
/// An empty filter list keeps everything.
pub fn filter_plan(plan: Vec<Component>, filters: &[String]) -> Vec<Component> {
    if filters.is_empty() {
        return plan;
    }
    let lowered: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();
    plan.into_iter()
        .filter(|component| {
            let name = component.name().to_lowercase();
            lowered.iter().any(|f| name.contains(f.as_str()))
        })
        .collect()
}

/// Load (or discover) the manifest, order it, then apply name filters
pub fn load_plan(
    manifest_path: &Path,
    root: &Path,
    filters: &[String],
) -> Result<Vec<Component>, SygmareError> {
    let manifest = manifest::load_or_discover(manifest_path, root)?;
    let order = plan(&manifest)?;
    Ok(filter_plan(order, filters))
}
