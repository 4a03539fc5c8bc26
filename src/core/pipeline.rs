//! Build orchestration
//!
//! Drives a planned component sequence through the quality gate and the
//! builder registry, one component at a time, producing exactly one
//! [`BuildRecord`] per processed component.

use std::time::Instant;

use crate::core::builder::BuilderRegistry;
use crate::core::component::Component;
use crate::core::quality::{QualityInspector, StrictQualityInspector};
use crate::core::report::RunReport;
use crate::core::status::{BuildRecord, BuildStatus};
use crate::error::PipelineError;

/// Run-wide policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Ask builders not to mutate anything external
    pub dry_run: bool,
    /// Abort the run at the first `failed` or `quality_failed` record
    pub stop_on_failure: bool,
}

/// Progress hooks called while a run is in flight
pub trait PipelineObserver {
    /// A component is about to be evaluated (`index` is zero-based)
    fn component_started(&mut self, _component: &Component, _index: usize, _total: usize) {}

    /// A component's record has been appended
    fn component_finished(&mut self, _record: &BuildRecord) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Sequential quality-gated build driver
pub struct Orchestrator {
    config: OrchestratorConfig,
    inspector: Box<dyn QualityInspector>,
    builders: BuilderRegistry,
}

impl Orchestrator {
    /// Create an orchestrator using the strict quality inspector
    pub fn new(config: OrchestratorConfig, builders: BuilderRegistry) -> Self {
        Self {
            config,
            inspector: Box::new(StrictQualityInspector),
            builders,
        }
    }

    /// Replace the quality inspector
    #[must_use]
    pub fn with_inspector(mut self, inspector: impl QualityInspector + 'static) -> Self {
        self.inspector = Box::new(inspector);
        self
    }

    /// Process `plan` in order without progress reporting
    pub fn run(&self, plan: &[Component]) -> RunReport {
        self.run_with_observer(plan, &mut NoopObserver)
    }

    /// Process `plan` in order, reporting progress to `observer`
    pub fn run_with_observer(
        &self,
        plan: &[Component],
        observer: &mut dyn PipelineObserver,
    ) -> RunReport {
        let mut records = Vec::with_capacity(plan.len());

        for (index, component) in plan.iter().enumerate() {
            observer.component_started(component, index, plan.len());
            let record = self.process(component);
            let status = record.status();
            observer.component_finished(&record);
            records.push(record);

            if self.config.stop_on_failure && status.is_failure() {
                tracing::warn!(
                    "Stopping after '{}' ({status}); {} component(s) not processed",
                    component.name(),
                    plan.len() - index - 1
                );
                let abort = PipelineError::Aborted {
                    component: component.name().to_string(),
                    status,
                };
                return RunReport::new(records, Some(abort));
            }
        }

        RunReport::new(records, None)
    }

    /// Quality gate, capability dispatch and build for one component
    fn process(&self, component: &Component) -> BuildRecord {
        let started = Instant::now();
        tracing::info!("Processing component: {}", component.name());

        let report = self.inspector.evaluate(component);
        if !report.passed() {
            tracing::info!(
                "Quality gate rejected '{}' with {} error(s)",
                component.name(),
                report.error_count()
            );
            return BuildRecord::new(component.clone(), BuildStatus::QualityFailed)
                .with_details(Some(report.formatted()))
                .with_duration(Some(started.elapsed()));
        }

        let Some(builder) = self.builders.get(component.kind()) else {
            let message = format!("Unsupported component kind: {}", component.kind());
            tracing::warn!("{}: {message}", component.name());
            return BuildRecord::new(component.clone(), BuildStatus::Skipped)
                .with_details(Some(message))
                .with_duration(Some(started.elapsed()));
        };

        let (status, details, duration) =
            builder.build(component, self.config.dry_run).into_parts();
        tracing::info!("Component '{}' finished: {status}", component.name());

        BuildRecord::new(component.clone(), status)
            .with_details(details)
            .with_duration(Some(duration.unwrap_or_else(|| started.elapsed())))
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("builders", &self.builders)
            .finish_non_exhaustive()
    }
}
