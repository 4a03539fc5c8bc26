//! Run results and status aggregation

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::status::{BuildRecord, BuildStatus};
use crate::error::PipelineError;

/// Record count per status; every status is always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Totals {
    counts: BTreeMap<BuildStatus, usize>,
}

impl Totals {
    /// Count records by status
    pub fn from_records(records: &[BuildRecord]) -> Self {
        let mut counts: BTreeMap<BuildStatus, usize> =
            BuildStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for record in records {
            *counts.entry(record.status()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of records with `status`
    pub fn get(&self, status: BuildStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Sum over all statuses
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(status, count)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (BuildStatus, usize)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }

    /// Any `failed` or `quality_failed` record exists
    pub fn has_failures(&self) -> bool {
        self.iter().any(|(s, c)| s.is_failure() && c > 0)
    }
}

/// Everything one orchestration run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    records: Vec<BuildRecord>,
    abort: Option<PipelineError>,
}

impl RunReport {
    pub(crate) fn new(records: Vec<BuildRecord>, abort: Option<PipelineError>) -> Self {
        Self { records, abort }
    }

    /// Records in processing order
    pub fn records(&self) -> &[BuildRecord] {
        &self.records
    }

    pub fn totals(&self) -> Totals {
        Totals::from_records(&self.records)
    }

    /// The stop-on-failure abort, if the run ended early
    pub fn aborted(&self) -> Option<&PipelineError> {
        self.abort.as_ref()
    }

    /// Completed every component with no failed or quality-failed record
    pub fn succeeded(&self) -> bool {
        self.abort.is_none() && !self.totals().has_failures()
    }
}
