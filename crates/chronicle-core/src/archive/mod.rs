//! Per-unit archivers and the cross-unit aggregator.
//!
//! Each phase walks its units one at a time. A unit either produces a
//! complete file or nothing; unit-scoped failures are recorded in the
//! [`PhaseReport`] and the phase moves on to the next unit.

mod aggregate;
mod audit;
mod messages;
pub mod writer;

use std::path::Path;

use tracing::{info, warn};

use crate::record::Record;
use crate::traits::{Phase, Progress, Unit};
use crate::{Error, Result};

pub use aggregate::write_aggregate;
pub use audit::archive_audit_logs;
pub use messages::archive_messages;

/// A unit that did not produce a file.
#[derive(Debug)]
pub struct UnitFailure {
    /// Display form of the unit.
    pub unit: String,
    pub error: Error,
}

/// Outcome of one phase.
#[derive(Debug)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Units whose file was written.
    pub archived: usize,
    /// Units excluded by the skip policy.
    pub skipped: usize,
    /// Records written across all unit files.
    pub records: usize,
    pub failures: Vec<UnitFailure>,
    /// Set when `__all__.json` could not be written.
    pub aggregate_error: Option<Error>,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            archived: 0,
            skipped: 0,
            records: 0,
            failures: Vec::new(),
            aggregate_error: None,
        }
    }

    /// Returns true if any unit or the aggregate failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || self.aggregate_error.is_some()
    }
}

/// Loop state shared by both archivers.
struct PhaseRun<'a> {
    report: PhaseReport,
    progress: &'a dyn Progress,
    /// The aggregate buffer; `None` when aggregation is disabled.
    buffer: Option<Vec<Record>>,
}

impl<'a> PhaseRun<'a> {
    fn start(phase: Phase, aggregate: bool, progress: &'a dyn Progress) -> Self {
        progress.phase_started(phase);
        info!(phase = %phase, "Phase started");
        Self {
            report: PhaseReport::new(phase),
            progress,
            buffer: aggregate.then(Vec::new),
        }
    }

    fn skip(&mut self, unit: Unit<'_>, reason: &str) {
        info!(unit = %unit, reason, "Skipping unit");
        self.progress.unit_skipped(unit, reason);
        self.report.skipped += 1;
    }

    /// Record the outcome of one unit whose file write was attempted.
    ///
    /// Records join the aggregate buffer only after their unit file exists.
    /// Errors that are not unit-scoped end the phase.
    fn settle<T>(&mut self, unit: Unit<'_>, outcome: Result<Vec<T>>) -> Result<()>
    where
        T: Into<Record>,
    {
        match outcome {
            Ok(records) => {
                info!(unit = %unit, records = records.len(), "Unit archived");
                self.progress.unit_finished(unit, records.len());
                self.report.archived += 1;
                self.report.records += records.len();
                if let Some(buffer) = self.buffer.as_mut() {
                    buffer.extend(records.into_iter().map(Into::into));
                }
                Ok(())
            }
            Err(e) if e.is_unit_scoped() => {
                warn!(unit = %unit, error = %e, "Unit failed");
                self.progress.unit_failed(unit, &e);
                self.report.failures.push(UnitFailure {
                    unit: unit.to_string(),
                    error: e,
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn finish(mut self, dir: &Path) -> PhaseReport {
        let phase = self.report.phase;
        if let Some(buffer) = self.buffer.take() {
            self.progress.aggregate_started(phase);
            let count = buffer.len();
            match write_aggregate(dir, buffer) {
                Ok(_) => self.progress.aggregate_finished(phase, count),
                Err(e) => {
                    warn!(phase = %phase, error = %e, "Aggregate failed");
                    self.progress.aggregate_failed(phase, &e);
                    self.report.aggregate_error = Some(e);
                }
            }
        }
        self.progress.phase_finished(phase);
        info!(
            phase = %phase,
            archived = self.report.archived,
            skipped = self.report.skipped,
            failed = self.report.failures.len(),
            "Phase finished"
        );
        self.report
    }
}
