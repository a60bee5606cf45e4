//! Progress reporting sink.

use std::fmt;

use crate::run::RunState;
use crate::types::AuditAction;
use crate::Error;

use super::Channel;

/// An archival phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Messages,
    AuditLogs,
}

impl Phase {
    /// Directory name under the output root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Phase::Messages => "messages",
            Phase::AuditLogs => "audit_logs",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The granularity of per-file output and of failure isolation.
#[derive(Clone, Copy, Debug)]
pub enum Unit<'a> {
    Channel(&'a Channel),
    AuditAction(AuditAction),
}

impl fmt::Display for Unit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Channel(channel) => write!(f, "#{} ({})", channel.name, channel.id),
            Unit::AuditAction(action) => write!(f, "{}", action),
        }
    }
}

/// Receives human-readable progress.
///
/// Purely informational: nothing the archivers do depends on it. Every
/// method has an empty default.
#[allow(unused_variables)]
pub trait Progress: Send + Sync {
    fn state_changed(&self, state: RunState) {}

    fn phase_started(&self, phase: Phase) {}

    fn phase_finished(&self, phase: Phase) {}

    fn unit_skipped(&self, unit: Unit<'_>, reason: &str) {}

    fn unit_started(&self, unit: Unit<'_>) {}

    fn unit_finished(&self, unit: Unit<'_>, records: usize) {}

    fn unit_failed(&self, unit: Unit<'_>, error: &Error) {}

    fn aggregate_started(&self, phase: Phase) {}

    fn aggregate_finished(&self, phase: Phase, records: usize) {}

    fn aggregate_failed(&self, phase: Phase, error: &Error) {}
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
