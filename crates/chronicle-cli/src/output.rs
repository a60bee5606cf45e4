//! Output formatting helpers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

use chronicle_core::archive::writer::AGGREGATE_FILE;
use chronicle_core::{Error, Phase, PhaseReport, Progress, RunState, Unit};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the per-phase summary and every failed unit.
pub fn summary(report: &PhaseReport) {
    field(
        phase_label(report.phase),
        &format!(
            "{} archived, {} skipped, {} failed, {} records",
            report.archived,
            report.skipped,
            report.failures.len(),
            report.records
        ),
    );
    for failure in &report.failures {
        error(&format!("{}: {}", failure.unit, failure.error));
    }
    if let Some(e) = &report.aggregate_error {
        error(&format!("{}: {}", AGGREGATE_FILE, e));
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Messages => "messages",
        Phase::AuditLogs => "audit logs",
    }
}

/// Writes run progress to the terminal.
///
/// Unit lines are printed in two halves, `Archiving ... ` when a unit starts
/// and the outcome when it ends.
#[derive(Debug)]
pub struct ConsoleProgress {
    output_dir: PathBuf,
    line_open: AtomicBool,
}

impl ConsoleProgress {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            line_open: AtomicBool::new(false),
        }
    }

    /// Print the first half of a line.
    pub fn begin(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
        self.line_open.store(true, Ordering::Relaxed);
    }

    /// Finish the open line, if any.
    fn end(&self, outcome: impl std::fmt::Display) {
        if self.line_open.swap(false, Ordering::Relaxed) {
            println!("{}", outcome);
        }
    }
}

impl Progress for ConsoleProgress {
    fn state_changed(&self, state: RunState) {
        match state {
            RunState::Connected => {
                self.end("done!".green());
                self.begin("Loading guild... ");
            }
            RunState::CommunityResolved => self.end("done!".green()),
            RunState::Finished => success("Archival complete."),
            RunState::Failed => self.end("failed!".red()),
            _ => {}
        }
    }

    fn phase_started(&self, phase: Phase) {
        let dir = self.output_dir.join(phase.dir_name());
        println!(
            "Begin archival of {} (see {}):",
            phase_label(phase),
            dir.display()
        );
    }

    fn phase_finished(&self, _phase: Phase) {
        println!();
    }

    fn unit_skipped(&self, unit: Unit<'_>, reason: &str) {
        println!("    {} {} {}", "Skipping".yellow(), unit, reason);
    }

    fn unit_started(&self, unit: Unit<'_>) {
        self.begin(&format!("    Archiving {} ... ", unit));
    }

    fn unit_finished(&self, _unit: Unit<'_>, records: usize) {
        self.end(format!("{} ({} records)", "done.".green(), records));
    }

    fn unit_failed(&self, _unit: Unit<'_>, error: &Error) {
        self.end(format!("{} {}", "failed:".red(), error));
    }

    fn aggregate_started(&self, phase: Phase) {
        self.begin(&format!(
            "    Archiving all {} in one file ({}) ... ",
            phase_label(phase),
            AGGREGATE_FILE
        ));
    }

    fn aggregate_finished(&self, _phase: Phase, records: usize) {
        self.end(format!("{} ({} records)", "saved.".green(), records));
    }

    fn aggregate_failed(&self, _phase: Phase, error: &Error) {
        self.end(format!("{} {}", "failed:".red(), error));
    }
}
