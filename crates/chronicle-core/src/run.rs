//! Top-level run sequencing.

use tracing::{debug, error, info, instrument, warn};

use crate::archive::{PhaseReport, archive_audit_logs, archive_messages};
use crate::config::ArchiveConfig;
use crate::error::ConfigError;
use crate::traits::{Community, Progress, Remote, Session};
use crate::{Error, Result};

/// Where a run has got to.
///
/// States advance in declaration order; a phase's state is skipped when the
/// phase is disabled. `Failed` is reachable from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Disconnected,
    Connected,
    CommunityResolved,
    MessagesDone,
    AuditDone,
    Finished,
    Failed,
}

/// Summary of a run that reached the end.
#[derive(Debug)]
pub struct RunReport {
    pub community: Community,
    /// `None` when message archival is disabled.
    pub messages: Option<PhaseReport>,
    /// `None` when audit log archival is disabled.
    pub audit_logs: Option<PhaseReport>,
    pub state: RunState,
}

impl RunReport {
    /// Reports of the phases that ran, in run order.
    pub fn phases(&self) -> impl Iterator<Item = &PhaseReport> {
        self.messages.iter().chain(self.audit_logs.iter())
    }

    /// Returns true if any unit or aggregate of any phase failed.
    pub fn has_failures(&self) -> bool {
        self.phases().any(PhaseReport::has_failures)
    }
}

struct Tracker<'a> {
    state: RunState,
    progress: &'a dyn Progress,
}

impl Tracker<'_> {
    fn advance(&mut self, state: RunState) {
        debug!(from = ?self.state, to = ?state, "Run state");
        self.state = state;
        self.progress.state_changed(state);
    }
}

/// Archive one guild end to end.
///
/// Connects with the configured credential, resolves the guild, runs the
/// enabled phases and always disconnects before returning. A failed
/// disconnect is only reported when nothing else went wrong.
///
/// # Errors
///
/// Returns the first fatal error: invalid configuration, connection failure,
/// [`Error::CommunityNotFound`], or a phase-level failure. Unit failures do
/// not fail the run; they are listed in the returned [`RunReport`].
#[instrument(skip_all, fields(guild = %config.community_id))]
pub async fn run<R>(remote: &R, config: &ArchiveConfig, progress: &dyn Progress) -> Result<RunReport>
where
    R: Remote,
{
    if config.credential.is_blank() {
        return Err(ConfigError::Invalid {
            field: "token",
            reason: "must not be empty".into(),
        }
        .into());
    }

    let mut tracker = Tracker {
        state: RunState::Disconnected,
        progress,
    };

    let session = match remote.connect(&config.credential).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Connect failed");
            tracker.advance(RunState::Failed);
            return Err(e);
        }
    };
    tracker.advance(RunState::Connected);
    info!("Connected");

    let outcome = archive(&session, config, &mut tracker).await;
    let teardown = session.disconnect().await;

    match (outcome, teardown) {
        (Ok(report), Ok(())) => {
            info!("Disconnected");
            Ok(report)
        }
        (Ok(_), Err(e)) => {
            error!(error = %e, "Disconnect failed");
            tracker.advance(RunState::Failed);
            Err(e)
        }
        (Err(e), teardown) => {
            if let Err(teardown_err) = teardown {
                warn!(error = %teardown_err, "Disconnect failed after run error");
            }
            error!(state = ?tracker.state, error = %e, "Run failed");
            tracker.advance(RunState::Failed);
            Err(e)
        }
    }
}

async fn archive<S>(session: &S, config: &ArchiveConfig, tracker: &mut Tracker<'_>) -> Result<RunReport>
where
    S: Session,
{
    let community = session
        .resolve_community(config.community_id)
        .await?
        .ok_or(Error::CommunityNotFound {
            id: config.community_id,
        })?;
    info!(name = %community.name, "Resolved guild");
    tracker.advance(RunState::CommunityResolved);

    let progress = tracker.progress;

    let messages = if config.log_messages {
        let report = archive_messages(session, &community, config, progress).await?;
        tracker.advance(RunState::MessagesDone);
        Some(report)
    } else {
        None
    };

    let audit_logs = if config.log_audit_logs {
        let report = archive_audit_logs(session, &community, config, progress).await?;
        tracker.advance(RunState::AuditDone);
        Some(report)
    } else {
        None
    };

    tracker.advance(RunState::Finished);

    Ok(RunReport {
        community,
        messages,
        audit_logs,
        state: RunState::Finished,
    })
}
