use tracing::instrument;

use crate::config::ArchiveConfig;
use crate::fetch::fetch_audit_entries;
use crate::traits::{Community, Phase, Progress, Session, Unit};
use crate::types::AuditAction;
use crate::Result;

use super::writer::{audit_file_name, ensure_dir, write_archive};
use super::{PhaseReport, PhaseRun};

/// Archive the audit log of `community`, one file per action type.
#[instrument(skip_all, fields(community = %community.id))]
pub async fn archive_audit_logs<S>(
    session: &S,
    community: &Community,
    config: &ArchiveConfig,
    progress: &dyn Progress,
) -> Result<PhaseReport>
where
    S: Session + ?Sized,
{
    let dir = config.phase_dir(Phase::AuditLogs);
    ensure_dir(&dir)?;

    let mut run = PhaseRun::start(Phase::AuditLogs, config.aggregate, progress);

    for &action in AuditAction::ALL {
        let unit = Unit::AuditAction(action);
        progress.unit_started(unit);

        let path = dir.join(audit_file_name(action));
        let outcome = match fetch_audit_entries(session, community, action).await {
            Ok(records) => write_archive(&path, &records).map(|()| records),
            Err(e) => Err(e),
        };
        run.settle(unit, outcome)?;
    }

    Ok(run.finish(&dir))
}
