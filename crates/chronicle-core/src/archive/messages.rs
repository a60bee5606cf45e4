use tracing::instrument;

use crate::config::ArchiveConfig;
use crate::fetch::fetch_messages;
use crate::traits::{Community, Phase, Progress, Session, Unit};
use crate::Result;

use super::writer::{ensure_dir, message_file_name, write_archive};
use super::{PhaseReport, PhaseRun};

/// Archive every text channel of `community` that the skip policy allows.
///
/// # Errors
///
/// Fails only if the output directory cannot be created, the channels cannot
/// be listed, or a unit fails with an error that is not unit-scoped.
#[instrument(skip_all, fields(community = %community.id))]
pub async fn archive_messages<S>(
    session: &S,
    community: &Community,
    config: &ArchiveConfig,
    progress: &dyn Progress,
) -> Result<PhaseReport>
where
    S: Session + ?Sized,
{
    let dir = config.phase_dir(Phase::Messages);
    ensure_dir(&dir)?;

    let mut run = PhaseRun::start(Phase::Messages, config.aggregate, progress);
    let channels = session.channels(community).await?;

    for channel in &channels {
        let unit = Unit::Channel(channel);

        if config.should_skip(channel) {
            let category = channel.category.as_deref().unwrap_or_default();
            run.skip(unit, &format!("in {}", category));
            continue;
        }

        progress.unit_started(unit);
        let path = dir.join(message_file_name(channel));
        let outcome = match fetch_messages(session, channel).await {
            Ok(records) => write_archive(&path, &records).map(|()| records),
            Err(e) => Err(e),
        };
        run.settle(unit, outcome)?;
    }

    Ok(run.finish(&dir))
}
