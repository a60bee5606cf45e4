//! Run configuration handed to the orchestrator.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::credentials::Credential;
use crate::traits::{Channel, Phase};
use crate::types::Snowflake;

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "logs";

/// Everything a run needs besides the remote itself.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Guild to archive.
    pub community_id: Snowflake,
    /// Secret passed to [`crate::Remote::connect`].
    pub credential: Credential,
    /// Run the message phase.
    pub log_messages: bool,
    /// Run the audit log phase.
    pub log_audit_logs: bool,
    /// Also write `__all__.json` per phase.
    pub aggregate: bool,
    /// Category names whose channels are never archived.
    pub categories_to_skip: BTreeSet<String>,
    /// Root directory for archive files.
    pub output_dir: PathBuf,
}

impl ArchiveConfig {
    /// Configuration with both phases enabled and no aggregation.
    pub fn new(community_id: Snowflake, credential: Credential) -> Self {
        Self {
            community_id,
            credential,
            log_messages: true,
            log_audit_logs: true,
            aggregate: false,
            categories_to_skip: BTreeSet::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Directory holding one phase's files.
    pub fn phase_dir(&self, phase: Phase) -> PathBuf {
        self.output_dir.join(phase.dir_name())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns true if the channel sits in a skipped category.
    ///
    /// Uncategorized channels are never skipped.
    pub fn should_skip(&self, channel: &Channel) -> bool {
        channel
            .category
            .as_ref()
            .is_some_and(|category| self.categories_to_skip.contains(category))
    }
}
