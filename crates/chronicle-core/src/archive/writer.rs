//! Archive file naming and atomic emission.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::SerializationError;
use crate::traits::Channel;
use crate::types::AuditAction;
use crate::{Error, Result};

/// File name of the per-phase aggregate.
pub const AGGREGATE_FILE: &str = "__all__.json";

/// `<channelName>.<channelId>.json`.
pub fn message_file_name(channel: &Channel) -> String {
    format!("{}.{}.json", sanitize(&channel.name), channel.id)
}

/// `<actionName>.json`.
pub fn audit_file_name(action: AuditAction) -> String {
    format!("{}.json", action.name())
}

/// Replace path separators and NUL so a name stays a single path segment.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Output {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `records` as one compact JSON array.
///
/// The array is encoded in memory, written to a sibling temp file and renamed
/// over `path`, so readers see either the previous file or the complete new
/// one.
pub fn write_archive<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let content = serde_json::to_vec(records).map_err(|e| SerializationError {
        id: path.display().to_string(),
        message: e.to_string(),
    })?;

    let temp_path = path.with_extension("tmp");
    let output_err = |source| Error::Output {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&temp_path, &content).map_err(output_err)?;
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(output_err(source));
    }

    debug!(path = %path.display(), records = records.len(), "Wrote archive file");
    Ok(())
}
