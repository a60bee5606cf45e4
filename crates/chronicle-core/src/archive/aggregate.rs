use std::path::{Path, PathBuf};

use crate::Result;
use crate::record::{Record, sort_chronologically};

use super::writer::{AGGREGATE_FILE, write_archive};

/// Sort the aggregate buffer and write it as `__all__.json` under `dir`.
///
/// Records with equal timestamps keep the order they were appended in.
pub fn write_aggregate(dir: &Path, mut records: Vec<Record>) -> Result<PathBuf> {
    sort_chronologically(&mut records);
    let path = dir.join(AGGREGATE_FILE);
    write_archive(&path, &records)?;
    Ok(path)
}
