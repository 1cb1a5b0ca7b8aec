//! Writer: overwrite policy, serialization and persistence of one flow.
//!
//! Order of checks:
//! 1. The format name is parsed (no filesystem access yet)
//! 2. The destination is refused if it exists and `overwrite` is false
//! 3. The map is rendered and atomically written as the whole file

use crate::config::FlowConfig;
use crate::error::{ExportError, Result};
use crate::export::ExportMap;
use crate::fs::atomic_write_file;
use std::path::PathBuf;
use tracing::{debug, info};

/// Write `map` to the destination configured in `flow`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path that was written
/// * `Err(ExportError::UnsupportedFormat)` - Unknown format name; nothing touched
/// * `Err(ExportError::FileExists)` - Destination exists and overwrite is off; nothing written
/// * `Err(ExportError::Io)` - The existence check or the write failed
pub fn write_exports(map: &ExportMap, flow: &FlowConfig) -> Result<PathBuf> {
    let format = flow.export_format()?;
    let path = flow.file.clone();

    let exists = path
        .try_exists()
        .map_err(|e| ExportError::io(&path, e))?;
    if exists && !flow.overwrite {
        return Err(ExportError::FileExists(path));
    }

    let text = format.render(map)?;
    atomic_write_file(&path, &text)?;

    info!(
        file = %path.display(),
        format = %format,
        count = map.len(),
        "exported {} value(s) to {}",
        map.len(),
        path.display()
    );
    for (key, value) in map.iter() {
        debug!(file = %path.display(), "{}={}", key, value);
    }

    Ok(path)
}
