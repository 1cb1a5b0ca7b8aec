//! Atomic file replacement for export files.
//!
//! All writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename the temporary file over the target
//!
//! A failed write therefore leaves the previous export untouched. The parent
//! directory must already exist; it is never created here.
//!
//! Replacing an existing file keeps its permission bits, and a symlinked
//! target is written through to the file it points at.
//!
//! On crash, a temporary file may remain (named `.{filename}.tmp`).

use crate::error::{ExportError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// # Returns
///
/// * `Ok(())` - On successful atomic write
/// * `Err(ExportError::Io)` - On write or rename failure, including a missing
///   parent directory
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let target = resolve_target(path)?;
    let temp_path = generate_temp_path(&target)?;
    let permissions = existing_permissions(&target).map_err(|e| ExportError::io(path, e))?;

    write_and_sync(&temp_path, content, permissions).map_err(|e| ExportError::io(path, e))?;

    atomic_replace(&temp_path, &target)?;

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Follow a symlinked destination to the file it points at.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| ExportError::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Permissions of the file about to be replaced, if there is one.
fn existing_permissions(target: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(target) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ExportError::io(
            target,
            io::Error::new(io::ErrorKind::InvalidInput, "invalid file path"),
        )
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync to disk.
///
/// `permissions` are applied before any content is written.
fn write_and_sync(
    path: &Path,
    content: &[u8],
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let mut file = File::create(path)?;

    let written = match permissions {
        Some(perms) => file.set_permissions(perms),
        None => Ok(()),
    }
    .and_then(|()| file.write_all(content))
    .and_then(|()| file.sync_all());
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

/// Rename `source` over `target`, replacing it if it exists.
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ExportError::io(target, e)
    })?;

    sync_parent_dir(target);

    Ok(())
}

/// Persist the directory entry of a renamed file.
#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}
