//! Filesystem helpers shared by the index, the configuration and the
//! reconciler: atomic document writes and repository directory moves.

use std::fs;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use log::debug;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Mode of documents written by [`write_json_atomic`].
#[cfg(unix)]
const DOCUMENT_MODE: u32 = 0o644;

/// Serialize `value` as pretty JSON and write it to `path` without ever
/// exposing a partially written file.
///
/// The document goes to a temporary file in the same directory which is then
/// renamed over `path`. Missing parent directories are created. On Unix the
/// file ends up with mode `0644`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut encoded = serde_json::to_vec_pretty(value)?;
    encoded.push(b'\n');

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&encoded)?;
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(DOCUMENT_MODE))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Move a directory to `to`, creating its parents first.
///
/// Fails with [`Error::DestinationExists`] if `to` is already occupied;
/// nothing is overwritten. Moves are renames, so `from` and `to` must be on
/// the same filesystem.
pub fn relocate_dir(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(Error::DestinationExists {
            path: to.to_path_buf(),
        });
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("moving {} -> {}", from.display(), to.display());
    fs::rename(from, to).map_err(|e| rename_error(e, from, to))
}

fn rename_error(err: io::Error, from: &Path, to: &Path) -> Error {
    if err.kind() != io::ErrorKind::CrossesDevices {
        return Error::Io(err);
    }
    Error::Path {
        message: format!(
            "cannot move {} to {}: moving across filesystems is not supported",
            from.display(),
            to.display()
        ),
    }
}

/// Recursively delete a repository working tree. A missing directory is not
/// an error.
pub fn remove_dir_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
