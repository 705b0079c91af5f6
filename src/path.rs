//! Path manipulation utilities for projj
//!
//! Maps a resolved [`RepositoryIdentity`] to its slot under the workspace base
//! directory, and expands the `~` shorthand allowed in the configured base.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::identity::RepositoryIdentity;

/// Compute the local directory for a repository: `base/platform/owner/name`.
///
/// Two identities with equal `(platform, owner, name)` always map to the same
/// path; the index relies on this as its only deduplication key.
pub fn map_path(identity: &RepositoryIdentity, base: &Path) -> PathBuf {
    base.join(&identity.platform)
        .join(&identity.owner)
        .join(&identity.name)
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Any other path is returned unchanged. `~user` forms are not supported and
/// are treated literally.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return home_dir();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }
    Ok(PathBuf::from(path))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| Error::Path {
        message: "cannot determine home directory to expand '~'".to_string(),
    })
}
