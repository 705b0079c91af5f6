//! # Reconciliation
//!
//! Brings the repository index back into agreement with what is actually on
//! disk.
//!
//! - **Prune**: drop records whose directory no longer carries a repository
//!   marker. Only the index changes; the filesystem is never touched, so this
//!   is safe on a half-cloned or hand-pruned workspace.
//! - **Discover**: walk the base directory and index repositories that are
//!   not recorded yet, at the location where they already are.
//! - **Import**: walk an arbitrary directory, move every repository found to
//!   its canonical slot under the base directory and index it.
//!
//! Walking is done by [`RepositoryWalk`], which yields each directory holding a
//! repository marker and does not descend into it: nested repositories are
//! never reported separately. Entries that cannot be identified (no remote,
//! unparseable remote URL) are skipped with a warning rather than failing the
//! whole run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::cache::{RepositoryIndex, RepositoryRecord};
use crate::error::{Error, Result};
use crate::filesystem::relocate_dir;
use crate::identity::{RepositoryIdentity, Resolver};
use crate::path::map_path;
use crate::repository::GitOperations;

/// Lazily walks a directory tree, yielding directories that are repositories.
///
/// When a directory is classified as a repository its subtree is skipped.
/// Unreadable entries are logged and skipped.
pub struct RepositoryWalk<'a> {
    inner: walkdir::IntoIter,
    git: &'a dyn GitOperations,
}

impl<'a> RepositoryWalk<'a> {
    pub fn new(root: &Path, git: &'a dyn GitOperations) -> Self {
        Self {
            inner: WalkDir::new(root).into_iter(),
            git,
        }
    }
}

impl Iterator for RepositoryWalk<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if self.git.is_repository(entry.path()) {
                self.inner.skip_current_dir();
                return Some(entry.into_path());
            }
        }
    }
}

/// Counts of a sync run, with the affected paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Repositories discovered under the base directory and newly indexed
    pub added: Vec<PathBuf>,
    /// Records dropped because their directory is no longer a repository
    pub removed: Vec<PathBuf>,
}

/// What happened to one repository found during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Indexed at `to`; `from == to` when it was already in place
    Imported { from: PathBuf, to: PathBuf },
    /// Left where it was and not indexed
    Skipped { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ImportOutcome::Imported { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.imported()
    }
}

/// Drop every record whose path no longer holds a repository marker.
pub fn prune(index: &mut RepositoryIndex, git: &dyn GitOperations) -> Vec<RepositoryRecord> {
    let removed = index.remove_where(|record| !git.is_repository(&record.path));
    for record in &removed {
        debug!("pruned stale record {}", record.path.display());
    }
    removed
}

/// Index repositories under `base` that have no record yet.
///
/// Repositories are recorded where they are; nothing is moved.
pub fn discover(
    index: &mut RepositoryIndex,
    git: &dyn GitOperations,
    base: &Path,
    resolver: &Resolver<'_>,
) -> Vec<PathBuf> {
    if !base.is_dir() {
        debug!("base {} does not exist, nothing to discover", base.display());
        return Vec::new();
    }

    let mut added = Vec::new();
    for path in RepositoryWalk::new(base, git) {
        if index.get_by_path(&path).is_some() {
            continue;
        }
        match identify(git, resolver, &path) {
            Ok(identity) => {
                debug!("discovered {}", path.display());
                index.add(RepositoryRecord::from_identity(&identity, &path));
                added.push(path);
            }
            Err(reason) => warn!("skipping {}: {}", path.display(), reason),
        }
    }
    added
}

/// Prune stale records, then optionally discover new repositories under `base`.
pub fn sync(
    index: &mut RepositoryIndex,
    git: &dyn GitOperations,
    base: &Path,
    resolver: &Resolver<'_>,
    discover_new: bool,
) -> SyncReport {
    let removed = prune(index, git)
        .into_iter()
        .map(|record| record.path)
        .collect();
    let added = if discover_new {
        discover(index, git, base, resolver)
    } else {
        Vec::new()
    };
    SyncReport { added, removed }
}

/// Move every repository under `source` to its canonical slot below `base`
/// and index it.
///
/// Entries whose remote cannot be read or resolved are skipped. A canonical
/// slot that is already occupied by another directory aborts the import with
/// [`Error::DestinationExists`].
pub fn import(
    index: &mut RepositoryIndex,
    git: &dyn GitOperations,
    source: &Path,
    base: &Path,
    resolver: &Resolver<'_>,
) -> Result<ImportReport> {
    if !source.is_dir() {
        return Err(Error::Path {
            message: format!("source path does not exist: {}", source.display()),
        });
    }

    let mut report = ImportReport::default();
    let mut placed: HashSet<PathBuf> = HashSet::new();

    for path in RepositoryWalk::new(source, git) {
        if placed.contains(&path) {
            continue;
        }
        let identity = match identify(git, resolver, &path) {
            Ok(identity) => identity,
            Err(reason) => {
                warn!("skipping {}: {}", path.display(), reason);
                report.outcomes.push(ImportOutcome::Skipped { path, reason });
                continue;
            }
        };

        let target = map_path(&identity, base);
        if !same_location(&path, &target) {
            relocate_dir(&path, &target)?;
        }
        index.add(RepositoryRecord::from_identity(&identity, &target));
        placed.insert(target.clone());
        report.outcomes.push(ImportOutcome::Imported {
            from: path,
            to: target,
        });
    }

    Ok(report)
}

/// Read and resolve the remote of the repository at `path`.
///
/// Failures are flattened to a reason string: callers skip such entries.
fn identify(
    git: &dyn GitOperations,
    resolver: &Resolver<'_>,
    path: &Path,
) -> std::result::Result<RepositoryIdentity, String> {
    let url = git
        .remote_url(path)
        .map_err(|e| format!("cannot read remote url: {}", e))?;
    resolver
        .resolve(&url)
        .map_err(|e| format!("cannot resolve remote url: {}", e))
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
