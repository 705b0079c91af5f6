//! # Version-Control Capability
//!
//! The core never shells out to git directly. Everything it needs from the
//! version-control tool goes through the [`GitOperations`] trait:
//!
//! - **`clone_repository`**: clone a URL into a not-yet-existing directory.
//! - **`is_repository`**: probe a directory for the repository marker.
//! - **`remote_url`**: read the origin URL of an existing working tree.
//!
//! [`DefaultGitOperations`] wraps the system `git` command via [`crate::git`].
//! Tests swap in an implementation that fabricates working trees on disk, so
//! the workspace and reconciler logic can be exercised without git or network.

use std::path::Path;

use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `target_dir`.
    ///
    /// Implementations create missing parent directories and must fail with
    /// [`crate::error::Error::DestinationExists`] rather than overwrite an
    /// existing `target_dir`.
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// True iff `path` contains the repository metadata marker.
    fn is_repository(&self, path: &Path) -> bool;

    /// The configured remote URL of the working tree at `path`.
    fn remote_url(&self, path: &Path) -> Result<String>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone(url, target_dir)
    }

    fn is_repository(&self, path: &Path) -> bool {
        crate::git::is_repository(path)
    }

    fn remote_url(&self, path: &Path) -> Result<String> {
        crate::git::remote_url(path)
    }
}

/// A `GitOperations` stand-in that fabricates working trees on disk.
///
/// A fake repository is a directory with a `.git/` marker whose remote URL is
/// stored in `.git/fake-remote`, so moving the directory moves its remote too.
#[cfg(test)]
pub(crate) mod fake {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use super::GitOperations;
    use crate::error::{Error, Result};

    const REMOTE_FILE: &str = "fake-remote";

    /// Create a fake working tree at `path` with the given origin URL.
    pub(crate) fn fabricate_repo(path: &Path, url: Option<&str>) {
        let marker = path.join(crate::git::GIT_MARKER);
        fs::create_dir_all(&marker).unwrap();
        if let Some(url) = url {
            fs::write(marker.join(REMOTE_FILE), url).unwrap();
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeGit {
        pub(crate) clone_calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
        pub(crate) clone_error: Option<String>,
    }

    impl FakeGit {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                clone_error: Some(message.to_string()),
                ..Self::default()
            }
        }
    }

    impl GitOperations for FakeGit {
        fn clone_repository(&self, url: &str, target_dir: &Path) -> Result<()> {
            self.clone_calls
                .lock()
                .unwrap()
                .push((url.to_string(), target_dir.to_path_buf()));
            if target_dir.exists() {
                return Err(Error::DestinationExists {
                    path: target_dir.to_path_buf(),
                });
            }
            if let Some(message) = &self.clone_error {
                return Err(Error::GitClone {
                    url: url.to_string(),
                    message: message.clone(),
                    hint: None,
                });
            }
            fabricate_repo(target_dir, Some(url));
            Ok(())
        }

        fn is_repository(&self, path: &Path) -> bool {
            crate::git::is_repository(path)
        }

        fn remote_url(&self, path: &Path) -> Result<String> {
            let remote = path.join(crate::git::GIT_MARKER).join(REMOTE_FILE);
            fs::read_to_string(&remote).map_err(|e| Error::GitCommand {
                command: "config --get remote.origin.url".to_string(),
                path: path.to_path_buf(),
                stderr: e.to_string(),
            })
        }
    }
}
