//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture with an isolated configuration directory
//! and workspace base, plus helpers to seed the index and fake repositories.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_record("go", "https://github.com/golang/go.git", "github.com/golang/go");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{init_git_repo, REMOTE_HOST};
    pub use super::TestFixture;
}

/// Host whose HTTPS URLs [`TestFixture::command_with_git_redirect`] rewrites
/// to local repositories.
pub const REMOTE_HOST: &str = "git.example.test";

/// Timestamp used for seeded records.
pub const SEEDED_AT: &str = "2024-05-01T10:00:00Z";

/// A temporary workspace: `config/` holds the documents, `base/` the clones.
///
/// The configuration document is written on creation with `base` pointing at
/// the fixture's base directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    records: Vec<Value>,
}

impl TestFixture {
    /// Create a fixture with a configuration document and no index.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            records: Vec::new(),
        };
        fixture.write_config(json!({ "base": fixture.base().to_string_lossy() }));
        fixture
    }

    /// Replace the configuration document.
    pub fn write_config(&self, config: Value) {
        self.temp_dir
            .child("config/config.json")
            .write_str(&serde_json::to_string_pretty(&config).unwrap())
            .expect("Failed to write config file");
    }

    /// Record a repository in the index at `base/<rel_path>` without creating it.
    pub fn with_record(mut self, name: &str, url: &str, rel_path: &str) -> Self {
        let platform = rel_path.split('/').next().unwrap_or_default().to_string();
        self.records.push(json!({
            "name": name,
            "url": url,
            "path": self.base().join(rel_path),
            "platform": platform,
            "added_at": SEEDED_AT,
        }));
        self.write_index();
        self
    }

    /// Record a repository and create a marker directory for it on disk.
    pub fn with_repo(self, name: &str, url: &str, rel_path: &str) -> Self {
        self.child(&format!("base/{}/.git", rel_path))
            .create_dir_all()
            .expect("Failed to create repository marker");
        self.with_record(name, url, rel_path)
    }

    /// Write raw content to the index document.
    pub fn with_index_content(self, content: &str) -> Self {
        self.temp_dir
            .child("config/cache.json")
            .write_str(content)
            .expect("Failed to write index");
        self
    }

    fn write_index(&self) {
        let document = json!({ "repositories": self.records, "updated_at": SEEDED_AT });
        self.temp_dir
            .child("config/cache.json")
            .write_str(&serde_json::to_string_pretty(&document).unwrap())
            .expect("Failed to write index");
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn base(&self) -> PathBuf {
        self.path().join("base")
    }

    /// Parse the index document as it is on disk now.
    pub fn index(&self) -> Value {
        let raw = std::fs::read_to_string(self.config_dir().join("cache.json"))
            .expect("Failed to read index");
        serde_json::from_str(&raw).expect("Index should be valid JSON")
    }

    /// Paths of the records in the index document, in order.
    pub fn indexed_paths(&self) -> Vec<String> {
        self.index()["repositories"]
            .as_array()
            .expect("repositories should be an array")
            .iter()
            .map(|r| r["path"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command bound to this fixture's configuration directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("projj");
        cmd.current_dir(self.path())
            .env("PROJJ_CONFIG_DIR", self.config_dir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl TestFixture {
    /// Directory standing in for `https://git.example.test/`.
    pub fn remotes(&self) -> PathBuf {
        self.path().join("remotes")
    }

    /// A command whose git rewrites `https://git.example.test/` URLs to
    /// [`TestFixture::remotes`], so `add` and `import` can run offline.
    pub fn command_with_git_redirect(&self) -> assert_cmd::Command {
        let gitconfig = self.child("gitconfig");
        gitconfig
            .write_str(&format!(
                "[url \"file://{}/\"]\n\tinsteadOf = https://{}/\n",
                self.remotes().display(),
                REMOTE_HOST
            ))
            .expect("Failed to write gitconfig");
        let mut cmd = self.command();
        cmd.env("GIT_CONFIG_GLOBAL", gitconfig.path())
            .env("GIT_CONFIG_NOSYSTEM", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a real git repository at `path` with `origin` set to `remote`.
///
/// Requires a `git` binary; only used by tests behind `integration-tests`.
#[allow(dead_code)]
pub fn init_git_repo(path: &Path, remote: Option<&str>) {
    std::fs::create_dir_all(path).unwrap();
    let status = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(path)
        .status()
        .expect("git should be installed");
    assert!(status.success());
    if let Some(remote) = remote {
        let status = Command::new("git")
            .args(["remote", "add", "origin", remote])
            .current_dir(path)
            .status()
            .unwrap();
        assert!(status.success());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_config() {
        let fixture = TestFixture::new();
        assert!(fixture.config_dir().join("config.json").exists());
    }

    #[test]
    fn test_fixture_with_repo() {
        let fixture = TestFixture::new().with_repo(
            "go",
            "https://github.com/golang/go.git",
            "github.com/golang/go",
        );
        assert!(fixture.base().join("github.com/golang/go/.git").is_dir());
        assert_eq!(fixture.indexed_paths().len(), 1);
    }
}
