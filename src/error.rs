//! # Error Handling
//!
//! This module defines the centralized error type for the `projj` library. It
//! uses `thiserror` to build a single `Error` enum covering every failure the
//! core can report, each variant carrying enough context for the CLI layer to
//! phrase a useful message.
//!
//! ## Taxonomy
//!
//! - **`Parse`**: a repository reference matched none of the supported forms.
//! - **`AlreadyManaged`**: the canonical path for a reference is already indexed.
//! - **`NotFound`** / **`AmbiguousQuery`**: a query selected zero or several
//!   records where exactly one was required.
//! - **`CorruptIndex`**: the index document exists but cannot be read under the
//!   current or the legacy schema. This is fatal: starting from an empty index
//!   would overwrite the user's bookkeeping on the next save.
//! - **`DestinationExists`**, **`GitClone`**, **`GitCommand`**: failures of the
//!   version-control capability.
//! - **`ConfigParse`**, **`Path`**: configuration and path resolution problems.
//! - **`Io`**, **`Json`**: wrapped lower-level errors with their cause attached.
//!
//! Lower components never swallow errors; they bubble unchanged up to the
//! `workspace` layer and from there to the binary.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for projj operations
#[derive(Error, Debug)]
pub enum Error {
    /// The reference string did not match any recognized repository form.
    #[error("Unrecognized repository reference: {reference}")]
    Parse { reference: String },

    /// A record already exists at the canonical path for this repository.
    #[error("Repository already managed at {}", path.display())]
    AlreadyManaged { path: PathBuf },

    /// No indexed repository matched the query.
    #[error("No repository matches '{query}'")]
    NotFound { query: String },

    /// More than one indexed repository matched a query that needs exactly one.
    #[error("Query '{query}' matches {} repositories: {}", candidates.len(), candidates.join(", "))]
    AmbiguousQuery {
        query: String,
        /// Paths of every matching record, in index order
        candidates: Vec<String>,
    },

    /// The index document could not be parsed under either schema.
    #[error("Corrupt index file {}: {message}", path.display())]
    CorruptIndex { path: PathBuf, message: String },

    /// The destination directory for a clone or relocation is already occupied.
    #[error("Destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    /// `git clone` failed.
    ///
    /// Includes the repository URL, the error output and an optional hint.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// Any other git invocation failed.
    #[error("Git command failed in {}: {command} - {stderr}", path.display())]
    GitCommand {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// The configuration document could not be parsed or holds an invalid value.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A path could not be resolved or used (no home directory for `~`, a
    /// move across filesystems).
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON (de)serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse {
            reference: "not a repo".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unrecognized repository reference"));
        assert!(display.contains("not a repo"));
    }

    #[test]
    fn test_error_display_already_managed() {
        let error = Error::AlreadyManaged {
            path: PathBuf::from("/work/github.com/golang/go"),
        };
        let display = format!("{}", error);
        assert!(display.contains("already managed"));
        assert!(display.contains("/work/github.com/golang/go"));
    }

    #[test]
    fn test_error_display_ambiguous_lists_candidates() {
        let error = Error::AmbiguousQuery {
            query: "go".to_string(),
            candidates: vec!["/w/a/go".to_string(), "/w/b/gopls".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.contains("matches 2 repositories"));
        assert!(display.contains("/w/a/go"));
        assert!(display.contains("/w/b/gopls"));
    }

    #[test]
    fn test_error_display_git_clone_with_hint() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            message: "Authentication failed".to_string(),
            hint: Some("Check SSH keys".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git clone error"));
        assert!(display.contains("https://github.com/test/repo.git"));
        assert!(display.contains("hint:"));
        assert!(display.contains("Check SSH keys"));
    }

    #[test]
    fn test_error_display_git_clone_without_hint() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            message: "Network unreachable".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_corrupt_index() {
        let error = Error::CorruptIndex {
            path: PathBuf::from("/home/u/.projj/cache.json"),
            message: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Corrupt index file"));
        assert!(display.contains("cache.json"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{unclosed").unwrap_err();
        let error: Error = json_error.into();
        assert!(format!("{}", error).contains("JSON error"));
    }
}
