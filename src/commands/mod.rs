//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `projj`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the shared
//!   [`Context`] and performs the command's logic.
//!
//! Commands never phrase library errors themselves: they pass them through
//! `projj::suggestions::explain`, which adds hints where they help.

pub mod add;
pub mod completions;
pub mod config;
pub mod find;
pub mod import;
pub mod init;
pub mod list;
pub mod remove;
pub mod sync;

use std::path::PathBuf;

use anyhow::Result;

use projj::output::OutputConfig;
use projj::suggestions;
use projj::workspace::Workspace;

/// Settings derived from the global flags, shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config_dir: PathBuf,
    pub out: OutputConfig,
}

impl Context {
    /// Load the workspace from the configuration directory.
    pub fn open_workspace(&self) -> Result<Workspace> {
        Workspace::open(&self.config_dir).map_err(|e| suggestions::explain(e, &[]))
    }
}

/// Names of every indexed repository, for "did you mean" hints.
pub(crate) fn known_names(workspace: &Workspace) -> Vec<&str> {
    workspace.list().iter().map(|r| r.name.as_str()).collect()
}
