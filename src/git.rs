use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::Error;

/// Name of the metadata entry marking a git working tree.
pub const GIT_MARKER: &str = ".git";

/// Clone `url` into `target_dir` with the system git command.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// Parent directories are created first. An existing `target_dir` is never
/// touched: the call fails with [`Error::DestinationExists`]. Git's progress
/// output goes straight to the terminal.
pub fn clone(url: &str, target_dir: &Path) -> Result<(), Error> {
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    if target_dir.exists() {
        return Err(Error::DestinationExists {
            path: target_dir.to_path_buf(),
        });
    }

    debug!("git clone {} {}", url, target_dir.display());
    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Check that you have access to the repository: SSH key loaded in \
                 ssh-agent, git credentials or a personal access token"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr,
            hint,
        });
    }

    Ok(())
}

/// True when `path` holds a `.git` directory or a `.git` file (worktrees and
/// submodules use a file).
pub fn is_repository(path: &Path) -> bool {
    fs::metadata(path.join(GIT_MARKER))
        .map(|meta| meta.is_dir() || meta.is_file())
        .unwrap_or(false)
}

/// Read `remote.origin.url` of the working tree at `repo_path`.
pub fn remote_url(repo_path: &Path) -> Result<String, Error> {
    let command = "config --get remote.origin.url";
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .current_dir(repo_path)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.to_string(),
            path: repo_path.to_path_buf(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitCommand {
            command: command.to_string(),
            path: repo_path.to_path_buf(),
            stderr: if stderr.is_empty() {
                "no origin remote configured".to_string()
            } else {
                stderr
            },
        });
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(Error::GitCommand {
            command: command.to_string(),
            path: repo_path.to_path_buf(),
            stderr: "empty remote url".to_string(),
        });
    }
    Ok(url)
}
