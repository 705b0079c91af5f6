//! Default values for projj configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PROJJ_CONFIG_DIR";

/// Name of the configuration document inside the configuration directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the repository index document inside the configuration directory.
pub const INDEX_FILENAME: &str = "cache.json";

/// Host used for `owner/name` shorthand references.
pub const DEFAULT_HOST: &str = "github.com";

/// Base directory for cloned repositories before `~` expansion.
pub const DEFAULT_BASE: &str = "~/projj";

/// Line prefix printed after `add` when `change_directory` is enabled.
pub const CHANGE_DIRECTORY_PREFIX: &str = "PROJJ_CHANGE_DIRECTORY=";

/// Returns the default configuration directory.
///
/// Resolves to `~/.projj`. Falls back to `.projj` in the current directory if
/// the home directory cannot be determined.
///
/// This can be overridden by the `--config-dir` CLI flag or the
/// `PROJJ_CONFIG_DIR` environment variable.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".projj"))
        .unwrap_or_else(|| PathBuf::from(".projj"))
}

/// Alias prefixes installed in a fresh configuration, in precedence order.
pub fn default_aliases() -> Vec<(String, String)> {
    [
        ("github://", "git@github.com:"),
        ("gitlab://", "git@gitlab.com:"),
        ("gitee://", "git@gitee.com:"),
    ]
    .into_iter()
    .map(|(prefix, replacement)| (prefix.to_string(), replacement.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir_returns_path() {
        let config_dir = default_config_dir();
        assert!(config_dir.ends_with(".projj"));
    }

    #[test]
    fn test_default_aliases_are_scheme_prefixes() {
        let aliases = default_aliases();
        assert_eq!(aliases.len(), 3);
        assert_eq!(aliases[0].0, "github://");
        for (prefix, replacement) in &aliases {
            assert!(prefix.ends_with("://"));
            assert!(replacement.starts_with("git@"));
        }
    }
}
