//! # Configuration
//!
//! The configuration document lives at `<config_dir>/config.json`:
//!
//! ```json
//! {
//!   "base": "~/projj",
//!   "change_directory": false,
//!   "alias": {"github://": "git@github.com:"},
//!   "default_host": "github.com"
//! }
//! ```
//!
//! The core only reads `base` (after `~` expansion), `alias` and
//! `default_host`. `change_directory` is consumed by the CLI. Keys this crate
//! does not manage (such as the `hooks` section older tools wrote) are kept
//! and written back untouched.
//!
//! A missing document yields the defaults. A document that cannot be parsed is
//! an error: silently falling back to defaults would move the workspace base.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::{self, CONFIG_DIR_ENV, CONFIG_FILENAME, DEFAULT_BASE, DEFAULT_HOST};
use crate::error::{Error, Result};
use crate::filesystem::write_json_atomic;
use crate::identity::{AliasTable, Resolver};
use crate::path::expand_home;

fn default_base() -> String {
    DEFAULT_BASE.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// User configuration for a projj workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the workspace; may start with `~`
    #[serde(default = "default_base")]
    pub base: String,
    /// Print a `PROJJ_CHANGE_DIRECTORY=` line after `add` for shell wrappers
    #[serde(default)]
    pub change_directory: bool,
    /// Reference prefix aliases, first match wins
    #[serde(default = "AliasTable::builtin")]
    pub alias: AliasTable,
    /// Host for `owner/name` shorthand references
    #[serde(default = "default_host")]
    pub default_host: String,
    /// Keys not managed by this crate, preserved on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: default_base(),
            change_directory: false,
            alias: AliasTable::builtin(),
            default_host: default_host(),
            extra: Map::new(),
        }
    }
}

/// Settable configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Base,
    ChangeDirectory,
    DefaultHost,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::Base,
        ConfigKey::ChangeDirectory,
        ConfigKey::DefaultHost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Base => "base",
            ConfigKey::ChangeDirectory => "change_directory",
            ConfigKey::DefaultHost => "default_host",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::ConfigParse {
                message: format!("unknown configuration key '{}'", s),
                hint: Some(format!(
                    "Valid keys are: {}",
                    ConfigKey::ALL.map(ConfigKey::as_str).join(", ")
                )),
            })
    }
}

impl Config {
    /// Path of the configuration document inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILENAME)
    }

    /// Load the configuration from `config_dir`, or defaults if it has none.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = Self::path_in(config_dir);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{}: {}", path.display(), e),
            hint: Some("Fix the JSON by hand or delete the file to restore defaults".to_string()),
        })
    }

    /// Write the configuration to `config_dir`, creating it if needed.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        write_json_atomic(&Self::path_in(config_dir), self)
    }

    /// The workspace base directory with `~` expanded.
    pub fn base_path(&self) -> Result<PathBuf> {
        expand_home(&self.base)
    }

    /// Identity resolution settings derived from this configuration.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.alias, &self.default_host)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Base => self.base.clone(),
            ConfigKey::ChangeDirectory => self.change_directory.to_string(),
            ConfigKey::DefaultHost => self.default_host.clone(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::Base => {
                if value.trim().is_empty() {
                    return Err(Error::ConfigParse {
                        message: "base must not be empty".to_string(),
                        hint: None,
                    });
                }
                self.base = value.to_string();
            }
            ConfigKey::ChangeDirectory => self.change_directory = parse_bool(value)?,
            ConfigKey::DefaultHost => {
                if value.is_empty() || value.contains(['/', '\\', ':']) {
                    return Err(Error::ConfigParse {
                        message: format!("invalid host '{}'", value),
                        hint: Some("Use a bare host name such as 'github.com'".to_string()),
                    });
                }
                self.default_host = value.to_string();
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::ConfigParse {
            message: format!("expected a boolean, got '{}'", value),
            hint: Some("Use true or false".to_string()),
        }),
    }
}

/// Pick the configuration directory: an explicit path, then the
/// `PROJJ_CONFIG_DIR` environment variable, then `~/.projj`.
pub fn config_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            env::var_os(CONFIG_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(defaults::default_config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.alias.len(), 3);
        assert_eq!(config.default_host, "github.com");
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.base = "/custom/path".to_string();
        config.change_directory = true;
        config.save(temp_dir.path()).unwrap();

        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.base, "/custom/path");
        assert!(loaded.change_directory);
        assert_eq!(loaded.alias, config.alias);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            Config::path_in(temp_dir.path()),
            r#"{"base": "/srv/code", "alias": {"corp://": "git@git.corp.io:"}}"#,
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.base, "/srv/code");
        assert!(!config.change_directory);
        assert_eq!(config.alias.len(), 1);
        assert_eq!(config.default_host, "github.com");
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            Config::path_in(temp_dir.path()),
            r#"{"base": "~/projj", "hooks": {"postadd": "npm install"}}"#,
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        config.save(temp_dir.path()).unwrap();

        let raw = fs::read_to_string(Config::path_in(temp_dir.path())).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["hooks"]["postadd"], "npm install");
    }

    #[test]
    fn test_invalid_document_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(Config::path_in(temp_dir.path()), "{ base: nope").unwrap();

        let err = Config::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("hint:"));
    }

    #[test]
    fn test_base_path_expands_home() {
        let config = Config::default();
        let base = config.base_path().unwrap();
        assert_eq!(base, dirs::home_dir().unwrap().join("projj"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set(ConfigKey::ChangeDirectory, "yes").unwrap();
        assert_eq!(config.get(ConfigKey::ChangeDirectory), "true");

        config.set(ConfigKey::DefaultHost, "gitlab.com").unwrap();
        assert_eq!(config.get(ConfigKey::DefaultHost), "gitlab.com");

        assert!(config.set(ConfigKey::ChangeDirectory, "maybe").is_err());
        assert!(config.set(ConfigKey::DefaultHost, "https://x").is_err());
        assert!(config.set(ConfigKey::Base, "  ").is_err());
    }

    #[test]
    fn test_config_key_from_str() {
        assert_eq!("base".parse::<ConfigKey>().unwrap(), ConfigKey::Base);
        let err = "alias".parse::<ConfigKey>().unwrap_err();
        assert!(err.to_string().contains("unknown configuration key"));
    }

    #[test]
    #[serial]
    fn test_config_dir_precedence() {
        let original = env::var_os(CONFIG_DIR_ENV);

        env::set_var(CONFIG_DIR_ENV, "/from/env");
        assert_eq!(config_dir(None), PathBuf::from("/from/env"));
        assert_eq!(
            config_dir(Some(PathBuf::from("/explicit"))),
            PathBuf::from("/explicit")
        );

        env::remove_var(CONFIG_DIR_ENV);
        assert!(config_dir(None).ends_with(".projj"));

        if let Some(value) = original {
            env::set_var(CONFIG_DIR_ENV, value);
        }
    }
}
