//! # Output Configuration
//!
//! Utilities for controlling CLI output appearance, plus the formatting of
//! repository listings shared by `find` and `list`.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use projj::output::{OutputConfig, emoji};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! println!("{} Cloning...", emoji(&config, "📦", "[CLONE]"));
//! ```

use std::env;

use console::style;

use crate::cache::RepositoryRecord;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// How a repository record is rendered in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordStyle {
    /// `name  path`
    #[default]
    Short,
    /// One block per record with every field
    Details,
    /// Only the path, for scripting (`cd $(projj find -p foo)`)
    PathOnly,
}

impl RecordStyle {
    /// Pick the style from the `--details` / `--path-only` flags.
    ///
    /// `--path-only` wins when both are given.
    pub fn from_flags(details: bool, path_only: bool) -> Self {
        if path_only {
            RecordStyle::PathOnly
        } else if details {
            RecordStyle::Details
        } else {
            RecordStyle::Short
        }
    }
}

/// Render one record. The result never ends with a newline.
pub fn format_record(out: &OutputConfig, record: &RepositoryRecord, record_style: RecordStyle) -> String {
    let path = record.path.display().to_string();
    match record_style {
        RecordStyle::PathOnly => path,
        RecordStyle::Short => format!(
            "{}  {}",
            style(&record.name).bold().force_styling(out.use_color),
            style(path).dim().force_styling(out.use_color)
        ),
        RecordStyle::Details => format!(
            "{}\n  Path: {}\n  URL: {}\n  Platform: {}\n  Added: {}",
            style(&record.name).bold().force_styling(out.use_color),
            path,
            record.url,
            record.platform,
            record.added_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    }
}

/// Render a listing of records, separated by blank lines in detail mode.
///
/// Returns an empty string for an empty slice.
pub fn format_records(out: &OutputConfig, records: &[&RepositoryRecord], record_style: RecordStyle) -> String {
    let separator = if record_style == RecordStyle::Details {
        "\n\n"
    } else {
        "\n"
    };
    records
        .iter()
        .map(|record| format_record(out, record, record_style))
        .collect::<Vec<_>>()
        .join(separator)
}
