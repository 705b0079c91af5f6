//! # Config Command Implementation
//!
//! Reads and edits `config.json` without opening it by hand.
//!
//! ## Subcommands
//!
//! - **`path`**: print the location of the configuration document
//! - **`list`**: print every settable key, the base directory and the aliases
//! - **`get <key>`**: print one value
//! - **`set <key> <value>`**: validate and store one value

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use projj::config::{Config, ConfigKey};
use projj::output::emoji;
use projj::suggestions;

use super::Context;

/// Show or change configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the path of the configuration file
    Path,
    /// Print all settings
    List,
    /// Print one setting
    Get {
        /// Key name: base, change_directory or default_host
        key: String,
    },
    /// Change one setting
    Set {
        /// Key name: base, change_directory or default_host
        key: String,
        /// New value
        value: String,
    },
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigSubcommand::Path => {
            println!("{}", Config::path_in(&ctx.config_dir).display());
            Ok(())
        }
        ConfigSubcommand::List => {
            let config = load(ctx)?;
            for key in ConfigKey::ALL {
                println!("{} = {}", key, config.get(key));
            }
            for (prefix, replacement) in config.alias.iter() {
                println!("alias.{} = {}", prefix, replacement);
            }
            Ok(())
        }
        ConfigSubcommand::Get { key } => {
            let key = parse_key(&key)?;
            println!("{}", load(ctx)?.get(key));
            Ok(())
        }
        ConfigSubcommand::Set { key, value } => {
            let key = parse_key(&key)?;
            let mut config = load(ctx)?;
            config
                .set(key, &value)
                .map_err(|e| suggestions::explain(e, &[]))?;
            config.save(&ctx.config_dir).with_context(|| {
                format!(
                    "Failed to write {}",
                    Config::path_in(&ctx.config_dir).display()
                )
            })?;
            println!(
                "{} {} = {}",
                emoji(&ctx.out, "✅", "[OK]"),
                key,
                config.get(key)
            );
            Ok(())
        }
    }
}

fn load(ctx: &Context) -> Result<Config> {
    Config::load(&ctx.config_dir).map_err(|e| suggestions::explain(e, &[]))
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    key.parse()
        .map_err(|_| suggestions::unknown_config_key(key))
}
