//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use projj::config;
use projj::defaults::CONFIG_DIR_ENV;
use projj::output::OutputConfig;

use crate::commands::{self, Context};

/// projj - Manage cloned repositories by platform, owner and name
#[derive(Parser, Debug)]
#[command(name = "projj")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding config.json and cache.json (default: ~/.projj)
    #[arg(long, global = true, value_name = "DIR", env = CONFIG_DIR_ENV)]
    config_dir: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the configuration and the workspace base directory
    Init(commands::init::InitArgs),

    /// Clone a repository into the workspace
    #[command(visible_alias = "a")]
    Add(commands::add::AddArgs),

    /// Search managed repositories
    #[command(visible_alias = "f")]
    Find(commands::find::FindArgs),

    /// List all managed repositories
    #[command(visible_alias = "ls")]
    List(commands::list::ListArgs),

    /// Stop managing a repository, optionally deleting it
    #[command(visible_aliases = ["rm", "delete"])]
    Remove(commands::remove::RemoveArgs),

    /// Reconcile the index with the workspace on disk
    #[command(visible_alias = "s")]
    Sync(commands::sync::SyncArgs),

    /// Move existing repositories into the workspace
    Import(commands::import::ImportArgs),

    /// Show or change configuration
    Config(commands::config::ConfigArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let ctx = Context {
            config_dir: config::config_dir(self.config_dir),
            out: OutputConfig::from_env_and_flag(&self.color),
        };
        log::debug!("using config directory {}", ctx.config_dir.display());

        match self.command {
            Commands::Init(args) => commands::init::execute(args, &ctx),
            Commands::Add(args) => commands::add::execute(args, &ctx),
            Commands::Find(args) => commands::find::execute(args, &ctx),
            Commands::List(args) => commands::list::execute(args, &ctx),
            Commands::Remove(args) => commands::remove::execute(args, &ctx),
            Commands::Sync(args) => commands::sync::execute(args, &ctx),
            Commands::Import(args) => commands::import::execute(args, &ctx),
            Commands::Config(args) => commands::config::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
