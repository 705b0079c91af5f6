//! # Init Command Implementation
//!
//! Creates the configuration directory, the workspace base directory and both
//! JSON documents. Running it again is harmless: existing settings and index
//! records are kept.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

use projj::config::ConfigKey;
use projj::output::emoji;
use projj::suggestions;

use super::Context;

/// Initialize the projj workspace
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Workspace base directory to store in the configuration (may start with ~)
    #[arg(short, long, value_name = "DIR")]
    pub base: Option<String>,

    /// Ask for the base directory interactively
    #[arg(short, long, conflicts_with = "base")]
    pub interactive: bool,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs, ctx: &Context) -> Result<()> {
    let mut workspace = ctx.open_workspace()?;

    let base = if args.interactive {
        let theme = ColorfulTheme::default();
        let answer: String = Input::with_theme(&theme)
            .with_prompt("Workspace base directory")
            .default(workspace.config().base.clone())
            .interact_text()?;
        Some(answer)
    } else {
        args.base
    };

    if let Some(base) = base {
        workspace
            .config_mut()
            .set(ConfigKey::Base, &base)
            .map_err(|e| suggestions::explain(e, &[]))?;
    }

    let base = workspace.init().map_err(|e| suggestions::explain(e, &[]))?;

    println!(
        "{} Workspace ready at {}",
        emoji(&ctx.out, "✅", "[OK]"),
        base.display()
    );
    println!("   Configuration: {}", ctx.config_dir.display());
    Ok(())
}
