//! # Remove Command Implementation
//!
//! Removes exactly one record from the index. A query matching several
//! records is refused with the list of candidates. `--delete-files` also
//! deletes the working tree, after confirmation unless `--yes` is given.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use projj::output::emoji;
use projj::suggestions;

use super::{known_names, Context};

/// Stop managing a repository
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Query selecting exactly one repository (name, path or URL substring)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Also delete the repository directory from disk
    #[arg(long)]
    pub delete_files: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut workspace = ctx.open_workspace()?;
    let names: Vec<String> = known_names(&workspace)
        .into_iter()
        .map(str::to_string)
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    if args.delete_files && !args.yes {
        let target = workspace
            .resolve_one(&args.query)
            .map_err(|e| suggestions::explain(e, &names))?;
        let theme = ColorfulTheme::default();
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(format!("Delete {} from disk?", target.path.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Remove cancelled.");
            return Ok(());
        }
    }

    let record = workspace
        .remove(&args.query, args.delete_files)
        .map_err(|e| suggestions::explain(e, &names))?;

    if args.delete_files {
        println!(
            "{} Removed {} and deleted {}",
            emoji(&ctx.out, "🗑️", "[DEL]"),
            record.name,
            record.path.display()
        );
    } else {
        println!(
            "{} Removed {} from the index (files kept at {})",
            emoji(&ctx.out, "✅", "[OK]"),
            record.name,
            record.path.display()
        );
    }
    Ok(())
}
