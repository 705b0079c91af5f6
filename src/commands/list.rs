//! # List Command Implementation
//!
//! Prints every record in index order followed by a total.

use anyhow::Result;
use clap::Args;

use projj::output::{format_records, RecordStyle};

use super::Context;

/// List all managed repositories
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show every field of each repository
    #[arg(short, long)]
    pub details: bool,

    /// Print only paths, without the total
    #[arg(short, long)]
    pub path_only: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let workspace = ctx.open_workspace()?;
    let records: Vec<_> = workspace.list().iter().collect();
    let style = RecordStyle::from_flags(args.details, args.path_only);

    if records.is_empty() {
        if style != RecordStyle::PathOnly {
            println!("No repositories managed yet. Run 'projj add <reference>' to add one.");
        }
        return Ok(());
    }

    println!("{}", format_records(&ctx.out, &records, style));
    if style != RecordStyle::PathOnly {
        println!("\nTotal: {} repositories", records.len());
    }
    Ok(())
}
