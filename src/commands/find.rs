//! # Find Command Implementation
//!
//! Searches the index by case-insensitive substring over name, path and URL.
//! With `--path-only` and exactly one match, the output is just the path,
//! suitable for `cd "$(projj find -p go)"`.

use anyhow::Result;
use clap::Args;

use projj::output::{format_records, RecordStyle};
use projj::suggestions;

use super::{known_names, Context};

/// Search managed repositories
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Substring to search for; empty matches everything
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Show every field of each match
    #[arg(short, long)]
    pub details: bool,

    /// Print only the paths of the matches
    #[arg(short, long)]
    pub path_only: bool,
}

/// Execute the `find` command.
///
/// A query that matches nothing is an error, so scripts can test the exit code.
pub fn execute(args: FindArgs, ctx: &Context) -> Result<()> {
    let workspace = ctx.open_workspace()?;
    let query = args.query.as_deref().unwrap_or_default();
    let matches = workspace.find(query);

    if matches.is_empty() {
        let names = known_names(&workspace);
        return Err(suggestions::no_match(query, &names));
    }

    let style = RecordStyle::from_flags(args.details, args.path_only);
    println!("{}", format_records(&ctx.out, &matches, style));
    Ok(())
}
