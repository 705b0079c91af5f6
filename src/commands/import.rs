//! # Import Command Implementation
//!
//! Moves existing checkouts found under a directory into their canonical
//! location in the workspace and indexes them. Checkouts whose remote cannot
//! be read or resolved are left where they are and reported.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use projj::output::emoji;
use projj::reconcile::ImportOutcome;
use projj::suggestions;

use super::Context;

/// Move existing repositories into the workspace
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Directory to scan for repositories
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, ctx: &Context) -> Result<()> {
    let mut workspace = ctx.open_workspace()?;
    let report = workspace
        .import(&args.source)
        .map_err(|e| suggestions::explain(e, &[]))?;

    for outcome in &report.outcomes {
        match outcome {
            ImportOutcome::Imported { from, to } if from == to => {
                println!("  = {}", to.display());
            }
            ImportOutcome::Imported { from, to } => {
                println!("  {} -> {}", from.display(), to.display());
            }
            ImportOutcome::Skipped { path, reason } => {
                eprintln!(
                    "  {} {}: {}",
                    emoji(&ctx.out, "⚠️", "[SKIP]"),
                    path.display(),
                    reason
                );
            }
        }
    }
    println!(
        "{} Import complete: {} imported, {} skipped",
        emoji(&ctx.out, "✅", "[OK]"),
        report.imported(),
        report.skipped()
    );
    Ok(())
}
