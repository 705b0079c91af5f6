//! # Sync Command Implementation
//!
//! Drops index records whose directory is no longer a repository, then
//! indexes repositories found under the base directory that have no record.
//! Nothing on disk is moved or deleted.

use anyhow::Result;
use clap::Args;

use projj::output::emoji;
use projj::suggestions;

use super::Context;

/// Reconcile the index with the workspace on disk
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only drop stale records; do not scan the base directory
    #[arg(long)]
    pub prune_only: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, ctx: &Context) -> Result<()> {
    let mut workspace = ctx.open_workspace()?;
    let report = workspace
        .sync(!args.prune_only)
        .map_err(|e| suggestions::explain(e, &[]))?;

    for path in &report.removed {
        println!("  - {}", path.display());
    }
    for path in &report.added {
        println!("  + {}", path.display());
    }
    println!(
        "{} Sync complete: {} added, {} removed",
        emoji(&ctx.out, "🔄", "[SYNC]"),
        report.added.len(),
        report.removed.len()
    );
    Ok(())
}
