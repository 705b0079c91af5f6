//! # Add Command Implementation
//!
//! Clones a repository reference into its canonical location under the
//! workspace base and records it in the index.
//!
//! When `change_directory` is enabled in the configuration, the last line of
//! output is `PROJJ_CHANGE_DIRECTORY=<path>` so a shell wrapper can `cd` into
//! the new clone.

use anyhow::Result;
use clap::Args;

use projj::defaults::CHANGE_DIRECTORY_PREFIX;
use projj::output::emoji;
use projj::suggestions;

use super::{known_names, Context};

/// Clone a repository into the workspace
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Repository reference: owner/name, host/owner/name, an SSH or HTTPS URL,
    /// or an alias such as github://owner/name
    #[arg(value_name = "REFERENCE")]
    pub reference: String,
}

/// Execute the `add` command.
pub fn execute(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut workspace = ctx.open_workspace()?;

    println!(
        "{} Adding {}",
        emoji(&ctx.out, "📦", "[CLONE]"),
        args.reference
    );
    let record = match workspace.add(&args.reference) {
        Ok(record) => record,
        Err(e) => {
            let names = known_names(&workspace);
            return Err(suggestions::explain(e, &names));
        }
    };

    println!(
        "{} Added {} at {}",
        emoji(&ctx.out, "✅", "[OK]"),
        record.url,
        record.path.display()
    );
    if workspace.config().change_directory {
        println!("{}{}", CHANGE_DIRECTORY_PREFIX, record.path.display());
    }
    Ok(())
}
