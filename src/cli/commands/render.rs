//! render command - Apply an edit script and print the serialized schema
//!
//! The batch counterpart to `edit`: reads a script from a file or stdin,
//! applies it to a fresh schema, and prints one of the three renderings
//! (serialized schema, field tree, or structural fingerprint). Scripts fail
//! fast with the offending line number.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::commands::load_config;
use crate::cli::Context;
use crate::editor::session::Session;
use crate::ui::output::{self, Verbosity};
use crate::ui::render as render_ui;

/// Apply an edit script and print the selected rendering.
pub fn render(ctx: &Context, script: Option<&Path>, tree: bool, fingerprint: bool) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = load_config(verbosity);
    let mut session = Session::new(&config);

    let applied = match script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script '{}'", path.display()))?;
            session.run_script(BufReader::new(file))?
        }
        None => session.run_script(io::stdin().lock())?,
    };
    output::debug(format!("applied {applied} edit command(s)"), verbosity);

    if tree {
        println!("{}", session.tree());
    } else if fingerprint {
        println!("{}", session.forest().fingerprint());
    } else {
        println!("{}", render_ui::preview(session.forest())?);
    }
    Ok(())
}
