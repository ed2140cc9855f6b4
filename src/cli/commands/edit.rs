//! edit command - Interactive schema editing session
//!
//! Reads editor commands line by line, applies them to the session, and
//! reports each outcome. Parse and apply failures are printed and the loop
//! continues; only `quit` or end of input ends the session. With an
//! interactive terminal the current field tree is re-rendered after each
//! successful edit, mirroring a live editing surface.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::cli::commands::load_config;
use crate::cli::Context;
use crate::editor::command::EditCommand;
use crate::editor::session::{Outcome, Session};
use crate::ui::output::{self, Verbosity};

/// Run an interactive editing session on stdin/stdout.
pub fn edit(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = load_config(verbosity);
    let echo_tree = config.echo_tree() && ctx.interactive && !ctx.quiet;
    let mut session = Session::new(&config);

    if ctx.interactive {
        output::print(
            "schema editor - type 'help' for commands, 'quit' to end",
            verbosity,
        );
        output::print(session.tree(), verbosity);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut edits = 0usize;

    loop {
        if ctx.interactive {
            print!("trellis> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: EditCommand = match trimmed.parse() {
            Ok(command) => command,
            Err(err) => {
                output::error(err);
                continue;
            }
        };

        match session.apply(&command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => println!("{text}"),
            Ok(Outcome::Changed(message)) => {
                edits += 1;
                output::print(message, verbosity);
                if echo_tree {
                    output::print(session.tree(), verbosity);
                }
            }
            Err(err) => output::error(err),
        }
    }

    output::debug(format!("session ended after {edits} edit(s)"), verbosity);
    Ok(())
}
