//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Drives an editor session over the schema forest
//! 3. Formats and displays output
//!
//! Handlers do NOT mutate the forest directly; every edit goes through
//! [`crate::editor::Session`].

mod completion;
mod edit;
mod render;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use edit::edit;
pub use render::render;

use anyhow::Result;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Edit => edit(ctx),
        Command::Render {
            script,
            tree,
            fingerprint,
        } => render(ctx, script.as_deref(), tree, fingerprint),
        Command::Completion { shell } => completion(shell),
    }
}

/// Load user configuration, falling back to defaults with a warning if the
/// config file exists but cannot be used.
pub(crate) fn load_config(verbosity: Verbosity) -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            output::warn(format!("ignoring config: {err}"), verbosity);
            Config::default()
        }
    }
}
