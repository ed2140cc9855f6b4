//! cli
//!
//! Command-line interface layer for Trellis.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT mutate the schema model directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! command handlers, which drive an [`crate::editor::Session`] over the
//! schema forest. All model mutations flow through the session.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;

/// Execution context derived from global CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Enable debug logging
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
    /// Whether to show prompts and per-edit feedback
    pub interactive: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };

    commands::dispatch(cli.command, &ctx)
}
