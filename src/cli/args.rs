//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trellis - A terminal editor for nested field schemas
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable the interactive prompt
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable the interactive prompt
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open an interactive schema editing session
    #[command(
        name = "edit",
        visible_alias = "e",
        long_about = "Open an interactive schema editing session.\n\n\
            The session starts with a single string field named 'field1'. \
            Commands typed at the prompt add, rename, retype, and delete \
            fields; 'preview' shows the serialized schema at any point. \
            The schema lives in memory only and is discarded when the \
            session ends.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Open the editor
    trellis edit

    # A typical session
    trellis> add                    # new root field
    trellis> rename newField email
    trellis> retype field1 nested
    trellis> add field1             # child under field1
    trellis> preview                # see the serialized schema
    trellis> quit

ADDRESSING FIELDS:
    Fields are addressed by the id prefix shown in the tree, or by
    exact name when it is unique:
        [3f2a91c4] field1: nested
          [b044c1d2] street: string
        trellis> rename b044 road"
    )]
    Edit,

    /// Apply an edit script and print the serialized schema
    #[command(
        name = "render",
        visible_alias = "r",
        long_about = "Apply an edit script and print the serialized schema.\n\n\
            Reads editor commands (one per line, '#' comments allowed) from a \
            file or stdin, applies them to a fresh schema, and prints the \
            serialized result. Unlike the interactive editor, a script stops \
            at the first failing line.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Render a script file
    trellis render schema.tr

    # Pipe a script on stdin
    echo 'retype field1 number' | trellis render

    # Show the field tree instead of the serialized schema
    trellis render schema.tr --tree

    # Print a structural fingerprint (stable for identical schemas)
    trellis render schema.tr --fingerprint"
    )]
    Render {
        /// Script file to apply (reads stdin if omitted)
        script: Option<PathBuf>,

        /// Print the field tree instead of the serialized schema
        #[arg(long, conflicts_with = "fingerprint")]
        tree: bool,

        /// Print the forest fingerprint instead of the serialized schema
        #[arg(long)]
        fingerprint: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for Trellis \
            commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    trellis completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    trellis completion zsh >> ~/.zshrc

    # Fish
    trellis completion fish > ~/.config/fish/completions/trellis.fish

    # PowerShell
    trellis completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
