//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `strings`: Report string literals that should be localized
//! - `references`: Report existing references to resource entries
//! - `init`: Initialize locscan configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Strings(args)) => args.common.verbose,
            Some(Command::References(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the scan commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (defaults to the current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Root namespace of the project (overrides config file)
    #[arg(long)]
    pub root_namespace: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style diagnostics
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

#[derive(Debug, Parser)]
pub struct StringsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Also report literals marked with a no-localize comment
    #[arg(long)]
    pub include_unlocalizable: bool,
}

#[derive(Debug, Parser)]
pub struct ReferencesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Only load resource files matching this glob (repeatable)
    #[arg(long = "resource", value_name = "GLOB")]
    pub resources: Vec<String>,

    /// Resource file whose entries win ties between same-key candidates
    #[arg(long, value_name = "PATH")]
    pub prefer: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find string literals that should move to resource files
    Strings(StringsArgs),
    /// Find references to existing resource entries
    References(ReferencesArgs),
    /// Initialize a new .locscanrc.json configuration file
    Init,
}
