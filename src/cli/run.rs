//! Dispatches parsed arguments to the command handlers.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, references::references, strings::strings},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Strings(args)) => strings(args),
        Some(Command::References(args)) => references(args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
