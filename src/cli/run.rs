use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, generate::generate, init::init, load::load, snapshot::snapshot,
    },
};

/// Dispatch to the handler of the parsed command.
///
/// Per-document problems are carried in the returned [`CommandResult`];
/// `Err` means the command could not run at all (bad config, unreadable
/// workbook, ...).
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Load(cmd)) => load(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Snapshot(cmd)) => snapshot(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
