//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `load`: Extract labels from input documents into templates and the workbook
//! - `generate`: Fill templates with workbook translations
//! - `snapshot`: Write per-language `.properties` label snapshots
//! - `init`: Initialize uixml configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

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
            Some(Command::Load(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Snapshot(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Language codes in column order, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Input documents directory (overrides config file)
    #[arg(long)]
    pub input_root: Option<PathBuf>,

    /// Templates directory (overrides config file)
    #[arg(long)]
    pub template_root: Option<PathBuf>,

    /// Generated documents directory (overrides config file)
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Label snapshot directory (overrides config file)
    #[arg(long)]
    pub properties_root: Option<PathBuf>,

    /// Workbook file path (overrides config file)
    #[arg(long)]
    pub workbook: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct LoadCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Remove the templates directory before writing
    #[arg(long)]
    pub clean: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Remove the output directory before writing
    #[arg(long)]
    pub clean: bool,
}

#[derive(Debug, Args)]
pub struct SnapshotCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract labels into templates and the translation workbook
    Load(LoadCommand),
    /// Produce localized documents from templates and the workbook
    Generate(GenerateCommand),
    /// Write per-language .properties snapshots of document labels
    Snapshot(SnapshotCommand),
    /// Initialize a new .uixmlrc.json configuration file
    Init,
}
