//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "issuetrak-console")]
#[command(about = "Exercise the Issuetrak REST API one operation at a time")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick operations from the interactive menu (default).
    Menu,
    /// Create a single issue entered by the configured username.
    CreateIssue,
    /// Print the numbered operation list.
    List,
    /// Execute one operation by menu number or label, then exit.
    Run {
        /// Menu number or operation label.
        operation: String,
    },
    /// Inspect or edit the settings file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print every setting, with the API key masked.
    Show,
    /// Print one setting.
    Get { key: String },
    /// Add or update a setting.
    Set { key: String, value: String },
    /// Read an API key from stdin and save it in the OS keyring.
    StoreKey,
}

impl Cli {
    /// The command to run, defaulting to the menu.
    pub fn command_or_default(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Menu)
    }
}
