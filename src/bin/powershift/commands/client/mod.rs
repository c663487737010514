use super::Settings;
use crate::terminal::Terminal;
use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod env;
pub mod install;
pub mod versions;

#[derive(Parser)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// List versions of oc that can be installed.
    Versions,

    /// Install version of oc command line tool.
    Install(install::Arguments),

    /// Output commands to put oc on your PATH.
    Env(env::Arguments),
}

pub async fn handle_command(
    args: Arguments,
    settings: &Settings,
    terminal: &Terminal,
) -> Result<()> {
    match args.command {
        SubCommands::Versions => versions::handle_command(terminal),
        SubCommands::Install(args) => install::handle_command(args, settings, terminal).await,
        SubCommands::Env(args) => env::handle_command(args, settings, terminal),
    }
}
