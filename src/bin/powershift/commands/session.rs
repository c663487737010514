use crate::terminal::Terminal;
use anyhow::Result;
use clap::{Parser, Subcommand};
use powershift::oc::Oc;

#[derive(Parser)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Displays name of user for active session.
    User,

    /// Displays the active user session context.
    Context,

    /// Displays the active user session token.
    Token,
}

pub async fn handle_command(args: Arguments, oc: &Oc, terminal: &Terminal) -> Result<()> {
    let output = match args.command {
        SubCommands::User => oc.user().await?,
        SubCommands::Context => oc.context().await?,
        SubCommands::Token => oc.token().await?,
    };

    terminal.println(output);
    Ok(())
}
