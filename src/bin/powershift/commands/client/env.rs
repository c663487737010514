use super::Settings;
use crate::terminal::Terminal;
use anyhow::Result;
use clap::Parser;
use powershift::environment::{render_environment, Dialect};
use tracing::debug;

#[derive(Parser)]
pub struct Arguments {
    /// Version of oc to use. Without it the binary published by a plain
    /// `client install` is used.
    version: Option<String>,

    /// Shell to output commands for: sh, bash, powershell or cmd.
    ///
    /// Defaults to powershell on Windows and sh everywhere else.
    #[clap(long)]
    shell: Option<String>,
}

pub fn handle_command(args: Arguments, settings: &Settings, terminal: &Terminal) -> Result<()> {
    let dialect = match args.shell.as_deref() {
        None => Dialect::platform_default(),
        Some(name) => match Dialect::parse(name) {
            Some(dialect) => dialect,
            None => {
                debug!("No environment setup known for shell {name}");
                return Ok(());
            }
        },
    };

    for line in render_environment(&settings.home, args.version.as_deref(), dialect) {
        terminal.println(line);
    }

    Ok(())
}
