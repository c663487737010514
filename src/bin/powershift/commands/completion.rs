use super::Application;
use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::io;

#[derive(Parser)]
pub struct Arguments {
    /// Shell to generate the completion script for.
    ///
    /// To enable completion in bash, for example:
    ///
    ///     powershift completion bash > powershift-complete.sh
    ///     source powershift-complete.sh
    #[clap(value_enum, verbatim_doc_comment)]
    shell: Shell,
}

pub fn handle_command(args: Arguments) -> Result<()> {
    let mut command = Application::command();
    clap_complete::generate(args.shell, &mut command, "powershift", &mut io::stdout());
    Ok(())
}
