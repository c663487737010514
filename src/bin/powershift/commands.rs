use crate::terminal::Terminal;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use powershift::dir::HOME_DIR_ENV;
use powershift::oc::{Oc, OC_ENV};
use powershift::HomeDir;
use std::ffi::OsString;
use std::path::PathBuf;

pub mod client;
pub mod completion;
pub mod console;
pub mod plugin;
pub mod server;
pub mod session;

/// PowerShift client for OpenShift.
///
/// This client provides additional functionality useful to users of the
/// OpenShift platform. Base functionality is minimal, but can be extended by
/// installing plugins: any `powershift-<name>` executable on your PATH is
/// available as `powershift <name>`.
#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Application {
    #[command(flatten)]
    pub global: GlobalArguments,

    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Args)]
pub struct GlobalArguments {
    /// Directory that downloaded tools are stored under.
    ///
    /// Defaults to ~/.powershift (~/PowerShift on Windows).
    #[clap(long, env = HOME_DIR_ENV, global = true)]
    pub home_dir: Option<PathBuf>,

    /// The oc program to run.
    #[clap(long, env = OC_ENV, default_value = "oc", global = true)]
    pub oc: PathBuf,

    /// Platform identifier to install for instead of the current one.
    #[clap(long, env = "POWERSHIFT_PLATFORM", global = true, hide = true)]
    pub platform: Option<String>,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Open a browser on the OpenShift web console.
    Console,

    /// Displays the URL for the OpenShift cluster.
    Server,

    /// Display information about current session.
    Session(session::Arguments),

    /// Install/update oc command line tool.
    Client(client::Arguments),

    /// Output completion script for specified shell.
    Completion(completion::Arguments),

    #[command(external_subcommand)]
    Plugin(Vec<OsString>),
}

impl SubCommands {
    /// `client` exists to install oc in the first place, and completion
    /// scripts are static, so neither needs a working oc.
    fn requires_oc(&self) -> bool {
        !matches!(self, SubCommands::Client(_) | SubCommands::Completion(_))
    }
}

/// Process-wide settings, resolved once from the global arguments.
pub struct Settings {
    pub home: HomeDir,
    pub oc: Oc,
    pub platform: String,
}

impl Settings {
    fn new(args: GlobalArguments) -> Result<Settings> {
        let home = HomeDir::resolve(args.home_dir).context("Unable to determine home directory")?;

        Ok(Settings {
            home,
            oc: Oc::new(args.oc),
            platform: args
                .platform
                .unwrap_or_else(|| std::env::consts::OS.to_owned()),
        })
    }
}

pub async fn handle_command(app: Application, terminal: &Terminal) -> Result<()> {
    let settings = Settings::new(app.global)?;

    // We are so dependent on oc being installed that there isn't much point
    // continuing if it isn't.
    if app.command.requires_oc() {
        settings.oc.check().await?;
    }

    match app.command {
        SubCommands::Console => console::handle_command(&settings.oc).await,
        SubCommands::Server => server::handle_command(&settings.oc, terminal).await,
        SubCommands::Session(args) => session::handle_command(args, &settings.oc, terminal).await,
        SubCommands::Client(args) => client::handle_command(args, &settings, terminal).await,
        SubCommands::Completion(args) => completion::handle_command(args),
        SubCommands::Plugin(args) => plugin::handle_command(args, &settings).await,
    }
}
