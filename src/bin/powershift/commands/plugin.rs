use super::Settings;
use anyhow::{bail, Context, Result};
use powershift::dir::HOME_DIR_ENV;
use powershift::oc::OC_ENV;
use std::ffi::OsString;
use std::io;
use tokio::process::Command;
use tracing::debug;

/// Run `powershift-<name>` for an unknown subcommand `<name>`, passing along
/// the remaining arguments and the resolved settings.
pub async fn handle_command(args: Vec<OsString>, settings: &Settings) -> Result<()> {
    let (name, rest) = args.split_first().context("No command given")?;
    let name = name.to_string_lossy();
    let program = format!("powershift-{name}");

    debug!(%program, "Dispatching to plugin");

    let status = match Command::new(&program)
        .args(rest)
        .env(HOME_DIR_ENV, settings.home.as_path())
        .env(OC_ENV, settings.oc.program())
        .status()
        .await
    {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("unrecognized command '{name}'")
        }
        Err(err) => return Err(err).with_context(|| format!("Unable to run {program}")),
    };

    if !status.success() {
        debug!(%program, %status, "Plugin failed");
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
