use super::Settings;
use crate::terminal::Terminal;
use anyhow::{Context, Result};
use clap::Parser;
use powershift::downloader::HttpFetcher;
use powershift::{publish, Catalog, InstallEvent, Installer, Platform};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
pub struct Arguments {
    /// Version of oc to install. Run `client versions` for the choices.
    ///
    /// Defaults to the most recent stable release.
    version: Option<String>,

    /// Specify directory to install oc binary.
    ///
    /// Defaults to the tools directory under the powershift home directory.
    #[clap(long)]
    bindir: Option<PathBuf>,
}

pub async fn handle_command(
    args: Arguments,
    settings: &Settings,
    terminal: &Terminal,
) -> Result<()> {
    let catalog = Catalog::builtin();
    let version = args
        .version
        .as_deref()
        .unwrap_or_else(|| catalog.default_version());

    let installer = Installer::new(
        catalog,
        settings.home.clone(),
        HttpFetcher::new(terminal.multi_progress()),
    );

    let cache_path = installer
        .ensure_installed(version, &settings.platform, |event| match event {
            InstallEvent::Downloading(url) => terminal.println(format!("Downloading: {url}")),
            InstallEvent::Extracting(entry) => terminal.println(format!("Extracting: {entry}")),
            InstallEvent::Cached(path) => terminal.println(format!("Using: {}", path.display())),
        })
        .await?;

    // ensure_installed has already rejected platforms we do not know.
    let binary = Platform::from_identifier(&settings.platform)
        .map(Platform::binary_name)
        .context("Unsupported platform")?;

    let bin_dir = args.bindir.unwrap_or_else(|| settings.home.tools_dir());
    let published = publish(&cache_path, &bin_dir, binary)?;
    debug!(path = %published.display(), "Published oc {version}");

    terminal.println(format!(
        "Success: Ensure that \"{}\" is in your \"PATH\".",
        bin_dir.display()
    ));

    Ok(())
}
