use crate::catalog::{Catalog, Platform};
use crate::dir::HomeDir;
use crate::downloader::Fetch;
use crate::error::InstallError;
use crate::unpack;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Progress notifications emitted by [`Installer::ensure_installed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// The archive at this URL is about to be downloaded.
    Downloading(String),
    /// The named executable is about to be extracted from the archive.
    Extracting(String),
    /// The version was already cached at this path; nothing is downloaded.
    Cached(PathBuf),
}

/// Maintains the per-version cache of `oc` binaries under a [`HomeDir`].
pub struct Installer<'a, F> {
    catalog: &'a Catalog,
    home: HomeDir,
    fetcher: F,
}

impl<'a, F: Fetch> Installer<'a, F> {
    pub fn new(catalog: &'a Catalog, home: HomeDir, fetcher: F) -> Self {
        Installer {
            catalog,
            home,
            fetcher,
        }
    }

    /// Where `version` is cached for `platform`: `<root>/tools/<version>/oc`.
    pub fn cache_path(&self, version: &str, platform: Platform) -> PathBuf {
        self.home
            .version_dir(version)
            .join(platform.binary_name())
    }

    /// Make sure `version` of `oc` for `platform` is present in the cache and
    /// return its path.
    ///
    /// Nothing is downloaded when the cache entry already exists. The catalog
    /// lookup happens before anything is written, so an unknown version or
    /// platform leaves the root directory untouched.
    pub async fn ensure_installed(
        &self,
        version: &str,
        platform: &str,
        mut on_event: impl FnMut(InstallEvent),
    ) -> Result<PathBuf, InstallError> {
        let artifact = self.catalog.resolve(version, platform)?;
        let binary = artifact.platform.binary_name();
        let cache_path = self.cache_path(version, artifact.platform);

        if cache_path.exists() {
            debug!(path = %cache_path.display(), "Found cached version of oc");
            on_event(InstallEvent::Cached(cache_path.clone()));
            return Ok(cache_path);
        }

        let kind = artifact.kind().ok_or_else(|| InstallError::Extraction {
            archive: PathBuf::from(artifact.filename),
            entry: binary.to_owned(),
        })?;

        on_event(InstallEvent::Downloading(artifact.url.clone()));
        let archive = self.fetcher.fetch(&artifact.url, kind.suffix()).await?;

        on_event(InstallEvent::Extracting(binary.to_owned()));
        let extracted = unpack::extract(archive.path(), binary, &cache_path);

        if let Err(err) = archive.close() {
            warn!(?err, "Unable to remove downloaded archive");
        }
        extracted?;

        debug!(path = %cache_path.display(), "Installed oc {version}");
        Ok(cache_path)
    }
}

/// Copy a cached binary to `bin_dir/binary_name`, replacing whatever was
/// there before, and return the published path.
///
/// This is a full copy rather than a link so the published binary keeps
/// working if the cache is cleared.
pub fn publish(
    cache_path: &Path,
    bin_dir: &Path,
    binary_name: &str,
) -> Result<PathBuf, InstallError> {
    fs::create_dir_all(bin_dir).map_err(|err| {
        InstallError::io(
            format!("Unable to create directory {}", bin_dir.display()),
            err,
        )
    })?;

    let published = bin_dir.join(binary_name);

    if is_same_file(&published, cache_path)? {
        debug!(path = %published.display(), "Binary is already published from the cache");
        return Ok(published);
    }

    match fs::remove_file(&published) {
        Ok(()) => debug!(path = %published.display(), "Removed previously published binary"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(InstallError::io(
                format!("Unable to remove {}", published.display()),
                err,
            ))
        }
    }

    fs::copy(cache_path, &published).map_err(|err| {
        InstallError::io(
            format!(
                "Unable to copy {} to {}",
                cache_path.display(),
                published.display()
            ),
            err,
        )
    })?;

    Ok(published)
}

fn is_same_file(published: &Path, cache_path: &Path) -> Result<bool, InstallError> {
    if !published.exists() {
        return Ok(false);
    }

    let canonical = |path: &Path| {
        fs::canonicalize(path).map_err(|err| {
            InstallError::io(format!("Unable to resolve {}", path.display()), err)
        })
    };

    Ok(canonical(published)? == canonical(cache_path)?)
}
