use crate::error::InstallError;
use flate2::read::GzDecoder;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// The container formats the catalog ships the `oc` client in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    pub fn from_file_name(name: &str) -> Option<ArchiveKind> {
        if name.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if name.ends_with(".tar.gz") {
            Some(ArchiveKind::TarGz)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<ArchiveKind> {
        path.file_name()
            .and_then(OsStr::to_str)
            .and_then(ArchiveKind::from_file_name)
    }

    /// File name suffix, including the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            ArchiveKind::Zip => ".zip",
            ArchiveKind::TarGz => ".tar.gz",
        }
    }
}

/// Extract the single executable `entry` from `archive` into `destination`.
///
/// The archive kind is picked from the suffix of `archive`. Zip archives must
/// contain `entry` verbatim, tarballs must contain a regular file whose last
/// path component is `entry` (usually `<release-dir>/oc`).
///
/// The content is staged next to `destination` and only renamed onto it once
/// it has been written completely and marked executable. If the entry is not
/// present nothing is written.
pub fn extract(archive: &Path, entry: &str, destination: &Path) -> Result<(), InstallError> {
    let kind = ArchiveKind::from_path(archive).ok_or_else(|| InstallError::Extraction {
        archive: archive.to_owned(),
        entry: entry.to_owned(),
    })?;

    let directory = destination.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory).map_err(|err| {
        InstallError::io(
            format!("Unable to create directory {}", directory.display()),
            err,
        )
    })?;

    let mut staged = staging_file(directory).map_err(|err| {
        InstallError::io(
            format!("Unable to create file in {}", directory.display()),
            err,
        )
    })?;

    let found = match kind {
        ArchiveKind::Zip => extract_zip(archive, entry, staged.as_file_mut())?,
        ArchiveKind::TarGz => extract_tar_gz(archive, entry, staged.as_file_mut())?,
    };

    if !found {
        return Err(InstallError::Extraction {
            archive: archive.to_owned(),
            entry: entry.to_owned(),
        });
    }

    staged
        .as_file_mut()
        .flush()
        .and_then(|_| make_executable(staged.path()))
        .map_err(|err| InstallError::io(format!("Unable to write {entry}"), err))?;

    staged.persist(destination).map_err(|err| {
        InstallError::io(
            format!("Unable to move {entry} to {}", destination.display()),
            err.error,
        )
    })?;

    debug!(path = %destination.display(), "Extracted {entry}");
    Ok(())
}

fn extract_zip(archive: &Path, entry: &str, out: &mut File) -> Result<bool, InstallError> {
    let file = open_archive(archive)?;
    let mut container = ZipArchive::new(file).map_err(|source| InstallError::Archive {
        archive: archive.to_owned(),
        source,
    })?;

    let mut member = match container.by_name(entry) {
        Ok(member) => member,
        Err(ZipError::FileNotFound) => return Ok(false),
        Err(source) => {
            return Err(InstallError::Archive {
                archive: archive.to_owned(),
                source,
            })
        }
    };

    io::copy(&mut member, out)
        .map_err(|err| InstallError::io(format!("Unable to extract {entry}"), err))?;

    Ok(true)
}

fn extract_tar_gz(archive: &Path, entry: &str, out: &mut File) -> Result<bool, InstallError> {
    let file = open_archive(archive)?;
    let mut tarball = tar::Archive::new(GzDecoder::new(file));
    let read_error = |err: io::Error| {
        InstallError::io(format!("Unable to read archive {}", archive.display()), err)
    };

    for member in tarball.entries().map_err(read_error)? {
        let mut member = member.map_err(read_error)?;
        let path = member.path().map_err(read_error)?.into_owned();

        if !member.header().entry_type().is_file() || path.file_name() != Some(OsStr::new(entry))
        {
            continue;
        }

        debug!("Unpacking {}", path.display());

        io::copy(&mut member, out)
            .map_err(|err| InstallError::io(format!("Unable to extract {entry}"), err))?;

        return Ok(true);
    }

    Ok(false)
}

fn open_archive(archive: &Path) -> Result<File, InstallError> {
    File::open(archive).map_err(|err| {
        InstallError::io(format!("Unable to open archive {}", archive.display()), err)
    })
}

fn staging_file(directory: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".powershift-").suffix(".part");

    // Same mode a plain `File::create` would get, instead of tempfile's 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    builder.tempfile_in(directory)
}

/// Add execute permission for owner, group and other, keeping the read/write
/// bits that are already set.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
