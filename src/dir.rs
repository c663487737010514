use directories::BaseDirs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default root directory.
pub const HOME_DIR_ENV: &str = "POWERSHIFT_HOME_DIR";

#[cfg(not(windows))]
const SAVE_DIR: &str = ".powershift";
#[cfg(windows)]
const SAVE_DIR: &str = "PowerShift";

/// The root directory all powershift state lives under.
///
/// Layout:
///
/// ```text
/// <root>/tools/<version>/oc   cached, one per installed version
/// <root>/tools/oc             default published copy
/// ```
///
/// Directories are only created when something is written into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir {
    path: PathBuf,
}

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> HomeDir {
        HomeDir { path: path.into() }
    }

    /// Use `explicit` when given (usually from `POWERSHIFT_HOME_DIR`),
    /// otherwise `~/.powershift` (`~/PowerShift` on Windows).
    pub fn resolve(explicit: Option<PathBuf>) -> Option<HomeDir> {
        explicit
            .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(SAVE_DIR)))
            .map(HomeDir::new)
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.path.join("tools")
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.tools_dir().join(version)
    }

    /// The directory binaries are published to, or cached in when `version`
    /// is given.
    pub fn bin_dir(&self, version: Option<&str>) -> PathBuf {
        match version {
            Some(version) => self.version_dir(version),
            None => self.tools_dir(),
        }
    }
}

impl Deref for HomeDir {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.path.as_path()
    }
}
