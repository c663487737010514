use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while resolving, fetching, unpacking or
/// publishing a version of the `oc` client.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Version {version} not available for installation.")]
    UnknownVersion { version: String },

    #[error("Version {version} not available for platform {platform}.")]
    UnsupportedPlatform { version: String, platform: String },

    #[error("Unable to download {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Archive {} does not contain {entry}", archive.display())]
    Extraction { archive: PathBuf, entry: String },

    #[error("Unable to read archive {}", archive.display())]
    Archive {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        InstallError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Problems with the embedded version catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to parse catalog")]
    Parse(#[from] toml::de::Error),

    #[error("version {0} does not list any platform")]
    NoPlatforms(String),

    #[error("version {version} lists unknown platform {platform}")]
    UnknownPlatform { version: String, platform: String },

    #[error("default version {0} is not listed in the catalog")]
    UnknownDefault(String),

    #[error("artifact {artifact} of version {version} is neither a .zip nor a .tar.gz archive")]
    UnsupportedArchive { version: String, artifact: String },
}

/// Failures invoking the wrapped `oc` command line tool.
#[derive(Debug, Error)]
pub enum OcError {
    #[error("You do not appear to have the '{program}' command line tool installed. Please install it to continue.")]
    NotInstalled { program: String },

    #[error("You appear to have the '{program}' command line tool installed, but it appears to be non functional.")]
    NonFunctional { program: String },

    #[error("{output}")]
    Failed { code: Option<i32>, output: String },

    #[error("Invalid server URL {url:?}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unable to run {program}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl OcError {
    /// The exit code `oc` itself failed with, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            OcError::Failed { code, .. } => *code,
            _ => None,
        }
    }
}
