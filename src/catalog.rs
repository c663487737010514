use crate::error::{CatalogError, InstallError};
use crate::unpack::ArchiveKind;
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_toml(include_str!("../assets/catalog.toml"))
        .expect("Embedded catalog is invalid")
});

/// Operating system families the `oc` client is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// Normalize an OS identifier. All Linux flavours (`linux`, `linux2`, ...)
    /// collapse into [`Platform::Linux`].
    pub fn from_identifier(identifier: &str) -> Option<Platform> {
        let identifier = identifier.to_ascii_lowercase();

        if identifier.starts_with("linux") {
            return Some(Platform::Linux);
        }

        match identifier.as_str() {
            "darwin" | "macos" => Some(Platform::Darwin),
            "win32" | "windows" => Some(Platform::Windows),
            _ => None,
        }
    }

    /// The name of the `oc` executable on this platform.
    pub fn binary_name(self) -> &'static str {
        match self {
            Platform::Windows => "oc.exe",
            Platform::Linux | Platform::Darwin => "oc",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Windows => "win32",
        })
    }
}

/// The fixed table of installable `oc` versions.
#[derive(Debug, Clone)]
pub struct Catalog {
    download_prefix: String,
    default_version: String,
    versions: BTreeMap<String, BTreeMap<Platform, String>>,
}

/// On-disk representation of the catalog, before platform keys are checked.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CatalogFile {
    download_prefix: String,
    default_version: String,
    versions: BTreeMap<String, BTreeMap<String, String>>,
}

/// A catalog lookup: the artifact to download for a version/platform pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact<'a> {
    pub version: &'a str,
    pub platform: Platform,
    pub filename: &'a str,
    pub url: String,
}

impl Artifact<'_> {
    pub fn kind(&self) -> Option<ArchiveKind> {
        ArchiveKind::from_file_name(self.filename)
    }
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_toml(input: &str) -> Result<Catalog, CatalogError> {
        let file: CatalogFile = toml::from_str(input)?;

        let mut versions = BTreeMap::new();
        for (version, artifacts) in file.versions {
            let mut platforms = BTreeMap::new();
            for (key, artifact) in artifacts {
                let platform = Platform::from_identifier(&key).ok_or_else(|| {
                    CatalogError::UnknownPlatform {
                        version: version.clone(),
                        platform: key.clone(),
                    }
                })?;
                platforms.insert(platform, artifact);
            }
            versions.insert(version, platforms);
        }

        let catalog = Catalog {
            download_prefix: file.download_prefix,
            default_version: file.default_version,
            versions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (version, platforms) in &self.versions {
            if platforms.is_empty() {
                return Err(CatalogError::NoPlatforms(version.clone()));
            }

            if let Some(artifact) = platforms
                .values()
                .find(|artifact| ArchiveKind::from_file_name(artifact).is_none())
            {
                return Err(CatalogError::UnsupportedArchive {
                    version: version.clone(),
                    artifact: artifact.clone(),
                });
            }
        }

        if !self.versions.contains_key(&self.default_version) {
            return Err(CatalogError::UnknownDefault(self.default_version.clone()));
        }

        Ok(())
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    pub fn download_prefix(&self) -> &str {
        &self.download_prefix
    }

    /// All known versions, oldest first.
    ///
    /// Versions are compared as semver (ignoring the leading `v`), anything
    /// that does not parse is ordered lexically.
    pub fn versions(&self) -> Vec<&str> {
        self.versions
            .keys()
            .map(String::as_str)
            .sorted_by(|a, b| compare_versions(a, b))
            .collect()
    }

    /// Look up the artifact for `version` on `platform`.
    ///
    /// `platform` is an OS identifier such as `linux`, `linux2`, `darwin` or
    /// `win32`; it is normalized before the lookup.
    pub fn resolve<'a>(
        &'a self,
        version: &'a str,
        platform: &str,
    ) -> Result<Artifact<'a>, InstallError> {
        let platforms =
            self.versions
                .get(version)
                .ok_or_else(|| InstallError::UnknownVersion {
                    version: version.to_owned(),
                })?;

        let unsupported = || InstallError::UnsupportedPlatform {
            version: version.to_owned(),
            platform: platform.to_owned(),
        };

        let normalized = Platform::from_identifier(platform).ok_or_else(unsupported)?;
        let filename = platforms.get(&normalized).ok_or_else(unsupported)?;

        Ok(Artifact {
            version,
            platform: normalized,
            filename,
            url: format!(
                "{}/{version}/{filename}",
                self.download_prefix.trim_end_matches('/')
            ),
        })
    }
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |version: &str| {
        semver_rs::Version::new(version.strip_prefix('v').unwrap_or(version))
            .parse()
            .ok()
    };

    match (parse(a), parse(b)) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or_else(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}
