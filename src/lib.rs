//! Building blocks of the `powershift` command line client for OpenShift.
//!
//! The interesting part is the versioned `oc` installation cache: the
//! [`catalog`] maps a version and platform to a release artifact, the
//! [`downloader`] fetches it, [`unpack`] extracts the executable and the
//! [`installer`] caches it per version and publishes copies of it.

pub mod catalog;
pub mod dir;
pub mod downloader;
pub mod environment;
pub mod error;
pub mod installer;
pub mod oc;
pub mod unpack;

pub use catalog::{Catalog, Platform};
pub use dir::HomeDir;
pub use error::{CatalogError, InstallError, OcError};
pub use installer::{publish, InstallEvent, Installer};
