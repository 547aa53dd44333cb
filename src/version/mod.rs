//! Version resolution for the working branch.
//!
//! Decides whether local work can go out under its current version or must
//! be bumped past the latest released version.

mod bump;

pub use bump::VersionBump;

use crate::git::dev_branch;
use semver::Version;

/// What to do with the local version given the latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the local version; nothing released yet or local is ahead
    Keep(Version),
    /// Local is at or behind the latest release; a bump past `latest` is required
    BumpRequired {
        /// Local version
        local: Version,
        /// Latest released version
        latest: Version,
    },
}

/// Compare local against releases (newest first)
pub fn assess(local: &Version, releases: &[Version]) -> Resolution {
    match releases.first() {
        None => Resolution::Keep(local.clone()),
        Some(latest) if local > latest => Resolution::Keep(local.clone()),
        Some(latest) => Resolution::BumpRequired {
            local: local.clone(),
            latest: latest.clone(),
        },
    }
}

/// Version and branch chosen for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingVersion {
    /// Effective version
    pub version: Version,
    /// `dev/<version>`
    pub branch: String,
    /// Whether the version differs from the manifest and must be written back
    pub bumped: bool,
}

impl WorkingVersion {
    /// Working version that keeps `version` as is
    pub fn keep(version: Version) -> Self {
        Self {
            branch: dev_branch(&version),
            version,
            bumped: false,
        }
    }

    /// Working version bumped from the latest release
    pub fn bumped_from(latest: &Version, bump: VersionBump) -> Self {
        let version = bump.apply(latest);
        Self {
            branch: dev_branch(&version),
            version,
            bumped: true,
        }
    }
}
