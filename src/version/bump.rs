//! Semantic version increments.

use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Increment kinds offered when a bump is required
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// x.y.Z
    Patch,
    /// x.Y.0
    Minor,
    /// X.0.0
    Major,
}

impl VersionBump {
    /// All kinds, in prompt order
    pub const ALL: [VersionBump; 3] = [VersionBump::Patch, VersionBump::Minor, VersionBump::Major];

    /// Apply the increment.
    ///
    /// A prerelease is promoted to its release when it already sits at the
    /// boundary the increment would reach (`1.0.0-rc.1` + patch = `1.0.0`).
    pub fn apply(self, version: &Version) -> Version {
        let is_pre = !version.pre.is_empty();
        let (major, minor, patch) = (version.major, version.minor, version.patch);

        let (major, minor, patch) = match self {
            VersionBump::Patch if is_pre => (major, minor, patch),
            VersionBump::Patch => (major, minor, patch + 1),
            VersionBump::Minor if is_pre && patch == 0 => (major, minor, 0),
            VersionBump::Minor => (major, minor + 1, 0),
            VersionBump::Major if is_pre && minor == 0 && patch == 0 => (major, 0, 0),
            VersionBump::Major => (major + 1, 0, 0),
        };

        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Prompt label showing the transition, e.g. `patch (1.0.0 -> 1.0.1)`
    pub fn describe(self, from: &Version) -> String {
        format!("{} ({} -> {})", self, from, self.apply(from))
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn release_increments() {
        assert_eq!(VersionBump::Patch.apply(&v("1.2.3")), v("1.2.4"));
        assert_eq!(VersionBump::Minor.apply(&v("1.2.3")), v("1.3.0"));
        assert_eq!(VersionBump::Major.apply(&v("1.2.3")), v("2.0.0"));
    }

    #[test]
    fn prerelease_promotion() {
        assert_eq!(VersionBump::Patch.apply(&v("1.2.3-rc.1")), v("1.2.3"));
        assert_eq!(VersionBump::Minor.apply(&v("1.3.0-beta")), v("1.3.0"));
        assert_eq!(VersionBump::Minor.apply(&v("1.3.1-beta")), v("1.4.0"));
        assert_eq!(VersionBump::Major.apply(&v("2.0.0-alpha")), v("2.0.0"));
        assert_eq!(VersionBump::Major.apply(&v("2.1.0-alpha")), v("3.0.0"));
    }

    #[test]
    fn describe_shows_transition() {
        assert_eq!(
            VersionBump::Minor.describe(&v("1.0.0")),
            "minor (1.0.0 -> 1.1.0)"
        );
    }
}
