//! Remote ref listing parsing.
//!
//! Turns raw `git ls-remote --refs` output into descending semantic-version
//! sequences for release tags (`refs/tags/release/<semver>`) and dev branches
//! (`refs/heads/dev/<semver>`).

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// Prefix shared by release tag names
pub const RELEASE_PREFIX: &str = "release";
/// Prefix shared by dev branch names
pub const DEVELOP_PREFIX: &str = "dev";

/// Which naming convention to scan for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `refs/tags/release/<semver>`
    ReleaseTag,
    /// `refs/heads/dev/<semver>`
    DevBranch,
}

impl RefKind {
    fn pattern(self) -> &'static Regex {
        static RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"refs/tags/release/(?P<version>\S+)\s*$")
                .expect("release tag regex is valid")
        });
        static DEV_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"refs/heads/dev/(?P<version>\S+)\s*$").expect("dev branch regex is valid")
        });

        match self {
            RefKind::ReleaseTag => &RELEASE_RE,
            RefKind::DevBranch => &DEV_RE,
        }
    }
}

/// Name of the release tag for a version
pub fn release_tag(version: &Version) -> String {
    format!("{}/{}", RELEASE_PREFIX, version)
}

/// Name of the dev branch for a version
pub fn dev_branch(version: &Version) -> String {
    format!("{}/{}", DEVELOP_PREFIX, version)
}

/// Scan ref lines for versions of the given kind, newest first.
///
/// Lines whose captured name is not valid semver are dropped.
pub fn scan_versions<'a, I>(lines: I, kind: RefKind) -> Vec<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = kind.pattern();
    let mut versions: Vec<Version> = lines
        .into_iter()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| Version::parse(&caps["version"]).ok())
        .collect();

    versions.sort_by(|a, b| b.cmp(a));
    versions.dedup();
    versions
}

/// Scan a raw multi-line `ls-remote` listing
pub fn scan_listing(listing: &str, kind: RefKind) -> Vec<Version> {
    scan_versions(listing.lines(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn release_tags_sorted_descending_without_invalid() {
        let refs = [
            "refs/tags/release/1.2.0",
            "refs/tags/release/1.3.0",
            "refs/tags/release/bogus",
        ];
        assert_eq!(
            scan_versions(refs, RefKind::ReleaseTag),
            vec![v("1.3.0"), v("1.2.0")]
        );
    }

    #[test]
    fn ls_remote_listing_filters_by_kind() {
        let listing = "\
a1b2c3\trefs/heads/master
d4e5f6\trefs/heads/dev/0.2.0
0a0b0c\trefs/heads/dev/0.10.0
112233\trefs/tags/release/0.1.0
445566\trefs/heads/feature/login
";
        assert_eq!(
            scan_listing(listing, RefKind::DevBranch),
            vec![v("0.10.0"), v("0.2.0")]
        );
        assert_eq!(scan_listing(listing, RefKind::ReleaseTag), vec![v("0.1.0")]);
    }

    #[test]
    fn duplicates_collapse() {
        let refs = [
            "x\trefs/tags/release/2.0.0",
            "y\trefs/tags/release/2.0.0",
            "z\trefs/tags/release/1.0.0",
        ];
        assert_eq!(
            scan_versions(refs, RefKind::ReleaseTag),
            vec![v("2.0.0"), v("1.0.0")]
        );
    }

    #[test]
    fn prerelease_orders_below_release() {
        let refs = ["refs/tags/release/1.0.0-beta.1", "refs/tags/release/1.0.0"];
        assert_eq!(
            scan_versions(refs, RefKind::ReleaseTag),
            vec![v("1.0.0"), v("1.0.0-beta.1")]
        );
    }

    #[test]
    fn dev_refs_are_not_release_refs() {
        let refs = ["refs/heads/dev/1.0.0"];
        assert!(scan_versions(refs, RefKind::ReleaseTag).is_empty());
    }

    #[test]
    fn names_follow_conventions() {
        assert_eq!(release_tag(&v("1.4.2")), "release/1.4.2");
        assert_eq!(dev_branch(&v("1.4.2")), "dev/1.4.2");
    }
}
