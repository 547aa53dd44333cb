//! Classification of failed pulls.
//!
//! Git reports pull failures only as text on stderr, so classification here
//! is best-effort: it matches on message fragments that git has printed for a
//! long time but does not promise to keep stable.

/// Why a pull failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullFailure {
    /// The remote rejected our SSH public key
    PermissionDenied,
    /// The requested branch does not exist on the remote
    MissingRemoteRef,
    /// Anything else
    Other(String),
}

const PUBLICKEY_DENIED: &str = "permission denied (publickey)";
const MISSING_REF: &str = "couldn't find remote ref ";

/// Classify a pull failure from git's stderr.
///
/// Matching is plain case-insensitive substring search, so branch names with
/// regex metacharacters are compared literally.
pub fn classify_pull_failure(stderr: &str, branch: &str) -> PullFailure {
    let lowered = stderr.to_lowercase();

    if lowered.contains(PUBLICKEY_DENIED) {
        return PullFailure::PermissionDenied;
    }

    let missing = format!("{}{}", MISSING_REF, branch.to_lowercase());
    if lowered
        .lines()
        .any(|line| line.trim_end().ends_with(&missing) || line.contains(&format!("{} ", missing)))
    {
        return PullFailure::MissingRemoteRef;
    }

    PullFailure::Other(stderr.trim().to_string())
}
