//! Git operations for the publish workflow.
//!
//! This module provides the operations trait the workflow is written against,
//! a system-git implementation, and the pure helpers that interpret git
//! output (status, remote ref listings, pull failures).

mod operations;
mod pull;
pub mod refs;
mod system_git;

pub use operations::{GitOperations, PullOptions, RemoteInfo, StatusSummary};
pub use pull::{PullFailure, classify_pull_failure};
pub use refs::{RefKind, dev_branch, release_tag, scan_listing, scan_versions};
pub use system_git::SystemGit;
