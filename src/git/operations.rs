//! Git operations trait and types for the publish workflow.
//!
//! This module defines the GitOperations trait that specifies every git
//! operation the workflow issues. The workflow only orders and recovers
//! around these calls; the implementation in `system_git` delegates to the
//! system `git` executable.

use crate::error::Result;
use std::future::Future;

/// Trait defining all required Git operations for the publish workflow
pub trait GitOperations {
    /// Initialize a repository in the working tree
    fn init(&self) -> impl Future<Output = Result<()>>;

    /// List configured remotes
    fn remotes(&self) -> impl Future<Output = Result<Vec<RemoteInfo>>>;

    /// Add a named remote
    fn add_remote(&self, name: &str, url: &str) -> impl Future<Output = Result<()>>;

    /// Summarize working tree status
    fn status(&self) -> impl Future<Output = Result<StatusSummary>>;

    /// Stage the given paths
    fn add(&self, paths: &[String]) -> impl Future<Output = Result<()>>;

    /// Commit staged changes
    fn commit(&self, message: &str) -> impl Future<Output = Result<()>>;

    /// Push a branch to a remote
    fn push(&self, remote: &str, branch: &str) -> impl Future<Output = Result<()>>;

    /// Pull a branch from a remote into the current branch
    fn pull(&self, remote: &str, branch: &str, options: PullOptions)
    -> impl Future<Output = Result<()>>;

    /// List stash entries
    fn stash_list(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Pop the latest stash entry
    fn stash_pop(&self) -> impl Future<Output = Result<()>>;

    /// List local branch names
    fn local_branches(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Checkout an existing branch
    fn checkout(&self, branch: &str) -> impl Future<Output = Result<()>>;

    /// Create and checkout a new local branch
    fn checkout_new_branch(&self, branch: &str) -> impl Future<Output = Result<()>>;

    /// Raw `ls-remote --refs` listing of the default remote
    fn list_remote_refs(&self) -> impl Future<Output = Result<String>>;

    /// List local tag names
    fn tags(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Create a lightweight tag at HEAD
    fn add_tag(&self, tag: &str) -> impl Future<Output = Result<()>>;

    /// Delete a local tag
    fn delete_tag(&self, tag: &str) -> impl Future<Output = Result<()>>;

    /// Push all tags to a remote
    fn push_tags(&self, remote: &str) -> impl Future<Output = Result<()>>;

    /// Delete a ref on a remote (`push <remote> :<ref>`)
    fn delete_remote_ref(&self, remote: &str, refname: &str) -> impl Future<Output = Result<()>>;

    /// Merge a branch into the current branch
    fn merge(&self, branch: &str) -> impl Future<Output = Result<()>>;

    /// Delete a local branch
    fn delete_local_branch(&self, branch: &str) -> impl Future<Output = Result<()>>;

    /// Delete a branch on a remote
    fn delete_remote_branch(&self, remote: &str, branch: &str) -> impl Future<Output = Result<()>>;
}

/// Information about a Git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Remote name
    pub name: String,
    /// Fetch URL
    pub url: String,
}

/// Extra flags for a pull
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullOptions {
    /// Pass `--allow-unrelated-histories`
    pub allow_unrelated_histories: bool,
}

impl PullOptions {
    /// Options for reconciling two independently initialized histories
    pub fn unrelated() -> Self {
        Self {
            allow_unrelated_histories: true,
        }
    }
}

/// Working tree status grouped by change category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Untracked files
    pub not_added: Vec<String>,
    /// Newly added files
    pub created: Vec<String>,
    /// Deleted files
    pub deleted: Vec<String>,
    /// Modified files
    pub modified: Vec<String>,
    /// Renamed files (destination path)
    pub renamed: Vec<String>,
    /// Files with unresolved conflicts
    pub conflicted: Vec<String>,
}

impl StatusSummary {
    /// Whether any category that should be auto-committed has entries
    pub fn has_pending_changes(&self) -> bool {
        !self.not_added.is_empty()
            || !self.created.is_empty()
            || !self.deleted.is_empty()
            || !self.modified.is_empty()
            || !self.renamed.is_empty()
    }

    /// All pending paths in staging order, without duplicates
    pub fn pending_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for path in self
            .not_added
            .iter()
            .chain(&self.created)
            .chain(&self.deleted)
            .chain(&self.modified)
            .chain(&self.renamed)
        {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths
    }

    /// Parse `git status --porcelain -z` output.
    ///
    /// Records are NUL-terminated and paths are never quoted. A rename or
    /// copy is followed by an extra record holding its origin path.
    pub fn parse_porcelain(output: &str) -> Self {
        let mut summary = Self::default();
        let mut records = output.split('\0').filter(|r| !r.is_empty());

        while let Some(record) = records.next() {
            if record.len() < 4 || !record.is_char_boundary(3) {
                continue;
            }
            let (code, path) = record.split_at(3);
            let path = path.to_string();
            let mut chars = code.chars();
            let index = chars.next().unwrap_or(' ');
            let worktree = chars.next().unwrap_or(' ');

            match (index, worktree) {
                ('?', '?') => summary.not_added.push(path),
                ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D') => summary.conflicted.push(path),
                ('R', _) | ('C', _) => {
                    // origin path
                    records.next();
                    summary.renamed.push(path);
                }
                ('A', _) => summary.created.push(path),
                ('D', _) | (_, 'D') => summary.deleted.push(path),
                ('M', _) | (_, 'M') => summary.modified.push(path),
                _ => {}
            }
        }

        summary
    }
}
