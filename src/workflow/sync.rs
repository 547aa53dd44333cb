//! Working-tree and remote synchronization steps shared by the phases.

use super::{REMOTE, Workflow, WorkflowContext};
use crate::error::{GitError, PublishError, Result};
use crate::git::{
    GitOperations, PullFailure, PullOptions, RefKind, classify_pull_failure, scan_listing,
};
use crate::hosting::{HostingConnector, ServerKind};
use crate::project::PackageTool;
use crate::prompt::{self, Prompter};
use semver::Version;

/// Result of a pull that did not fail the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The branch was pulled into the current branch
    Merged,
    /// The remote has no such branch; nothing was pulled
    MissingRemoteRef,
}

impl<G, P, C, T> Workflow<G, P, C, T>
where
    G: GitOperations,
    P: Prompter,
    C: HostingConnector,
    T: PackageTool,
{
    /// Fail if the working tree has unresolved conflicts
    pub(super) async fn check_conflicts(&self) -> Result<()> {
        self.output.progress("Checking for conflicts");
        let status = self.git.status().await?;
        if !status.conflicted.is_empty() {
            return Err(GitError::Conflicted {
                files: status.conflicted,
            }
            .into());
        }
        self.output.success("No conflicts");
        Ok(())
    }

    /// Stage and commit every pending change, asking for a message.
    /// Returns whether a commit was made.
    pub(super) async fn commit_pending(&self) -> Result<bool> {
        let status = self.git.status().await?;
        if !status.has_pending_changes() {
            return Ok(false);
        }

        log::debug!("status {:?}", status);
        self.git.add(&status.pending_paths()).await?;

        let message = prompt::input_non_empty(&self.prompter, "Enter the commit message")?;
        self.git.commit(&message).await?;
        self.output.success("Local commit created");
        Ok(true)
    }

    /// Switch to `branch`, creating it if it does not exist locally
    pub(super) async fn checkout_branch(&self, branch: &str) -> Result<()> {
        let local = self.git.local_branches().await?;
        if local.iter().any(|b| b == branch) {
            self.git.checkout(branch).await?;
        } else {
            self.git.checkout_new_branch(branch).await?;
        }
        self.output.success(&format!("Switched to branch {}", branch));
        Ok(())
    }

    /// Push a branch to the remote
    pub(super) async fn push_remote(&self, branch: &str) -> Result<()> {
        self.output
            .progress(&format!("Pushing to remote branch {}", branch));
        self.git.push(REMOTE, branch).await?;
        self.output.success("Push complete");
        Ok(())
    }

    /// Pull a remote branch into the current branch.
    ///
    /// A branch missing on the remote is a no-op; a rejected SSH key and any
    /// other failure end the workflow.
    pub(super) async fn pull_remote(
        &self,
        ctx: &WorkflowContext,
        branch: &str,
        options: PullOptions,
    ) -> Result<PullOutcome> {
        self.output
            .progress(&format!("Pulling remote branch {}", branch));

        let stderr = match self.git.pull(REMOTE, branch, options).await {
            Ok(()) => return Ok(PullOutcome::Merged),
            Err(PublishError::Git(GitError::CommandFailed { stderr, .. })) => stderr,
            Err(other) => return Err(other),
        };

        match classify_pull_failure(&stderr, branch) {
            PullFailure::MissingRemoteRef => {
                self.output
                    .notice(&format!("Remote branch [{}] not found, skipping", branch));
                Ok(PullOutcome::MissingRemoteRef)
            }
            PullFailure::PermissionDenied => {
                let server = ctx.server.unwrap_or(ServerKind::Github);
                Err(GitError::PublicKeyDenied {
                    keys_url: server.ssh_keys_url().to_string(),
                    help_url: server.ssh_help_url().to_string(),
                }
                .into())
            }
            PullFailure::Other(reason) => {
                log::error!("pull {} failed: {}", branch, reason);
                Err(GitError::PullFailed {
                    remote: REMOTE.to_string(),
                    branch: branch.to_string(),
                    reason,
                }
                .into())
            }
        }
    }

    /// Versions on the remote for the given naming convention, newest first.
    /// Always read fresh: pushes during the run change the answer.
    pub(super) async fn remote_versions(&self, kind: RefKind) -> Result<Vec<Version>> {
        let listing = self.git.list_remote_refs().await?;
        Ok(scan_listing(&listing, kind))
    }

    /// Whether `refs/heads/<branch>` exists on the remote
    pub(super) async fn remote_has_branch(&self, branch: &str) -> Result<bool> {
        let listing = self.git.list_remote_refs().await?;
        let wanted = format!("refs/heads/{}", branch);
        Ok(listing
            .lines()
            .filter_map(|line| line.split_whitespace().last())
            .any(|name| name == wanted))
    }
}
