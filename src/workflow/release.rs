//! Release tail: publish, tag, merge to trunk, branch cleanup.

use super::{REMOTE, TRUNK, Workflow, WorkflowContext};
use crate::cli::OutputManager;
use crate::error::Result;
use crate::git::{GitOperations, RefKind, release_tag, scan_listing};
use crate::hosting::HostingConnector;
use crate::project::{PackageTool, Project};
use crate::prompt::Prompter;
use crate::version::WorkingVersion;

/// What the release tail did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Tag created and pushed
    pub tag: String,
    /// Whether the package was published to the registry
    pub published: bool,
    /// Whether an existing remote tag was replaced
    pub replaced_remote_tag: bool,
    /// Whether an existing local tag was replaced
    pub replaced_local_tag: bool,
}

/// Release operations for a workflow run.
///
/// Steps run in order and the first failure aborts the rest. A partially
/// completed release is recovered by running the whole workflow again: tags
/// are replaced rather than appended, so every step can be repeated.
pub(super) struct ReleaseOperations<'a, G, T> {
    pub(super) git: &'a G,
    pub(super) tool: &'a T,
    pub(super) output: &'a OutputManager,
}

impl<'a, G: GitOperations, T: PackageTool> ReleaseOperations<'a, G, T> {
    pub(super) async fn perform_release(
        &self,
        project: &Project,
        working: &WorkingVersion,
    ) -> Result<ReleaseOutcome> {
        let published = self.publish_component(project).await?;
        let (tag, replaced_remote_tag, replaced_local_tag) = self.replace_tag(working).await?;

        self.checkout_trunk().await?;
        self.merge_to_trunk(&working.branch).await?;

        self.output
            .progress(&format!("Pushing to remote branch {}", TRUNK));
        self.git.push(REMOTE, TRUNK).await?;
        self.output.success("Push complete");

        self.output
            .progress(&format!("Deleting local branch {}", working.branch));
        self.git.delete_local_branch(&working.branch).await?;
        self.output.success("Local branch deleted");

        self.output
            .progress(&format!("Deleting remote branch {}", working.branch));
        self.git.delete_remote_branch(REMOTE, &working.branch).await?;
        self.output.success("Remote branch deleted");

        Ok(ReleaseOutcome {
            tag,
            published,
            replaced_remote_tag,
            replaced_local_tag,
        })
    }

    /// Components ship their package before the tag that marks it
    async fn publish_component(&self, project: &Project) -> Result<bool> {
        if project.component()?.is_none() {
            return Ok(false);
        }
        self.output.notice("Publishing component to the registry");
        self.tool.publish(project.dir()).await?;
        self.output.success("Component published");
        Ok(true)
    }

    async fn replace_tag(&self, working: &WorkingVersion) -> Result<(String, bool, bool)> {
        let tag = release_tag(&working.version);
        self.output.progress("Fetching remote tag list");

        let listing = self.git.list_remote_refs().await?;
        let remote_releases = scan_listing(&listing, RefKind::ReleaseTag);
        let replaced_remote = remote_releases.contains(&working.version);
        if replaced_remote {
            self.output.notice(&format!("Remote tag {} exists, deleting", tag));
            self.git
                .delete_remote_ref(REMOTE, &format!("refs/tags/{}", tag))
                .await?;
            self.output.success(&format!("Remote tag {} deleted", tag));
        }

        let local_tags = self.git.tags().await?;
        let replaced_local = local_tags.iter().any(|t| t == &tag);
        if replaced_local {
            self.output.notice(&format!("Local tag {} exists, deleting", tag));
            self.git.delete_tag(&tag).await?;
            self.output.success(&format!("Local tag {} deleted", tag));
        }

        self.git.add_tag(&tag).await?;
        self.output.success(&format!("Local tag {} created", tag));
        self.git.push_tags(REMOTE).await?;
        self.output.success(&format!("Tag {} pushed", tag));

        Ok((tag, replaced_remote, replaced_local))
    }

    async fn checkout_trunk(&self) -> Result<()> {
        let local = self.git.local_branches().await?;
        if local.iter().any(|b| b == TRUNK) {
            self.git.checkout(TRUNK).await?;
        } else {
            self.git.checkout_new_branch(TRUNK).await?;
        }
        self.output.success(&format!("Switched to branch {}", TRUNK));
        Ok(())
    }

    async fn merge_to_trunk(&self, branch: &str) -> Result<()> {
        self.output
            .progress(&format!("Merging [{}] => [{}]", branch, TRUNK));
        self.git.merge(branch).await?;
        self.output
            .success(&format!("Merged [{}] => [{}]", branch, TRUNK));
        Ok(())
    }
}

impl<G, P, C, T> Workflow<G, P, C, T>
where
    G: GitOperations,
    P: Prompter,
    C: HostingConnector,
    T: PackageTool,
{
    /// Run the release tail for a pushed dev branch
    pub async fn release(
        &self,
        ctx: &WorkflowContext,
        working: &WorkingVersion,
    ) -> Result<ReleaseOutcome> {
        let ops = ReleaseOperations {
            git: &self.git,
            tool: &self.tool,
            output: &self.output,
        };
        let outcome = ops.perform_release(&ctx.project, working).await?;
        self.output
            .success(&format!("Released {}", outcome.tag));
        Ok(outcome)
    }
}
