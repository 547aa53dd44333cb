//! Commit phase: version, local commit, dev branch, sync, push.

use super::{REMOTE, TRUNK, Workflow, WorkflowContext};
use crate::error::Result;
use crate::git::{GitOperations, PullOptions, RefKind};
use crate::hosting::HostingConnector;
use crate::project::PackageTool;
use crate::prompt::{self, Choice, Prompter};
use crate::version::{self, Resolution, VersionBump, WorkingVersion};

impl<G, P, C, T> Workflow<G, P, C, T>
where
    G: GitOperations,
    P: Prompter,
    C: HostingConnector,
    T: PackageTool,
{
    /// Commit local work onto the dev branch and push it
    pub async fn commit(&self, ctx: &mut WorkflowContext) -> Result<()> {
        let working = self.resolve_version(ctx).await?;
        self.check_stash().await?;
        self.check_conflicts().await?;
        self.commit_pending().await?;
        self.checkout_branch(&working.branch).await?;
        self.pull_trunk_and_branch(ctx, &working).await?;
        self.push_remote(&working.branch).await?;

        if ctx.release_mode {
            self.output.section("Release");
            self.release(ctx, &working).await?;
        }
        Ok(())
    }

    /// Pick the dev branch for this run, bumping past the latest release if needed
    pub async fn resolve_version(&self, ctx: &mut WorkflowContext) -> Result<WorkingVersion> {
        self.output.progress("Resolving working branch");
        let releases = self.remote_versions(RefKind::ReleaseTag).await?;
        let local = ctx.project.version().clone();

        let working = match version::assess(&local, &releases) {
            Resolution::Keep(version) => {
                if let Some(latest) = releases.first() {
                    self.output.notice(&format!(
                        "Local version is ahead of the latest release: {} > {}",
                        version, latest
                    ));
                }
                WorkingVersion::keep(version)
            }
            Resolution::BumpRequired { local, latest } => {
                self.output.notice(&format!(
                    "Latest release is at or ahead of local: {} >= {}",
                    latest, local
                ));
                let choices: Vec<Choice<VersionBump>> = VersionBump::ALL
                    .iter()
                    .map(|bump| Choice::new(bump.describe(&latest), *bump))
                    .collect();
                let bump = prompt::choose(
                    &self.prompter,
                    "Version bump required, select the increment",
                    &choices,
                    0,
                )?;
                let working = WorkingVersion::bumped_from(&latest, bump);
                ctx.project.write_version(&working.version)?;
                working
            }
        };

        self.output
            .success(&format!("Working branch: {}", working.branch));
        ctx.working = Some(working.clone());
        Ok(working)
    }

    async fn check_stash(&self) -> Result<()> {
        self.output.progress("Checking stash");
        if !self.git.stash_list().await?.is_empty() {
            self.git.stash_pop().await?;
            self.output.success("Stash popped");
        }
        Ok(())
    }

    async fn pull_trunk_and_branch(
        &self,
        ctx: &WorkflowContext,
        working: &WorkingVersion,
    ) -> Result<()> {
        self.output
            .notice(&format!("Merging [{}] => [{}]", TRUNK, working.branch));
        self.pull_remote(ctx, TRUNK, PullOptions::default()).await?;
        self.check_conflicts().await?;

        let dev_versions = self.remote_versions(RefKind::DevBranch).await?;
        if dev_versions.contains(&working.version) {
            self.output.notice(&format!(
                "Merging {}/{} => [{}]",
                REMOTE, working.branch, working.branch
            ));
            self.pull_remote(ctx, &working.branch, PullOptions::default())
                .await?;
            self.check_conflicts().await?;
        } else {
            self.output
                .notice(&format!("No remote branch [{}] yet", working.branch));
        }
        Ok(())
    }
}
