//! The publish workflow.
//!
//! A run is strictly sequential: `prepare` resolves credentials, the remote
//! repository and the local git setup; `commit` resolves the version, commits
//! and pushes the dev branch; in release mode the release tail tags, merges to
//! trunk and cleans up. Every step re-checks its own preconditions, so the
//! recovery for any failure is to fix the cause and run again.

mod commit;
mod context;
mod prepare;
mod release;
mod sync;

pub use context::{OwnerKind, WorkflowContext};
pub use release::ReleaseOutcome;
pub use sync::PullOutcome;

use crate::cli::OutputManager;
use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::git::GitOperations;
use crate::hosting::HostingConnector;
use crate::project::{GIT_DIR, PackageTool};
use crate::prompt::Prompter;
use std::fs;

/// Remote every push and pull goes through
pub const REMOTE: &str = "origin";
/// Trunk branch
pub const TRUNK: &str = "master";

/// Workflow engine bound to its collaborators
#[derive(Debug)]
pub struct Workflow<G, P, C, T> {
    git: G,
    prompter: P,
    connector: C,
    tool: T,
    config: WorkflowConfig,
    output: OutputManager,
}

impl<G, P, C, T> Workflow<G, P, C, T>
where
    G: GitOperations,
    P: Prompter,
    C: HostingConnector,
    T: PackageTool,
{
    /// Bind a workflow to its git client, prompter, hosting connector and package tool
    pub fn new(
        git: G,
        prompter: P,
        connector: C,
        tool: T,
        config: WorkflowConfig,
        output: OutputManager,
    ) -> Self {
        Self {
            git,
            prompter,
            connector,
            tool,
            config,
            output,
        }
    }

    /// Run prepare and commit (and release, when enabled) to completion
    pub async fn run(&self, mut ctx: WorkflowContext) -> Result<WorkflowContext> {
        self.reset_local_repo(&ctx)?;

        self.output.section("Git configuration check");
        self.prepare(&mut ctx).await?;

        self.output.section("Git auto commit");
        self.commit(&mut ctx).await?;

        self.output.success("Git publish finished");
        Ok(ctx)
    }

    /// Switching hosting servers starts the local repository over
    fn reset_local_repo(&self, ctx: &WorkflowContext) -> Result<()> {
        if !self.config.refresh.server {
            return Ok(());
        }
        let git_dir = ctx.project.dir().join(GIT_DIR);
        if git_dir.exists() {
            self.output
                .warn("Switching git server: removing local .git directory");
            fs::remove_dir_all(&git_dir)?;
            self.output.success("Local .git directory removed");
        }
        Ok(())
    }
}
