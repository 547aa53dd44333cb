//! Publish command: wires the workflow to system git, dialoguer prompts,
//! the hosting providers and npm.

use super::{Args, OutputManager};
use crate::error::{CliError, Result};
use crate::git::SystemGit;
use crate::hosting::ProviderConnector;
use crate::project::{Npm, Project};
use crate::prompt::TerminalPrompter;
use crate::workflow::{Workflow, WorkflowContext};
use std::path::PathBuf;

/// Run the publish workflow for the project selected by `args`
pub async fn execute_publish(args: &Args) -> Result<i32> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let user_home: PathBuf = dirs::home_dir().ok_or_else(|| CliError::InvalidArguments {
        reason: "could not determine the user home directory".to_string(),
    })?;
    let config = args.workflow_config(&user_home);
    log::debug!("publish {:?} with {:?}", dir, config);

    let project = Project::load(&dir)?;
    let ctx = WorkflowContext::new(project, config.release_mode);

    let workflow = Workflow::new(
        SystemGit::open(&dir)?,
        TerminalPrompter,
        ProviderConnector,
        Npm,
        config,
        OutputManager::new(false),
    );

    let ctx = workflow.run(ctx).await?;
    log::debug!("finished with {:?}", ctx);
    Ok(0)
}
