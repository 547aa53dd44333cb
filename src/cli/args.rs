//! Command line argument parsing and validation.

use crate::config::{RefreshFlags, WorkflowConfig};
use clap::Parser;
use std::path::PathBuf;

/// Commit and release a project through its git hosting provider
#[derive(Parser, Debug, Clone)]
#[command(
    name = "voyage_publish",
    version,
    about = "Commit and release a project through its git hosting provider",
    long_about = "Resolves hosting credentials and the remote repository, commits local work
onto a dev/<version> branch and pushes it. With --prod, also publishes
components, tags release/<version>, merges into master and deletes the
dev branch.

Usage:
  voyage_publish
  voyage_publish --prod
  voyage_publish --refresh-token --dir ./my-app"
)]
pub struct Args {
    /// Project working tree (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Cache home, relative to the user home directory
    #[arg(long, env = "CLI_HOME", value_name = "PATH")]
    pub cli_home: Option<PathBuf>,

    /// Re-select the git hosting server (resets the local .git directory)
    #[arg(long)]
    pub refresh_server: bool,

    /// Re-enter the hosting API token
    #[arg(long)]
    pub refresh_token: bool,

    /// Re-select the repository owner
    #[arg(long)]
    pub refresh_owner: bool,

    /// Refresh all cached selections
    #[arg(long)]
    pub force: bool,

    /// Release: tag, merge into master and delete the dev branch
    #[arg(long)]
    pub prod: bool,

    /// Verbose logging and full error chains
    #[arg(long, short = 'd')]
    pub debug: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.dir
            && !dir.is_dir()
        {
            return Err(format!("'{}' is not a directory", dir.display()));
        }
        if let Some(home) = &self.cli_home
            && home.as_os_str().is_empty()
        {
            return Err("--cli-home must not be empty".to_string());
        }
        Ok(())
    }

    /// Refresh flags, with --force implying all of them
    pub fn refresh_flags(&self) -> RefreshFlags {
        if self.force {
            return RefreshFlags::all();
        }
        RefreshFlags {
            server: self.refresh_server,
            token: self.refresh_token,
            owner: self.refresh_owner,
        }
    }

    /// Fold the arguments into a workflow configuration
    pub fn workflow_config(&self, user_home: &std::path::Path) -> WorkflowConfig {
        WorkflowConfig {
            cli_home: WorkflowConfig::resolve_home(user_home, self.cli_home.as_deref()),
            refresh: self.refresh_flags(),
            release_mode: self.prod,
        }
    }
}
