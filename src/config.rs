//! Workflow configuration resolved once from the command line.

use std::path::{Path, PathBuf};

/// Default cache home, relative to the user home directory
pub const DEFAULT_CLI_HOME: &str = ".voyage-cli";

/// Which cached selections to discard and re-prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshFlags {
    /// Re-select the hosting server (also resets the local `.git`)
    pub server: bool,
    /// Re-enter the API token
    pub token: bool,
    /// Re-select owner kind and login
    pub owner: bool,
}

impl RefreshFlags {
    /// Refresh everything
    pub fn all() -> Self {
        Self {
            server: true,
            token: true,
            owner: true,
        }
    }
}

/// Configuration for one workflow run
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Cache home holding per-package cache directories
    pub cli_home: PathBuf,
    /// Cache refresh flags
    pub refresh: RefreshFlags,
    /// Run the release tail after pushing the dev branch
    pub release_mode: bool,
}

impl WorkflowConfig {
    /// Configuration with the given cache home and no refresh or release
    pub fn new<P: Into<PathBuf>>(cli_home: P) -> Self {
        Self {
            cli_home: cli_home.into(),
            refresh: RefreshFlags::default(),
            release_mode: false,
        }
    }

    /// Resolve the cache home. A relative override is taken relative to the
    /// user home; no override means `<user_home>/.voyage-cli`.
    pub fn resolve_home(user_home: &Path, cli_home: Option<&Path>) -> PathBuf {
        match cli_home {
            Some(home) => user_home.join(home),
            None => user_home.join(DEFAULT_CLI_HOME),
        }
    }
}
