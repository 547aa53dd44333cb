//! Error types for voyage_publish operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for voyage_publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all voyage_publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Project manifest and component errors
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    /// Version resolution errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Hosting provider API errors
    #[error("Hosting error: {0}")]
    Hosting(#[from] HostingError),

    /// Credential cache errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// CLI argument and prompt errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Project manifest, descriptor and build errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// package.json missing from the working tree
    #[error("package.json not found at {path}")]
    ManifestNotFound {
        /// Path where package.json was expected
        path: PathBuf,
    },

    /// Required manifest field missing or not a string
    #[error("package.json is missing the '{field}' field")]
    MissingField {
        /// Field name
        field: String,
    },

    /// Component descriptor is not usable
    #[error("Invalid component descriptor at {path}: {reason}")]
    InvalidDescriptor {
        /// Path to .componentrc
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Build output directory missing after build
    #[error("Build output {path} does not exist")]
    BuildOutputMissing {
        /// Expected build output path
        path: PathBuf,
    },

    /// Build output not listed in package.json `files`
    #[error("package.json 'files' does not include the build output '{build_path}'")]
    BuildOutputNotPublished {
        /// Build path from the descriptor
        build_path: String,
    },

    /// External tool (npm) failed
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// Required executable not found on PATH
    #[error("Executable '{tool}' not found on PATH")]
    ToolNotFound {
        /// Executable name
        tool: String,
    },
}

/// Version management errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version parsing failed
    #[error("Failed to parse version '{version}': {source}")]
    ParseFailed {
        /// Version string
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },

    /// Failed to write the bumped version back to package.json
    #[error("Failed to update package.json at {path}: {reason}")]
    ManifestUpdateFailed {
        /// Path to package.json
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Working tree has unresolved merge conflicts
    #[error("Working tree has unresolved conflicts in: {files:?}. Resolve them manually and retry.")]
    Conflicted {
        /// Conflicted paths
        files: Vec<String>,
    },

    /// SSH public key rejected by the remote
    #[error("SSH authentication failed. Add your public key at {keys_url} (guide: {help_url})")]
    PublicKeyDenied {
        /// Provider page for adding SSH keys
        keys_url: String,
        /// Provider help page for SSH setup
        help_url: String,
    },

    /// Pull failed for a reason other than a missing branch or rejected key
    #[error("Failed to pull '{branch}' from {remote}: {reason}")]
    PullFailed {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
        /// Reason for the error
        reason: String,
    },

    /// A git subprocess exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// Arguments passed to git
        command: String,
        /// Captured stderr
        stderr: String,
    },
}

/// Hosting provider API errors
#[derive(Error, Debug)]
pub enum HostingError {
    /// Request could not be sent or the response could not be read
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Request URL
        url: String,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// API returned a non-success status
    #[error("{provider} API returned {status}: {message}")]
    Api {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Current user could not be determined
    #[error("Failed to fetch user information from {provider}")]
    UserNotFound {
        /// Provider name
        provider: String,
    },

    /// Repository creation returned no usable handle
    #[error("Failed to create remote repository '{name}'")]
    RepoCreationFailed {
        /// Repository name
        name: String,
    },

    /// Invalid API URL
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Credential cache errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache root could not be created or is not a directory
    #[error("Cache directory {path} is not usable: {reason}")]
    HomeUnavailable {
        /// Cache root path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Cached value is not one of the accepted values
    #[error("Cached value '{value}' in {path} is not valid for {key}")]
    InvalidValue {
        /// Cache key name
        key: String,
        /// Cached value
        value: String,
        /// Cache file
        path: PathBuf,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Interactive prompt failed or returned an out-of-range answer
    #[error("Prompt '{message}' failed: {reason}")]
    PromptFailed {
        /// Prompt message
        message: String,
        /// Reason for the error
        reason: String,
    },
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Git(GitError::Conflicted { .. }) => vec![
                "Resolve conflicts, then stage the files: git add <file>".to_string(),
                "Re-run voyage_publish once the tree is clean".to_string(),
            ],
            PublishError::Git(GitError::PublicKeyDenied { keys_url, help_url }) => vec![
                format!("Add your SSH public key at: {}", keys_url),
                format!("SSH setup guide: {}", help_url),
                "Check the key with: ssh -T git@<host>".to_string(),
            ],
            PublishError::Git(GitError::PullFailed { .. }) => vec![
                "Re-run voyage_publish".to_string(),
                "If it keeps failing, remove the .git directory and retry".to_string(),
            ],
            PublishError::Hosting(HostingError::Api { status: 401, .. })
            | PublishError::Hosting(HostingError::UserNotFound { .. }) => vec![
                "Refresh the cached token: voyage_publish --refresh-token".to_string(),
            ],
            PublishError::Cache(CacheError::InvalidValue { .. }) => vec![
                "Refresh all cached selections: voyage_publish --force".to_string(),
            ],
            PublishError::Project(ProjectError::BuildOutputNotPublished { build_path }) => vec![
                format!("Add \"{}\" to the files array in package.json", build_path),
            ],
            _ => vec!["Fix the condition above and re-run the command".to_string()],
        }
    }
}
