//! Per-invocation workflow state.

use crate::error::CacheError;
use crate::hosting::{Repo, ServerKind};
use crate::project::Project;
use crate::version::WorkingVersion;
use std::fmt;
use std::str::FromStr;

/// Account type a remote repository is created under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    /// Personal account
    User,
    /// Organization
    Org,
}

impl OwnerKind {
    /// Value stored in the cache
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::User => "user",
            OwnerKind::Org => "org",
        }
    }

    /// Label shown in prompts
    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::User => "Personal",
            OwnerKind::Org => "Organization",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerKind {
    type Err = CacheError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(OwnerKind::User),
            "org" => Ok(OwnerKind::Org),
            other => Err(CacheError::InvalidValue {
                key: "owner".to_string(),
                value: other.to_string(),
                path: Default::default(),
            }),
        }
    }
}

/// State carried through the prepare, commit and release phases.
///
/// Created at command start from the project manifest; each phase fills in
/// the fields it resolves. Nothing here is persisted except through the cache
/// and git itself.
#[derive(Clone)]
pub struct WorkflowContext {
    /// Local project (working tree, package name, version)
    pub project: Project,
    /// Resolved hosting server
    pub server: Option<ServerKind>,
    /// Resolved API token
    pub token: Option<String>,
    /// Resolved owner kind
    pub owner: Option<OwnerKind>,
    /// Login the repository lives under
    pub login: Option<String>,
    /// Existing or created remote repository
    pub repo: Option<Repo>,
    /// `origin` URL
    pub remote_url: Option<String>,
    /// Version and dev branch for this run
    pub working: Option<WorkingVersion>,
    /// Whether the release tail runs
    pub release_mode: bool,
}

impl WorkflowContext {
    /// Fresh context for a project
    pub fn new(project: Project, release_mode: bool) -> Self {
        Self {
            project,
            server: None,
            token: None,
            owner: None,
            login: None,
            repo: None,
            remote_url: None,
            working: None,
            release_mode,
        }
    }

    /// Dev branch, once resolved
    pub fn working_branch(&self) -> Option<&str> {
        self.working.as_ref().map(|w| w.branch.as_str())
    }
}

impl fmt::Debug for WorkflowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowContext")
            .field("project", &self.project)
            .field("server", &self.server)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("login", &self.login)
            .field("repo", &self.repo)
            .field("remote_url", &self.remote_url)
            .field("working", &self.working)
            .field("release_mode", &self.release_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_kind_parses_cached_values() {
        assert_eq!("user".parse::<OwnerKind>().unwrap(), OwnerKind::User);
        assert_eq!("org\n".parse::<OwnerKind>().unwrap(), OwnerKind::Org);
        assert!("team".parse::<OwnerKind>().is_err());
    }
}
