//! # Voyage Publish
//!
//! Git release workflow for scaffolded projects.
//!
//! Takes a working tree with uncommitted or unpushed changes and drives it
//! through version resolution, dev-branch creation, conflict and stash
//! handling, and remote synchronization. In release mode it also publishes
//! components, replaces the `release/<version>` tag, merges into `master` and
//! deletes the dev branch.
//!
//! ## Usage
//!
//! ```bash
//! voyage_publish                  # commit and push dev/<version>
//! voyage_publish --prod           # ...then tag, merge and clean up
//! voyage_publish --refresh-token  # re-enter the cached API token
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hosting;
pub mod project;
pub mod prompt;
pub mod version;
pub mod workflow;

pub use cache::{CacheKey, CacheStore, FileCache};
pub use cli::Args;
pub use config::{RefreshFlags, WorkflowConfig};
pub use error::{PublishError, Result};
pub use git::{GitOperations, SystemGit};
pub use hosting::{HostingClient, HostingConnector, Provider, ServerKind};
pub use project::{PackageTool, Project};
pub use prompt::Prompter;
pub use version::{VersionBump, WorkingVersion};
pub use workflow::{OwnerKind, Workflow, WorkflowContext};
