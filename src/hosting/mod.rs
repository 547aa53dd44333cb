//! Hosting provider clients.
//!
//! The workflow talks to a remote hosting provider only through the
//! [`HostingClient`] capability. [`Provider`] is the closed set of supported
//! providers; adding one means adding a variant and its client module.

mod gitee;
mod github;
mod rest;
mod types;

pub use gitee::GiteeClient;
pub use github::GithubClient;
pub use types::{Identity, Org, Repo};

use crate::error::{CacheError, Result};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Supported hosting servers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    /// github.com
    Github,
    /// gitee.com
    Gitee,
}

impl ServerKind {
    /// All kinds, in prompt order
    pub const ALL: [ServerKind; 2] = [ServerKind::Github, ServerKind::Gitee];

    /// Value stored in the cache
    pub fn as_str(self) -> &'static str {
        match self {
            ServerKind::Github => "github",
            ServerKind::Gitee => "gitee",
        }
    }

    /// Label shown in prompts
    pub fn label(self) -> &'static str {
        match self {
            ServerKind::Github => "Github",
            ServerKind::Gitee => "Gitee",
        }
    }

    /// Page where a personal access token is generated
    pub fn token_help_url(self) -> &'static str {
        match self {
            ServerKind::Github => "https://github.com/settings/tokens",
            ServerKind::Gitee => "https://gitee.com/personal_access_tokens",
        }
    }

    /// Page where SSH public keys are added
    pub fn ssh_keys_url(self) -> &'static str {
        match self {
            ServerKind::Github => "https://github.com/settings/keys",
            ServerKind::Gitee => "https://gitee.com/profile/sshkeys",
        }
    }

    /// SSH setup guide
    pub fn ssh_help_url(self) -> &'static str {
        match self {
            ServerKind::Github => {
                "https://docs.github.com/en/authentication/connecting-to-github-with-ssh"
            }
            ServerKind::Gitee => "https://gitee.com/help/articles/4191",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerKind {
    type Err = CacheError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "github" => Ok(ServerKind::Github),
            "gitee" => Ok(ServerKind::Gitee),
            other => Err(CacheError::InvalidValue {
                key: "server".to_string(),
                value: other.to_string(),
                path: Default::default(),
            }),
        }
    }
}

/// Capability the workflow needs from a hosting provider
pub trait HostingClient {
    /// Which server this client talks to
    fn kind(&self) -> ServerKind;

    /// Authenticate subsequent requests
    fn set_token(&mut self, token: &str);

    /// Authenticated account, `None` if the provider reports no user
    fn get_user(&self) -> impl Future<Output = Result<Option<Identity>>>;

    /// Organizations of the authenticated account
    fn get_orgs(&self) -> impl Future<Output = Result<Vec<Org>>>;

    /// Look up a repository, `None` if it does not exist
    fn get_repo(&self, login: &str, name: &str) -> impl Future<Output = Result<Option<Repo>>>;

    /// Create a repository under the authenticated account
    fn create_repo(&self, name: &str) -> impl Future<Output = Result<Repo>>;

    /// Create a repository under an organization
    fn create_org_repo(&self, name: &str, org: &str) -> impl Future<Output = Result<Repo>>;

    /// SSH remote URL for a repository
    fn remote_url(&self, login: &str, name: &str) -> String;
}

/// Supported providers
#[derive(Debug, Clone)]
pub enum Provider {
    /// GitHub
    Github(GithubClient),
    /// Gitee
    Gitee(GiteeClient),
}

impl Provider {
    /// Construct the client for a server kind
    pub fn new(kind: ServerKind) -> Result<Self> {
        Ok(match kind {
            ServerKind::Github => Provider::Github(GithubClient::new()?),
            ServerKind::Gitee => Provider::Gitee(GiteeClient::new()?),
        })
    }
}

impl HostingClient for Provider {
    fn kind(&self) -> ServerKind {
        match self {
            Provider::Github(_) => ServerKind::Github,
            Provider::Gitee(_) => ServerKind::Gitee,
        }
    }

    fn set_token(&mut self, token: &str) {
        match self {
            Provider::Github(client) => client.set_token(token),
            Provider::Gitee(client) => client.set_token(token),
        }
    }

    async fn get_user(&self) -> Result<Option<Identity>> {
        match self {
            Provider::Github(client) => client.get_user().await,
            Provider::Gitee(client) => client.get_user().await,
        }
    }

    async fn get_orgs(&self) -> Result<Vec<Org>> {
        match self {
            Provider::Github(client) => client.get_orgs().await,
            Provider::Gitee(client) => client.get_orgs().await,
        }
    }

    async fn get_repo(&self, login: &str, name: &str) -> Result<Option<Repo>> {
        match self {
            Provider::Github(client) => client.get_repo(login, name).await,
            Provider::Gitee(client) => client.get_repo(login, name).await,
        }
    }

    async fn create_repo(&self, name: &str) -> Result<Repo> {
        match self {
            Provider::Github(client) => client.create_repo(name).await,
            Provider::Gitee(client) => client.create_repo(name).await,
        }
    }

    async fn create_org_repo(&self, name: &str, org: &str) -> Result<Repo> {
        match self {
            Provider::Github(client) => client.create_org_repo(name, org).await,
            Provider::Gitee(client) => client.create_org_repo(name, org).await,
        }
    }

    fn remote_url(&self, login: &str, name: &str) -> String {
        match self {
            Provider::Github(_) => GithubClient::remote_url(login, name),
            Provider::Gitee(_) => GiteeClient::remote_url(login, name),
        }
    }
}

/// Builds a hosting client once the server kind is known
pub trait HostingConnector {
    /// Client type produced
    type Client: HostingClient;

    /// Construct a client for the given server
    fn connect(&self, kind: ServerKind) -> Result<Self::Client>;
}

/// Connector producing the real [`Provider`] clients
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderConnector;

impl HostingConnector for ProviderConnector {
    type Client = Provider;

    fn connect(&self, kind: ServerKind) -> Result<Provider> {
        Provider::new(kind)
    }
}
