//! Prepare phase: credentials, owner, remote repository, local repository.

use super::{OwnerKind, REMOTE, TRUNK, Workflow, WorkflowContext};
use crate::cache::{self, CacheKey, CacheStore, FileCache};
use crate::error::{CacheError, HostingError, ProjectError, Result};
use crate::git::{GitOperations, PullOptions};
use crate::hosting::{HostingClient, HostingConnector, Identity, Org, ServerKind};
use crate::project::PackageTool;
use crate::prompt::{self, Choice, Prompter};
use std::str::FromStr;

impl<G, P, C, T> Workflow<G, P, C, T>
where
    G: GitOperations,
    P: Prompter,
    C: HostingConnector,
    T: PackageTool,
{
    /// Resolve everything the commit phase needs, in order
    pub async fn prepare(&self, ctx: &mut WorkflowContext) -> Result<()> {
        let cache = self.check_home(ctx)?;
        let mut client = self.check_server(ctx, &cache)?;
        self.check_token(ctx, &cache, &mut client)?;
        let (user, orgs) = self.check_user_and_orgs(&client).await?;
        self.check_owner(ctx, &cache, &user, &orgs)?;
        self.check_repo(ctx, &client).await?;
        self.check_ignore_file(ctx)?;
        self.check_component(ctx).await?;
        self.init_local_repo(ctx, &client).await
    }

    fn check_home(&self, ctx: &WorkflowContext) -> Result<FileCache> {
        log::debug!("home {}", self.config.cli_home.display());
        cache::ensure_home(&self.config.cli_home)?;
        FileCache::open(&self.config.cli_home, ctx.project.name())
    }

    fn check_server(
        &self,
        ctx: &mut WorkflowContext,
        cache: &dyn CacheStore,
    ) -> Result<C::Client> {
        let cached = cached_value::<ServerKind>(cache, CacheKey::Server)?;

        let server = match cached {
            Some(server) if !self.config.refresh.server => {
                self.output
                    .success(&format!("Git server loaded: {}", server));
                server
            }
            _ => {
                let choices: Vec<Choice<ServerKind>> = ServerKind::ALL
                    .iter()
                    .map(|kind| Choice::new(kind.label(), *kind))
                    .collect();
                let server =
                    prompt::choose(&self.prompter, "Select the git hosting platform", &choices, 0)?;
                cache.write(CacheKey::Server, server.as_str())?;
                self.output.success(&format!(
                    "Git server saved: {} => {}",
                    server,
                    cache.location(CacheKey::Server)
                ));
                server
            }
        };

        ctx.server = Some(server);
        self.connector.connect(server)
    }

    fn check_token(
        &self,
        ctx: &mut WorkflowContext,
        cache: &dyn CacheStore,
        client: &mut C::Client,
    ) -> Result<()> {
        let cached = cache.read(CacheKey::Token)?;

        let token = match cached {
            Some(token) if !self.config.refresh.token => {
                self.output.success(&format!(
                    "Token loaded from {}",
                    cache.location(CacheKey::Token)
                ));
                token
            }
            _ => {
                let kind = client.kind();
                self.output.notice(&format!(
                    "No {} token yet. Generate one at {}",
                    kind,
                    kind.token_help_url()
                ));
                let token = self.prompter.password("Paste the token here")?;
                let token = token.trim().to_string();
                cache.write(CacheKey::Token, &token)?;
                self.output.success(&format!(
                    "Token saved to {}",
                    cache.location(CacheKey::Token)
                ));
                token
            }
        };

        client.set_token(&token);
        ctx.token = Some(token);
        Ok(())
    }

    async fn check_user_and_orgs(&self, client: &C::Client) -> Result<(Identity, Vec<Org>)> {
        let user = client.get_user().await?;
        let orgs = client.get_orgs().await?;
        let user = user.ok_or_else(|| HostingError::UserNotFound {
            provider: client.kind().to_string(),
        })?;

        log::debug!("user {} in {} orgs", user.login, orgs.len());
        self.output
            .success(&format!("{} user and organizations loaded", client.kind()));
        Ok((user, orgs))
    }

    fn check_owner(
        &self,
        ctx: &mut WorkflowContext,
        cache: &dyn CacheStore,
        user: &Identity,
        orgs: &[Org],
    ) -> Result<()> {
        let owner = cached_value::<OwnerKind>(cache, CacheKey::Owner)?;
        let login = cache.read(CacheKey::Login)?;

        let (owner, login) = match (owner, login) {
            (Some(owner), Some(login)) if !self.config.refresh.owner => {
                self.output.success(&format!("Git owner loaded: {}", owner));
                self.output.success(&format!("Git login loaded: {}", login));
                (owner, login)
            }
            _ => {
                self.output.notice("No git owner yet, select one");
                let mut choices = vec![Choice::new(OwnerKind::User.label(), OwnerKind::User)];
                if !orgs.is_empty() {
                    choices.push(Choice::new(OwnerKind::Org.label(), OwnerKind::Org));
                }
                let owner =
                    prompt::choose(&self.prompter, "Select the repository owner type", &choices, 0)?;

                let login = match owner {
                    OwnerKind::User => user.login.clone(),
                    OwnerKind::Org => {
                        let choices: Vec<Choice<String>> = orgs
                            .iter()
                            .map(|org| Choice::new(org.login.clone(), org.login.clone()))
                            .collect();
                        prompt::choose(&self.prompter, "Select the organization", &choices, 0)?
                    }
                };

                cache.write(CacheKey::Owner, owner.as_str())?;
                cache.write(CacheKey::Login, &login)?;
                self.output.success(&format!(
                    "Git owner saved: {} => {}",
                    owner,
                    cache.location(CacheKey::Owner)
                ));
                self.output.success(&format!(
                    "Git login saved: {} => {}",
                    login,
                    cache.location(CacheKey::Login)
                ));
                (owner, login)
            }
        };

        ctx.owner = Some(owner);
        ctx.login = Some(login);
        Ok(())
    }

    async fn check_repo(&self, ctx: &mut WorkflowContext, client: &C::Client) -> Result<()> {
        let (owner, login) = owner_and_login(ctx)?;
        let name = ctx.project.repo_name().to_string();

        let repo = match client.get_repo(&login, &name).await? {
            Some(repo) => repo,
            None => {
                self.output.progress("Creating remote repository...");
                let repo = match owner {
                    OwnerKind::User => client.create_repo(&name).await?,
                    OwnerKind::Org => client.create_org_repo(&name, &login).await?,
                };
                if repo.name.is_empty() {
                    return Err(HostingError::RepoCreationFailed { name }.into());
                }
                self.output.success("Remote repository created");
                repo
            }
        };

        self.output.success("Remote repository loaded");
        ctx.remote_url = Some(client.remote_url(&login, &name));
        ctx.repo = Some(repo);
        Ok(())
    }

    fn check_ignore_file(&self, ctx: &WorkflowContext) -> Result<()> {
        if ctx.project.ensure_ignore_file()? {
            self.output.success("Wrote .gitignore");
        }
        Ok(())
    }

    async fn check_component(&self, ctx: &WorkflowContext) -> Result<()> {
        let Some(component) = ctx.project.component()? else {
            return Ok(());
        };

        self.output.notice("Checking component build output");
        self.tool.build(ctx.project.dir()).await?;

        let build_path = ctx.project.dir().join(&component.build_path);
        if !build_path.exists() {
            return Err(ProjectError::BuildOutputMissing { path: build_path }.into());
        }

        let files = ctx.project.published_files()?;
        if !files.iter().any(|f| f == &component.build_path) {
            return Err(ProjectError::BuildOutputNotPublished {
                build_path: component.build_path,
            }
            .into());
        }

        log::debug!("build output {} verified", build_path.display());
        Ok(())
    }

    async fn init_local_repo(&self, ctx: &WorkflowContext, client: &C::Client) -> Result<()> {
        let remote_url = match &ctx.remote_url {
            Some(url) => url.clone(),
            None => {
                let (_, login) = owner_and_login(ctx)?;
                client.remote_url(&login, ctx.project.repo_name())
            }
        };

        if ctx.project.has_git_dir() {
            self.output.success("Git repository already initialized");
            return Ok(());
        }

        self.output.notice("Initializing git repository");
        self.git.init().await?;

        let remotes = self.git.remotes().await?;
        log::debug!("git remotes {:?}", remotes);
        if !remotes.iter().any(|r| r.name == REMOTE) {
            self.output.notice(&format!("Adding remote {} {}", REMOTE, remote_url));
            self.git.add_remote(REMOTE, &remote_url).await?;
        }

        self.initial_commit(ctx).await
    }

    async fn initial_commit(&self, ctx: &WorkflowContext) -> Result<()> {
        self.check_conflicts().await?;
        self.commit_pending().await?;

        if self.remote_has_branch(TRUNK).await? {
            self.output
                .notice(&format!("Remote {} exists, merging unrelated histories", TRUNK));
            self.pull_remote(ctx, TRUNK, PullOptions::unrelated()).await?;
        } else {
            self.push_remote(TRUNK).await?;
        }
        Ok(())
    }
}

fn owner_and_login(ctx: &WorkflowContext) -> Result<(OwnerKind, String)> {
    match (ctx.owner, &ctx.login) {
        (Some(owner), Some(login)) => Ok((owner, login.clone())),
        _ => Err(anyhow::anyhow!("repository owner has not been resolved").into()),
    }
}

/// Read and parse a cached value, naming the cache file on a bad value
fn cached_value<V>(cache: &dyn CacheStore, key: CacheKey) -> Result<Option<V>>
where
    V: FromStr<Err = CacheError>,
{
    let Some(raw) = cache.read(key)? else {
        return Ok(None);
    };
    raw.parse::<V>().map(Some).map_err(|e| match e {
        CacheError::InvalidValue { key: name, value, .. } => CacheError::InvalidValue {
            key: name,
            value,
            path: cache.location(key).into(),
        }
        .into(),
        other => other.into(),
    })
}
