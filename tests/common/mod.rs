//! In-memory collaborators for driving the workflow without git, a terminal
//! or the network.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use voyage_publish::cli::OutputManager;
use voyage_publish::error::{GitError, HostingError, PublishError, Result};
use voyage_publish::git::{GitOperations, PullOptions, RemoteInfo, StatusSummary};
use voyage_publish::hosting::{HostingClient, HostingConnector, Identity, Org, Repo, ServerKind};
use voyage_publish::project::{PackageTool, Project};
use voyage_publish::prompt::Prompter;
use voyage_publish::{Workflow, WorkflowConfig, WorkflowContext};

// ---------------------------------------------------------------------------
// git

/// Observable state of the fake repository and its remote
#[derive(Debug, Default)]
pub struct GitState {
    pub calls: Vec<String>,
    pub initialized: bool,
    pub remotes: Vec<RemoteInfo>,
    pub pending: Vec<String>,
    pub conflicted: Vec<String>,
    pub stash: Vec<String>,
    pub current: String,
    pub local_branches: BTreeSet<String>,
    pub local_tags: BTreeSet<String>,
    /// Remote refs by full name, e.g. `refs/heads/master`
    pub remote_refs: BTreeSet<String>,
    /// Stderr to fail a pull of the given branch with
    pub pull_failures: HashMap<String, String>,
    /// Files left conflicted by a successful pull of the given branch
    pub pull_conflicts: HashMap<String, Vec<String>>,
    pub commits: Vec<String>,
    pub pulls: Vec<(String, PullOptions)>,
    pub merges: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeGit {
    pub state: Arc<Mutex<GitState>>,
}

impl FakeGit {
    pub fn new() -> Self {
        let git = Self::default();
        {
            let mut state = git.state();
            state.current = "master".to_string();
            state.local_branches.insert("master".to_string());
        }
        git
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, GitState> {
        self.state.lock().expect("git state lock")
    }

    pub fn with_remote_ref(self, name: &str) -> Self {
        self.state().remote_refs.insert(name.to_string());
        self
    }

    pub fn with_pending(self, path: &str) -> Self {
        self.state().pending.push(path.to_string());
        self
    }

    pub fn fail_pull(self, branch: &str, stderr: &str) -> Self {
        self.state()
            .pull_failures
            .insert(branch.to_string(), stderr.to_string());
        self
    }

    pub fn conflict_on_pull(self, branch: &str, path: &str) -> Self {
        self.state()
            .pull_conflicts
            .entry(branch.to_string())
            .or_default()
            .push(path.to_string());
        self
    }

    fn record(&self, call: String) {
        self.state().calls.push(call);
    }
}

fn command_failed(command: &str, stderr: &str) -> PublishError {
    GitError::CommandFailed {
        command: command.to_string(),
        stderr: stderr.to_string(),
    }
    .into()
}

impl GitOperations for FakeGit {
    async fn init(&self) -> Result<()> {
        self.record("init".to_string());
        self.state().initialized = true;
        Ok(())
    }

    async fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        Ok(self.state().remotes.clone())
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.record(format!("remote add {} {}", name, url));
        self.state().remotes.push(RemoteInfo {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    async fn status(&self) -> Result<StatusSummary> {
        let state = self.state();
        Ok(StatusSummary {
            modified: state.pending.clone(),
            conflicted: state.conflicted.clone(),
            ..StatusSummary::default()
        })
    }

    async fn add(&self, paths: &[String]) -> Result<()> {
        self.record(format!("add {}", paths.join(" ")));
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));
        let mut state = self.state();
        state.pending.clear();
        state.commits.push(message.to_string());
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, branch));
        self.state().remote_refs.insert(format!("refs/heads/{}", branch));
        Ok(())
    }

    async fn pull(&self, remote: &str, branch: &str, options: PullOptions) -> Result<()> {
        self.record(format!("pull {} {}", remote, branch));
        let mut state = self.state();
        state.pulls.push((branch.to_string(), options));
        if let Some(stderr) = state.pull_failures.get(branch) {
            return Err(command_failed("pull", stderr));
        }
        if let Some(paths) = state.pull_conflicts.get(branch).cloned() {
            state.conflicted.extend(paths);
        }
        Ok(())
    }

    async fn stash_list(&self) -> Result<Vec<String>> {
        Ok(self.state().stash.clone())
    }

    async fn stash_pop(&self) -> Result<()> {
        self.record("stash pop".to_string());
        self.state().stash.pop();
        Ok(())
    }

    async fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.state().local_branches.iter().cloned().collect())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {}", branch));
        let mut state = self.state();
        if !state.local_branches.contains(branch) {
            return Err(command_failed("checkout", "pathspec did not match"));
        }
        state.current = branch.to_string();
        Ok(())
    }

    async fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout -b {}", branch));
        let mut state = self.state();
        state.local_branches.insert(branch.to_string());
        state.current = branch.to_string();
        Ok(())
    }

    async fn list_remote_refs(&self) -> Result<String> {
        let state = self.state();
        Ok(state
            .remote_refs
            .iter()
            .map(|name| format!("0123456789abcdef\t{}\n", name))
            .collect())
    }

    async fn tags(&self) -> Result<Vec<String>> {
        Ok(self.state().local_tags.iter().cloned().collect())
    }

    async fn add_tag(&self, tag: &str) -> Result<()> {
        self.record(format!("tag {}", tag));
        let mut state = self.state();
        if !state.local_tags.insert(tag.to_string()) {
            return Err(command_failed("tag", "tag already exists"));
        }
        Ok(())
    }

    async fn delete_tag(&self, tag: &str) -> Result<()> {
        self.record(format!("tag -d {}", tag));
        self.state().local_tags.remove(tag);
        Ok(())
    }

    async fn push_tags(&self, remote: &str) -> Result<()> {
        self.record(format!("push {} --tags", remote));
        let mut state = self.state();
        let tags: Vec<String> = state.local_tags.iter().cloned().collect();
        for tag in tags {
            let name = format!("refs/tags/{}", tag);
            if state.remote_refs.contains(&name) {
                return Err(command_failed("push --tags", "rejected: already exists"));
            }
            state.remote_refs.insert(name);
        }
        Ok(())
    }

    async fn delete_remote_ref(&self, remote: &str, refname: &str) -> Result<()> {
        self.record(format!("push {} :{}", remote, refname));
        self.state().remote_refs.remove(refname);
        Ok(())
    }

    async fn merge(&self, branch: &str) -> Result<()> {
        self.record(format!("merge {}", branch));
        self.state().merges.push(branch.to_string());
        Ok(())
    }

    async fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.record(format!("branch -d {}", branch));
        self.state().local_branches.remove(branch);
        Ok(())
    }

    async fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} --delete {}", remote, branch));
        self.state()
            .remote_refs
            .remove(&format!("refs/heads/{}", branch));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// prompts

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(usize),
    Input(String),
    Password(String),
}

#[derive(Debug, Default)]
pub struct PromptState {
    pub answers: VecDeque<Answer>,
    /// Every prompt shown, with the choices offered for selects
    pub asked: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    pub state: Arc<Mutex<PromptState>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        let prompter = Self::default();
        prompter.state().answers = answers.into();
        prompter
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, PromptState> {
        self.state.lock().expect("prompt state lock")
    }

    pub fn asked(&self) -> Vec<String> {
        self.state().asked.iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.state().answers.len()
    }

    fn next(&self, message: &str, items: &[String]) -> Answer {
        let mut state = self.state();
        state.asked.push((message.to_string(), items.to_vec()));
        state
            .answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, items: &[String], _default: usize) -> Result<usize> {
        match self.next(message, items) {
            Answer::Select(index) => Ok(index),
            other => panic!("expected a select answer for {:?}, got {:?}", message, other),
        }
    }

    fn input(&self, message: &str, _default: &str) -> Result<String> {
        match self.next(message, &[]) {
            Answer::Input(text) => Ok(text),
            other => panic!("expected an input answer for {:?}, got {:?}", message, other),
        }
    }

    fn password(&self, message: &str) -> Result<String> {
        match self.next(message, &[]) {
            Answer::Password(text) => Ok(text),
            other => panic!("expected a password answer for {:?}, got {:?}", message, other),
        }
    }
}

// ---------------------------------------------------------------------------
// hosting

#[derive(Debug, Default)]
pub struct HostingState {
    pub user: Option<Identity>,
    pub orgs: Vec<Org>,
    /// Existing repositories as `<login>/<name>`
    pub repos: BTreeSet<String>,
    pub created_user_repos: Vec<String>,
    pub created_org_repos: Vec<(String, String)>,
    pub tokens: Vec<String>,
    pub connected: Vec<ServerKind>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub state: Arc<Mutex<HostingState>>,
}

impl FakeConnector {
    pub fn new(login: &str, orgs: &[&str]) -> Self {
        let connector = Self::default();
        {
            let mut state = connector.state();
            state.user = Some(Identity {
                login: login.to_string(),
                name: None,
            });
            state.orgs = orgs
                .iter()
                .map(|o| Org {
                    login: o.to_string(),
                })
                .collect();
        }
        connector
    }

    pub fn without_user() -> Self {
        Self::default()
    }

    pub fn with_repo(self, full_name: &str) -> Self {
        self.state().repos.insert(full_name.to_string());
        self
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, HostingState> {
        self.state.lock().expect("hosting state lock")
    }
}

#[derive(Debug)]
pub struct FakeHosting {
    kind: ServerKind,
    token: Option<String>,
    state: Arc<Mutex<HostingState>>,
}

impl FakeHosting {
    fn state(&self) -> std::sync::MutexGuard<'_, HostingState> {
        self.state.lock().expect("hosting state lock")
    }

    fn authorized(&self) -> Result<()> {
        match &self.token {
            Some(_) => Ok(()),
            None => Err(HostingError::Api {
                provider: self.kind.to_string(),
                status: 401,
                message: "Bad credentials".to_string(),
            }
            .into()),
        }
    }
}

fn repo(login: &str, name: &str) -> Repo {
    Repo {
        name: name.to_string(),
        full_name: format!("{}/{}", login, name),
        html_url: None,
        ssh_url: None,
    }
}

impl HostingClient for FakeHosting {
    fn kind(&self) -> ServerKind {
        self.kind
    }

    fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
        self.state().tokens.push(token.to_string());
    }

    async fn get_user(&self) -> Result<Option<Identity>> {
        self.authorized()?;
        Ok(self.state().user.clone())
    }

    async fn get_orgs(&self) -> Result<Vec<Org>> {
        self.authorized()?;
        Ok(self.state().orgs.clone())
    }

    async fn get_repo(&self, login: &str, name: &str) -> Result<Option<Repo>> {
        self.authorized()?;
        let full_name = format!("{}/{}", login, name);
        Ok(self
            .state()
            .repos
            .contains(&full_name)
            .then(|| repo(login, name)))
    }

    async fn create_repo(&self, name: &str) -> Result<Repo> {
        self.authorized()?;
        let mut state = self.state();
        let login = state
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default();
        state.created_user_repos.push(name.to_string());
        state.repos.insert(format!("{}/{}", login, name));
        Ok(repo(&login, name))
    }

    async fn create_org_repo(&self, name: &str, org: &str) -> Result<Repo> {
        self.authorized()?;
        let mut state = self.state();
        state
            .created_org_repos
            .push((org.to_string(), name.to_string()));
        state.repos.insert(format!("{}/{}", org, name));
        Ok(repo(org, name))
    }

    fn remote_url(&self, login: &str, name: &str) -> String {
        format!("git@{}.example:{}/{}.git", self.kind.as_str(), login, name)
    }
}

impl HostingConnector for FakeConnector {
    type Client = FakeHosting;

    fn connect(&self, kind: ServerKind) -> Result<FakeHosting> {
        self.state().connected.push(kind);
        Ok(FakeHosting {
            kind,
            token: None,
            state: Arc::clone(&self.state),
        })
    }
}

// ---------------------------------------------------------------------------
// package tool

#[derive(Debug, Default)]
pub struct ToolState {
    pub calls: Vec<String>,
    /// Directory `build` creates, relative to the project
    pub build_output: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTool {
    pub state: Arc<Mutex<ToolState>>,
}

impl FakeTool {
    pub fn producing(build_output: &str) -> Self {
        let tool = Self::default();
        tool.state().build_output = Some(build_output.to_string());
        tool
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, ToolState> {
        self.state.lock().expect("tool state lock")
    }
}

impl PackageTool for FakeTool {
    async fn build(&self, dir: &Path) -> Result<()> {
        let output = {
            let mut state = self.state();
            state.calls.push("build".to_string());
            state.build_output.clone()
        };
        if let Some(output) = output {
            fs::create_dir_all(dir.join(output))?;
        }
        Ok(())
    }

    async fn publish(&self, _dir: &Path) -> Result<()> {
        self.state().calls.push("publish".to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// fixtures

/// Temporary project directory and cache home
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    /// A project with the given manifest contents and an existing `.git`
    pub fn new(manifest: &str) -> Self {
        let fixture = Self::bare(manifest);
        fs::create_dir_all(fixture.project_dir().join(".git")).expect("create .git");
        fixture
    }

    /// A project that is not a git repository yet
    pub fn bare(manifest: &str) -> Self {
        let root = TempDir::new().expect("create temp dir");
        fs::create_dir_all(root.path().join("project")).expect("create project dir");
        fs::create_dir_all(root.path().join("home")).expect("create cli home");
        fs::write(root.path().join("project/package.json"), manifest).expect("write manifest");
        Self { root }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.path().join("project")
    }

    pub fn cli_home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn write(&self, relative: &str, contents: &str) {
        fs::write(self.project_dir().join(relative), contents).expect("write project file");
    }

    pub fn project(&self) -> Project {
        Project::load(self.project_dir()).expect("load project")
    }

    pub fn context(&self, release_mode: bool) -> WorkflowContext {
        WorkflowContext::new(self.project(), release_mode)
    }

    pub fn config(&self) -> WorkflowConfig {
        WorkflowConfig::new(self.cli_home())
    }

    /// Seed the cache as a previous run would have left it
    pub fn seed_cache(&self, package: &str, server: &str, token: &str, owner: &str, login: &str) {
        let dir = self.cli_home().join(format!(".git-{}", package));
        fs::create_dir_all(&dir).expect("create cache dir");
        fs::write(dir.join(".git_server"), server).expect("write server");
        fs::write(dir.join(".git_token"), token).expect("write token");
        fs::write(dir.join(".git_own"), owner).expect("write owner");
        fs::write(dir.join(".git_login"), login).expect("write login");
    }

    pub fn cache_value(&self, package: &str, file: &str) -> Option<String> {
        fs::read_to_string(self.cli_home().join(format!(".git-{}", package)).join(file)).ok()
    }
}

pub type TestWorkflow = Workflow<FakeGit, ScriptedPrompter, FakeConnector, FakeTool>;

pub fn workflow(
    git: &FakeGit,
    prompter: &ScriptedPrompter,
    connector: &FakeConnector,
    tool: &FakeTool,
    config: WorkflowConfig,
) -> TestWorkflow {
    Workflow::new(
        git.clone(),
        prompter.clone(),
        connector.clone(),
        tool.clone(),
        config,
        OutputManager::new(true),
    )
}

pub fn manifest(name: &str, version: &str) -> String {
    format!(
        "{{\n  \"name\": \"{}\",\n  \"version\": \"{}\",\n  \"private\": true\n}}\n",
        name, version
    )
}
