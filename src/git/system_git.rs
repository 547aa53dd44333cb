//! System git backend.
//!
//! Every operation spawns the `git` executable found on PATH against the
//! working tree and waits for it to exit.

use crate::error::{GitError, ProjectError, Result};
use crate::git::{GitOperations, PullOptions, RemoteInfo, StatusSummary};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Git operations backed by the system `git` executable
#[derive(Debug, Clone)]
pub struct SystemGit {
    git: PathBuf,
    work_dir: PathBuf,
}

impl SystemGit {
    /// Bind to a working tree. The tree does not need to be a repository yet.
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let git = which::which("git").map_err(|_| ProjectError::ToolNotFound {
            tool: "git".to_string(),
        })?;

        Ok(Self {
            git,
            work_dir: work_dir.as_ref().to_path_buf(),
        })
    }

    /// Run git with the given arguments, returning stdout on success
    async fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        log::debug!("git {}", args.join(" "));

        let output = Command::new(&self.git)
            .arg("-C")
            .arg(&self.work_dir)
            .args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                stderr,
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitOperations for SystemGit {
    async fn init(&self) -> Result<()> {
        self.run(["init", "--initial-branch=master"]).await.map(|_| ())
    }

    async fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        let output = self.run(["remote", "-v"]).await?;
        let mut remotes: Vec<RemoteInfo> = Vec::new();

        for line in output.lines() {
            let mut parts = line.split_whitespace();
            let (Some(name), Some(url)) = (parts.next(), parts.next()) else {
                continue;
            };
            if !remotes.iter().any(|r| r.name == name) {
                remotes.push(RemoteInfo {
                    name: name.to_string(),
                    url: url.to_string(),
                });
            }
        }

        Ok(remotes)
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run(["remote", "add", name, url]).await.map(|_| ())
    }

    async fn status(&self) -> Result<StatusSummary> {
        let output = self.run(["status", "--porcelain", "-z", "--untracked-files=all"]).await?;
        Ok(StatusSummary::parse_porcelain(&output))
    }

    async fn add(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add".to_string(), "--all".to_string(), "--".to_string()];
        args.extend(paths.iter().cloned());
        self.run(args).await.map(|_| ())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.run(["commit", "-m", message]).await.map(|_| ())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(["push", remote, branch]).await.map(|_| ())
    }

    async fn pull(&self, remote: &str, branch: &str, options: PullOptions) -> Result<()> {
        let mut args = vec!["pull", "--no-rebase", "--no-edit", remote, branch];
        if options.allow_unrelated_histories {
            args.push("--allow-unrelated-histories");
        }
        self.run(args).await.map(|_| ())
    }

    async fn stash_list(&self) -> Result<Vec<String>> {
        let output = self.run(["stash", "list"]).await?;
        Ok(output.lines().map(str::to_string).collect())
    }

    async fn stash_pop(&self) -> Result<()> {
        self.run(["stash", "pop"]).await.map(|_| ())
    }

    async fn local_branches(&self) -> Result<Vec<String>> {
        let output = self
            .run(["branch", "--list", "--format=%(refname:short)"])
            .await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.run(["checkout", branch]).await.map(|_| ())
    }

    async fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        self.run(["checkout", "-b", branch]).await.map(|_| ())
    }

    async fn list_remote_refs(&self) -> Result<String> {
        self.run(["ls-remote", "--refs"]).await
    }

    async fn tags(&self) -> Result<Vec<String>> {
        let output = self.run(["tag", "--list"]).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn add_tag(&self, tag: &str) -> Result<()> {
        self.run(["tag", tag]).await.map(|_| ())
    }

    async fn delete_tag(&self, tag: &str) -> Result<()> {
        self.run(["tag", "-d", tag]).await.map(|_| ())
    }

    async fn push_tags(&self, remote: &str) -> Result<()> {
        self.run(["push", remote, "--tags"]).await.map(|_| ())
    }

    async fn delete_remote_ref(&self, remote: &str, refname: &str) -> Result<()> {
        let refspec = format!(":{}", refname);
        self.run(["push", remote, refspec.as_str()])
            .await
            .map(|_| ())
    }

    async fn merge(&self, branch: &str) -> Result<()> {
        self.run(["merge", "--no-edit", branch]).await.map(|_| ())
    }

    async fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.run(["branch", "-d", branch]).await.map(|_| ())
    }

    async fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(["push", remote, "--delete", branch])
            .await
            .map(|_| ())
    }
}
