//! Package build and publish via npm.

use crate::error::{ProjectError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Builds and publishes a component package
pub trait PackageTool {
    /// Run the project's build script
    fn build(&self, dir: &Path) -> impl Future<Output = Result<()>>;

    /// Publish the package to the registry
    fn publish(&self, dir: &Path) -> impl Future<Output = Result<()>>;
}

/// `npm run build` / `npm publish`
#[derive(Debug, Clone, Copy, Default)]
pub struct Npm;

impl Npm {
    fn program(&self) -> Result<PathBuf> {
        which::which("npm").map_err(|_| {
            ProjectError::ToolNotFound {
                tool: "npm".to_string(),
            }
            .into()
        })
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let program = self.program()?;
        let command = format!("npm {}", args.join(" "));
        log::debug!("{} in {}", command, dir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| ProjectError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProjectError::CommandFailed {
                command,
                reason: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            }
            .into());
        }

        Ok(())
    }
}

impl PackageTool for Npm {
    async fn build(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["run", "build"]).await
    }

    async fn publish(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["publish"]).await
    }
}
