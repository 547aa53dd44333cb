//! Local project inspection: manifest, component descriptor, ignore file.
//!
//! The project manifest is `package.json`. A project is a *component* when a
//! `.componentrc` descriptor sits next to it; components are built and
//! published to the package registry as part of a release.

pub mod ignore;
mod npm;

pub use npm::{Npm, PackageTool};

use crate::error::{ProjectError, Result, VersionError};
use semver::Version;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name
pub const MANIFEST_FILE: &str = "package.json";
/// Component descriptor file name
pub const COMPONENT_FILE: &str = ".componentrc";
/// Local VCS metadata directory
pub const GIT_DIR: &str = ".git";

/// Contents of `.componentrc`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Build output directory, relative to the project root
    pub build_path: String,
}

/// Project identity read from the manifest
#[derive(Debug, Clone)]
pub struct Project {
    dir: PathBuf,
    name: String,
    version: Version,
}

impl Project {
    /// Read `package.json` from `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let manifest = read_manifest(&dir)?;

        let name = string_field(&manifest, "name")?;
        let raw_version = string_field(&manifest, "version")?;
        let version = Version::parse(&raw_version).map_err(|source| VersionError::ParseFailed {
            version: raw_version.clone(),
            source,
        })?;

        log::debug!("project {} {} at {}", name, version, dir.display());
        Ok(Self { dir, name, version })
    }

    /// Working tree root
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Package name from the manifest
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remote repository name: the package name without an npm scope
    pub fn repo_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Current version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether a `.git` directory exists
    pub fn has_git_dir(&self) -> bool {
        self.dir.join(GIT_DIR).exists()
    }

    /// Component descriptor, if this project is a component
    pub fn component(&self) -> Result<Option<ComponentDescriptor>> {
        let path = self.dir.join(COMPONENT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let descriptor = serde_json::from_str(&content).map_err(|e| {
            ProjectError::InvalidDescriptor {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(descriptor))
    }

    /// Entries of the manifest's `files` array
    pub fn published_files(&self) -> Result<Vec<String>> {
        let manifest = read_manifest(&self.dir)?;
        Ok(manifest
            .get("files")
            .and_then(Value::as_array)
            .map(|files| {
                files
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Write a new version into `package.json`, keeping every other key
    pub fn write_version(&mut self, version: &Version) -> Result<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let mut manifest = read_manifest(&self.dir)?;

        let object = manifest
            .as_object_mut()
            .ok_or_else(|| VersionError::ManifestUpdateFailed {
                path: path.clone(),
                reason: "manifest is not a JSON object".to_string(),
            })?;

        if object.get("version").and_then(Value::as_str) != Some(version.to_string().as_str()) {
            object.insert("version".to_string(), Value::String(version.to_string()));
            let mut content = serde_json::to_string_pretty(&manifest)?;
            content.push('\n');
            fs::write(&path, content).map_err(|e| VersionError::ManifestUpdateFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        }

        self.version = version.clone();
        Ok(())
    }

    /// Write the built-in ignore file if none exists. Returns whether it wrote one.
    pub fn ensure_ignore_file(&self) -> Result<bool> {
        let path = self.dir.join(ignore::IGNORE_FILE);
        if path.exists() {
            return Ok(false);
        }
        let is_component = self.component()?.is_some();
        fs::write(&path, ignore::template(is_component))?;
        Ok(true)
    }
}

fn read_manifest(dir: &Path) -> Result<Value> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Err(ProjectError::ManifestNotFound { path }.into());
    }
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

fn string_field(manifest: &Value, field: &str) -> Result<String> {
    manifest
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ProjectError::MissingField {
                field: field.to_string(),
            }
            .into()
        })
}
