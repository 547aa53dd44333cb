//! Per-package cache of hosting selections and credentials.
//!
//! Four independent slots live under `<cli_home>/.git-<package>/`, one flat
//! file each. A written slot is authoritative until a refresh flag or its
//! absence forces a new prompt.

use crate::error::{CacheError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory prefix for per-package cache roots
pub const CACHE_DIR_PREFIX: &str = ".git";

/// Cache slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Hosting server kind (`github` / `gitee`)
    Server,
    /// Hosting API token
    Token,
    /// Repository owner kind (`user` / `org`)
    Owner,
    /// Login the repository lives under
    Login,
}

impl CacheKey {
    /// File name backing this slot
    pub fn file_name(self) -> &'static str {
        match self {
            CacheKey::Server => ".git_server",
            CacheKey::Token => ".git_token",
            CacheKey::Owner => ".git_own",
            CacheKey::Login => ".git_login",
        }
    }
}

/// Key-value store for cached selections
pub trait CacheStore {
    /// Read a slot. Missing and empty slots both read as `None`.
    fn read(&self, key: CacheKey) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value
    fn write(&self, key: CacheKey, value: &str) -> Result<()>;

    /// Where a slot is stored, for log output
    fn location(&self, key: CacheKey) -> String;
}

/// Flat-file cache rooted at `<cli_home>/.git-<package>`
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Open the cache for a package, creating its directory
    pub fn open(cli_home: &Path, package_name: &str) -> Result<Self> {
        let root = cli_home.join(format!(
            "{}-{}",
            CACHE_DIR_PREFIX,
            sanitize_package_name(package_name)
        ));
        fs::create_dir_all(&root).map_err(|e| CacheError::HomeUnavailable {
            path: root.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("cache root {}", root.display());
        Ok(Self { root })
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl CacheStore for FileCache {
    fn read(&self, key: CacheKey) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn write(&self, key: CacheKey, value: &str) -> Result<()> {
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn location(&self, key: CacheKey) -> String {
        self.path(key).display().to_string()
    }
}

/// Ensure the cache home exists and is a directory
pub fn ensure_home(cli_home: &Path) -> Result<()> {
    fs::create_dir_all(cli_home).map_err(|e| CacheError::HomeUnavailable {
        path: cli_home.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !cli_home.is_dir() {
        return Err(CacheError::HomeUnavailable {
            path: cli_home.to_path_buf(),
            reason: "not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}

// Scoped npm names (`@scope/pkg`) would otherwise nest directories.
fn sanitize_package_name(name: &str) -> String {
    name.replace('/', "+")
}
