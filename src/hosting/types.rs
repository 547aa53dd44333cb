//! Hosting API payloads.

use serde::Deserialize;

/// Authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Account login
    pub login: String,
    /// Display name, when set
    #[serde(default)]
    pub name: Option<String>,
}

/// Organization the account belongs to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Org {
    /// Organization login
    pub login: String,
}

/// Remote repository handle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repo {
    /// Repository name
    pub name: String,
    /// `<owner>/<name>`
    #[serde(default)]
    pub full_name: String,
    /// Browser URL
    #[serde(default)]
    pub html_url: Option<String>,
    /// SSH clone URL
    #[serde(default)]
    pub ssh_url: Option<String>,
}
