//! GitHub REST API client.

use super::rest::{RestClient, TokenPlacement};
use super::{Identity, Org, Repo};
use crate::error::Result;
use serde_json::json;

const API_BASE: &str = "https://api.github.com/";

/// Client for `api.github.com`
#[derive(Debug, Clone)]
pub struct GithubClient {
    rest: RestClient,
}

impl GithubClient {
    /// Create an unauthenticated client
    pub fn new() -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(API_BASE, "github", TokenPlacement::Header)?,
        })
    }

    pub(crate) fn set_token(&mut self, token: &str) {
        self.rest.set_token(token);
    }

    pub(crate) async fn get_user(&self) -> Result<Option<Identity>> {
        self.rest.get_optional("user").await
    }

    pub(crate) async fn get_orgs(&self) -> Result<Vec<Org>> {
        self.rest.get("user/orgs").await
    }

    pub(crate) async fn get_repo(&self, login: &str, name: &str) -> Result<Option<Repo>> {
        self.rest
            .get_optional(&format!("repos/{}/{}", login, name))
            .await
    }

    pub(crate) async fn create_repo(&self, name: &str) -> Result<Repo> {
        self.rest.post("user/repos", &json!({ "name": name })).await
    }

    pub(crate) async fn create_org_repo(&self, name: &str, org: &str) -> Result<Repo> {
        self.rest
            .post(&format!("orgs/{}/repos", org), &json!({ "name": name }))
            .await
    }

    pub(crate) fn remote_url(login: &str, name: &str) -> String {
        format!("git@github.com:{}/{}.git", login, name)
    }
}
