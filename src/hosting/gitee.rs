//! Gitee (v5) REST API client.

use super::rest::{RestClient, TokenPlacement};
use super::{Identity, Org, Repo};
use crate::error::Result;
use serde_json::json;

const API_BASE: &str = "https://gitee.com/api/v5/";

/// Client for `gitee.com/api/v5`
#[derive(Debug, Clone)]
pub struct GiteeClient {
    rest: RestClient,
}

impl GiteeClient {
    /// Create an unauthenticated client
    pub fn new() -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(API_BASE, "gitee", TokenPlacement::Query)?,
        })
    }

    pub(crate) fn set_token(&mut self, token: &str) {
        self.rest.set_token(token);
    }

    pub(crate) async fn get_user(&self) -> Result<Option<Identity>> {
        self.rest.get_optional("user").await
    }

    pub(crate) async fn get_orgs(&self) -> Result<Vec<Org>> {
        // Gitee pages at 20 by default; an account in more orgs than this is unusual.
        self.rest.get("user/orgs?page=1&per_page=100").await
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
        format!("git@gitee.com:{}/{}.git", login, name)
    }
}
