//! Minimal JSON REST client shared by the hosting providers.

use crate::error::{HostingError, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// How the token is attached to requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenPlacement {
    /// `Authorization: token <token>` header
    Header,
    /// `access_token=<token>` query parameter
    Query,
}

#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
    base: Url,
    provider: &'static str,
    placement: TokenPlacement,
    token: Option<String>,
}

impl RestClient {
    pub(crate) fn new(
        base: &str,
        provider: &'static str,
        placement: TokenPlacement,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("voyage_publish/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| HostingError::Request {
                url: base.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base: Url::parse(base).map_err(HostingError::from)?,
            provider,
            placement,
            token: None,
        })
    }

    pub(crate) fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn request(&self, method: Method, path: &str) -> Result<(Url, RequestBuilder)> {
        let url = self.base.join(path).map_err(HostingError::from)?;
        let mut builder = self
            .http
            .request(method, url.clone())
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = &self.token {
            builder = match self.placement {
                TokenPlacement::Header => {
                    builder.header(reqwest::header::AUTHORIZATION, format!("token {}", token))
                }
                TokenPlacement::Query => builder.query(&[("access_token", token)]),
            };
        }

        Ok((url, builder))
    }

    async fn send(&self, url: &Url, builder: RequestBuilder) -> Result<reqwest::Response> {
        log::debug!("{} {}", self.provider, url.path());
        builder.send().await.map_err(|source| {
            HostingError::Request {
                url: url.to_string(),
                source,
            }
            .into()
        })
    }

    async fn decode<T: DeserializeOwned>(&self, url: &Url, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HostingError::Api {
                provider: self.provider.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response.json::<T>().await.map_err(|source| {
            HostingError::Request {
                url: url.to_string(),
                source,
            }
            .into()
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (url, builder) = self.request(Method::GET, path)?;
        let response = self.send(&url, builder).await?;
        self.decode(&url, response).await
    }

    /// GET that maps 404 to `None`
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let (url, builder) = self.request(Method::GET, path)?;
        let response = self.send(&url, builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.decode(&url, response).await.map(Some)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let (url, builder) = self.request(Method::POST, path)?;
        let response = self.send(&url, builder.json(body)).await?;
        self.decode(&url, response).await
    }
}
