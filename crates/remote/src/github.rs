//! GitHub clients: the OAuth token-exchange proxy and the REST API.
//!
//! The proxy turns an authorization code into `{accessToken, user}`; this
//! crate only calls it. Repository listing goes straight to GitHub with
//! the resulting token.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use showcase_core::github::{GithubRepo, GithubSession, GithubUser};

/// GitHub rejects API requests without a user agent.
const USER_AGENT: &str = concat!("showcase/", env!("CARGO_PKG_VERSION"));

/// Media type for the v3 REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Repositories requested per listing.
pub const REPOS_PER_PAGE: u32 = 20;

/// Errors from GitHub or the token-exchange proxy.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub or the proxy returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The proxy refused the authorization code (a 4xx answer, or a 2xx
    /// body carrying `error`).
    #[error("GitHub authentication failed: {0}")]
    Rejected(String),
}

/// GitHub operations needed for repository import.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Exchange an OAuth authorization code for a signed-in session.
    async fn exchange_code(&self, code: &str) -> Result<GithubSession, GithubError>;

    /// List the user's repositories, most recently updated first.
    async fn list_repositories(&self, access_token: &str) -> Result<Vec<GithubRepo>, GithubError>;
}

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubSettings {
    /// REST API base, normally `https://api.github.com`.
    pub api_url: String,
    /// Token-exchange proxy base, e.g. `http://localhost:3001`.
    pub oauth_proxy_url: String,
    pub timeout: Duration,
}

/// Body returned by the token-exchange proxy.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeResponse {
    access_token: Option<String>,
    user: Option<GithubUser>,
    error: Option<String>,
}

/// HTTP client for GitHub and the token-exchange proxy.
pub struct GithubClient {
    client: reqwest::Client,
    settings: GithubSettings,
}

impl GithubClient {
    pub fn new(settings: GithubSettings) -> Result<Self, GithubError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, settings })
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GithubError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn exchange_code(&self, code: &str) -> Result<GithubSession, GithubError> {
        let response = self
            .client
            .post(format!(
                "{}/api/github/auth",
                self.settings.oauth_proxy_url.trim_end_matches('/')
            ))
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ExchangeResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), "GitHub code exchange rejected");
            return Err(GithubError::Rejected(message));
        }

        let body: ExchangeResponse = Self::ensure_success(response).await?.json().await?;
        if let Some(error) = body.error {
            return Err(GithubError::Rejected(error));
        }
        match (body.access_token, body.user) {
            (Some(access_token), Some(user)) => {
                tracing::info!(login = %user.login, "GitHub sign-in completed");
                Ok(GithubSession { user, access_token })
            }
            _ => Err(GithubError::Rejected(
                "Token exchange returned no token or user".into(),
            )),
        }
    }

    async fn list_repositories(&self, access_token: &str) -> Result<Vec<GithubRepo>, GithubError> {
        let per_page = REPOS_PER_PAGE.to_string();
        let response = self
            .client
            .get(format!(
                "{}/user/repos",
                self.settings.api_url.trim_end_matches('/')
            ))
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .header(reqwest::header::AUTHORIZATION, format!("token {access_token}"))
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let repos: Vec<GithubRepo> = Self::ensure_success(response).await?.json().await?;
        tracing::debug!(count = repos.len(), "Fetched GitHub repositories");
        Ok(repos)
    }
}
