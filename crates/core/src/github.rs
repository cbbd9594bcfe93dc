//! GitHub repository import.
//!
//! Repositories fetched for the signed-in GitHub user can prefill the
//! submission form. Forks are never offered; the rest are ranked by stars.

use serde::{Deserialize, Serialize};

use crate::submission::FormFields;

/// Profile of the signed-in GitHub user.
///
/// Accepts both GitHub's snake_case payloads and our own camelCase
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "avatar_url")]
    pub avatar_url: Option<String>,
}

impl GithubUser {
    /// Full name when set, otherwise the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}

/// A cached GitHub sign-in: profile plus the access token used for API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubSession {
    pub user: GithubUser,
    pub access_token: String,
}

/// A repository as listed by `GET /user/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRepo {
    pub id: i64,
    pub name: String,
    #[serde(alias = "html_url")]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default, alias = "stargazers_count")]
    pub stargazers_count: u32,
}

/// Drop forks and order by stars, most starred first.
///
/// The sort is stable, so equally starred repositories keep the order
/// GitHub returned them in (most recently updated first).
pub fn importable_repos(repos: Vec<GithubRepo>) -> Vec<GithubRepo> {
    let mut repos: Vec<_> = repos.into_iter().filter(|r| !r.fork).collect();
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos
}

/// Prefill the form from a repository.
///
/// Name, link and description come from the repository. The creator is
/// only filled in when the form does not already have one.
pub fn prefill_from_repo(
    current: &FormFields,
    repo: &GithubRepo,
    user: Option<&GithubUser>,
) -> FormFields {
    let creator_name = if current.creator_name.trim().is_empty() {
        user.map(|u| u.display_name().to_string())
            .unwrap_or_default()
    } else {
        current.creator_name.clone()
    };

    FormFields {
        project_name: repo.name.clone(),
        creator_name,
        project_link: repo.html_url.clone(),
        project_description: repo.description.clone().unwrap_or_default(),
    }
}
