//! Store keys. Each value is a JSON document.

/// The whole project collection, newest first.
pub const PROJECTS: &str = "showcase.projects";
/// Active UI language (`"en"` or `"ar"`).
pub const LANGUAGE: &str = "showcase.language";
/// Active theme (`"light"` or `"dark"`).
pub const THEME: &str = "showcase.theme";
/// Last verified member.
pub const MEMBER: &str = "showcase.member";
/// Signed-in GitHub user and access token.
pub const GITHUB_USER: &str = "showcase.github_user";
/// Importable repositories from the last fetch.
pub const GITHUB_REPOS: &str = "showcase.github_repos";
