use std::path::PathBuf;
use std::time::Duration;

use showcase_remote::github::GithubSettings;
use showcase_remote::membership::MembershipSettings;

/// Default cap on an uploaded project image (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Postgres URL. When set, the store lives in the `kv_store` table.
    pub database_url: Option<String>,
    /// JSON store file used when no database is configured. A corrupt file
    /// stops startup.
    pub store_path: PathBuf,
    /// Largest accepted project image, in bytes.
    pub max_image_bytes: usize,
    /// Remote member table settings.
    pub membership: MembershipSettings,
    /// GitHub API and token-exchange proxy settings.
    pub github: GithubSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                       |
    /// | `DATABASE_URL`            | unset (file store)         |
    /// | `STORE_PATH`              | `data/store.json`          |
    /// | `MAX_IMAGE_BYTES`         | `5242880`                  |
    /// | `MEMBERSHIP_API_URL`      | unset (lookups disabled)   |
    /// | `MEMBERSHIP_API_KEY`      | empty                      |
    /// | `MEMBERSHIP_TABLE`        | `members`                  |
    /// | `MEMBERSHIP_TIMEOUT_SECS` | `15`                       |
    /// | `GITHUB_API_URL`          | `https://api.github.com`   |
    /// | `GITHUB_OAUTH_PROXY_URL`  | `http://localhost:3001`    |
    ///
    /// `STORE_PATH` must hold a JSON object of strings or not exist. Any
    /// other content makes startup fail rather than overwrite the file.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "30")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = optional_env("DATABASE_URL");
        let store_path = PathBuf::from(env_or("STORE_PATH", "data/store.json"));

        let max_image_bytes: usize = env_or("MAX_IMAGE_BYTES", &DEFAULT_MAX_IMAGE_BYTES.to_string())
            .parse()
            .expect("MAX_IMAGE_BYTES must be a valid usize");

        let membership_timeout_secs: u64 = env_or("MEMBERSHIP_TIMEOUT_SECS", "15")
            .parse()
            .expect("MEMBERSHIP_TIMEOUT_SECS must be a valid u64");
        let outbound_timeout = Duration::from_secs(membership_timeout_secs);

        let membership = MembershipSettings {
            base_url: optional_env("MEMBERSHIP_API_URL"),
            api_key: env_or("MEMBERSHIP_API_KEY", ""),
            table: env_or("MEMBERSHIP_TABLE", "members"),
            timeout: outbound_timeout,
        };

        let github = GithubSettings {
            api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
            oauth_proxy_url: env_or("GITHUB_OAUTH_PROXY_URL", "http://localhost:3001"),
            timeout: outbound_timeout,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            store_path,
            max_image_bytes,
            membership,
            github,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

/// A variable that is unset or blank is treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
