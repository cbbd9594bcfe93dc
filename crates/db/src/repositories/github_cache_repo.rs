//! Repository for the GitHub sign-in and fetched repositories.

use showcase_core::github::{GithubRepo, GithubSession};

use crate::keys;
use crate::store::{read_json, write_json, KeyValueStore, StoreError};

/// Caches the GitHub session and the last repository listing.
pub struct GithubCacheRepo;

impl GithubCacheRepo {
    pub async fn load_session(
        store: &dyn KeyValueStore,
    ) -> Result<Option<GithubSession>, StoreError> {
        read_json(store, keys::GITHUB_USER).await
    }

    pub async fn save_session(
        store: &dyn KeyValueStore,
        session: &GithubSession,
    ) -> Result<(), StoreError> {
        write_json(store, keys::GITHUB_USER, session).await
    }

    pub async fn load_repos(store: &dyn KeyValueStore) -> Result<Vec<GithubRepo>, StoreError> {
        Ok(read_json(store, keys::GITHUB_REPOS)
            .await?
            .unwrap_or_default())
    }

    pub async fn save_repos(
        store: &dyn KeyValueStore,
        repos: &[GithubRepo],
    ) -> Result<(), StoreError> {
        write_json(store, keys::GITHUB_REPOS, repos).await
    }

    /// Forget the sign-in and every cached repository.
    pub async fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(keys::GITHUB_USER).await?;
        store.remove(keys::GITHUB_REPOS).await
    }
}
