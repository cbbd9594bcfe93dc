//! Local user session: verified member, display preferences, form mode and
//! GitHub sign-in.
//!
//! Everything except the form mode is mirrored to the store. Setters write
//! to the store first and only change the in-memory value once that
//! succeeds.

use showcase_core::github::{GithubRepo, GithubSession};
use showcase_core::member::Member;
use showcase_core::preferences::Preferences;
use showcase_core::submission::FormMode;
use showcase_core::types::ProjectId;
use showcase_db::repositories::{GithubCacheRepo, MemberRepo, PreferenceRepo};
use showcase_db::{KeyValueStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub member: Option<Member>,
    pub preferences: Preferences,
    pub form: FormMode,
    pub github: Option<GithubSession>,
    pub repos: Vec<GithubRepo>,
}

impl Session {
    /// Restore the session from the store. The form always starts in create mode.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let member = MemberRepo::load(store).await?;
        let preferences = PreferenceRepo::load(store).await?;
        let github = GithubCacheRepo::load_session(store).await?;
        let repos = match github {
            Some(_) => GithubCacheRepo::load_repos(store).await?,
            None => Vec::new(),
        };

        tracing::debug!(
            verified = member.is_some(),
            language = preferences.language.as_str(),
            github = github.is_some(),
            "Loaded session"
        );

        Ok(Self {
            member,
            preferences,
            form: FormMode::Create,
            github,
            repos,
        })
    }

    /// Write every persisted part of the session.
    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        match &self.member {
            Some(member) => MemberRepo::save(store, member).await?,
            None => MemberRepo::clear(store).await?,
        }
        PreferenceRepo::save(store, &self.preferences).await?;
        match &self.github {
            Some(session) => {
                GithubCacheRepo::save_session(store, session).await?;
                GithubCacheRepo::save_repos(store, &self.repos).await
            }
            None => GithubCacheRepo::clear(store).await,
        }
    }

    /// Replace the cached member. `None` signs the member out.
    pub async fn set_member(
        &mut self,
        store: &dyn KeyValueStore,
        member: Option<Member>,
    ) -> Result<(), StoreError> {
        match &member {
            Some(m) => MemberRepo::save(store, m).await?,
            None => MemberRepo::clear(store).await?,
        }
        self.member = member;
        Ok(())
    }

    pub async fn set_preferences(
        &mut self,
        store: &dyn KeyValueStore,
        preferences: Preferences,
    ) -> Result<(), StoreError> {
        PreferenceRepo::save(store, &preferences).await?;
        self.preferences = preferences;
        Ok(())
    }

    /// Replace the GitHub sign-in. Signing in or out drops cached repositories.
    pub async fn set_github(
        &mut self,
        store: &dyn KeyValueStore,
        session: Option<GithubSession>,
    ) -> Result<(), StoreError> {
        GithubCacheRepo::clear(store).await?;
        if let Some(s) = &session {
            GithubCacheRepo::save_session(store, s).await?;
        }
        self.github = session;
        self.repos.clear();
        Ok(())
    }

    pub async fn set_repos(
        &mut self,
        store: &dyn KeyValueStore,
        repos: Vec<GithubRepo>,
    ) -> Result<(), StoreError> {
        GithubCacheRepo::save_repos(store, &repos).await?;
        self.repos = repos;
        Ok(())
    }

    pub fn begin_edit(&mut self, id: ProjectId) {
        self.form = FormMode::Edit(id);
    }

    pub fn reset_form(&mut self) {
        self.form = FormMode::Create;
    }
}
