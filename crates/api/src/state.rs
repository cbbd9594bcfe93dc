use std::sync::Arc;

use showcase_db::repositories::ProjectRepo;
use showcase_db::{KeyValueStore, StoreError};
use showcase_remote::github::GithubApi;
use showcase_remote::membership::MembershipLookup;
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::session::Session;
use crate::verification::VerificationGate;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
///
/// Handlers that need both the project collection and the session must
/// lock `projects` before `session`.
#[derive(Clone)]
pub struct AppState {
    /// Key/value persistence backend.
    pub store: Arc<dyn KeyValueStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project collection, mirrored to the store.
    pub projects: Arc<Mutex<ProjectRepo>>,
    /// Member, preferences, form mode and GitHub sign-in.
    pub session: Arc<Mutex<Session>>,
    /// Remote member table.
    pub membership: Arc<dyn MembershipLookup>,
    /// GitHub API and token-exchange proxy.
    pub github: Arc<dyn GithubApi>,
    /// Single-flight guard for membership verification.
    pub verification: Arc<VerificationGate>,
}

impl AppState {
    /// Load the project collection and session from `store`.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        config: ServerConfig,
        membership: Arc<dyn MembershipLookup>,
        github: Arc<dyn GithubApi>,
    ) -> Result<Self, StoreError> {
        let projects = ProjectRepo::load(Arc::clone(&store)).await?;
        let session = Session::load(store.as_ref()).await?;

        Ok(Self {
            store,
            config: Arc::new(config),
            projects: Arc::new(Mutex::new(projects)),
            session: Arc::new(Mutex::new(session)),
            membership,
            github,
            verification: Arc::new(VerificationGate::new()),
        })
    }
}
