//! Repository layer.
//!
//! `ProjectRepo` holds the collection in memory and mirrors it to the store.
//! The remaining repositories are zero-sized structs with async methods that
//! accept the store as the first argument.

pub mod github_cache_repo;
pub mod member_repo;
pub mod preference_repo;
pub mod project_repo;

pub use github_cache_repo::GithubCacheRepo;
pub use member_repo::MemberRepo;
pub use preference_repo::PreferenceRepo;
pub use project_repo::{AddOutcome, ProjectRepo};
