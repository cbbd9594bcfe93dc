//! HTTP clients for the services this application only talks to.
//!
//! - [`membership`]: the remote member table (PostgREST / Supabase REST).
//! - [`github`]: the OAuth token-exchange proxy and the GitHub REST API.
//!
//! Each client sits behind an `async_trait` so the API server can be tested
//! with in-process fakes.

pub mod github;
pub mod membership;
