//! Project showcase API server library.
//!
//! Exposes the core building blocks (config, state, session, error handling,
//! routes) so integration tests and the binary entrypoint can both access
//! them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
pub mod submission;
pub mod upload;
pub mod verification;
