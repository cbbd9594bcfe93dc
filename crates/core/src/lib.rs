//! Domain logic for the community project showcase.
//!
//! Everything in this crate is pure: no store access, no network. The `db`
//! crate persists these types and the `api` crate wires them to HTTP.

pub mod error;
pub mod github;
pub mod member;
pub mod preferences;
pub mod presenter;
pub mod project;
pub mod submission;
pub mod types;
