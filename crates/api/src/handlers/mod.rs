//! Request handlers.
//!
//! Each submodule serves one resource. Handlers lock what they need from
//! [`AppState`](crate::state::AppState), delegate to the repositories and the
//! form controller, and map errors via [`AppError`](crate::error::AppError).

pub mod form;
pub mod github;
pub mod membership;
pub mod portal;
pub mod preferences;
pub mod projects;
