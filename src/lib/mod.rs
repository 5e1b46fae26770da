//! Shared frontend utilities: API access, configuration, errors, and the
//! durable token store.
//!
//! The [`api::ApiClient`] is the only path to the backend. It injects the
//! session token as a bearer header on every call and funnels every 401
//! through the session-invalidation callback, which keeps the auth state
//! machine in `features::auth` honest no matter which feature made the call.

pub(crate) mod api;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod storage;

/// Short git SHA stamped by `build.rs`, shown in the footer.
pub(crate) const GIT_COMMIT_HASH: &str = env!("NAAI_WEB_GIT_SHA");

pub(crate) use api::ApiClient;
pub(crate) use errors::AppError;
