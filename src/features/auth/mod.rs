//! Auth feature: the session state machine, its Leptos bridge, the route
//! guards, and the endpoint wrappers. The session manager is the only writer
//! of session state and of the persisted token; screens and guards observe.
//! Nothing in here may log credentials or token material.

pub(crate) mod client;
pub(crate) mod guards;
pub(crate) mod session;
pub(crate) mod state;
pub(crate) mod types;

pub(crate) use guards::{RequireBarber, RequireNoSession, RequireSession};
