//! Domain-level frontend features (auth, shops) and their shared logic.
//! Routes import these modules to keep view code focused while session and
//! API handling stay in dedicated feature areas.

pub(crate) mod auth;
pub(crate) mod shops;
