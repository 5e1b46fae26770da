//! Shop directory feature: browsing for everyone, shop management for the
//! barber role.

pub(crate) mod client;
pub(crate) mod types;
