//! Data transfer objects shared by the HTTP API and its callers.

pub mod api;
pub mod game;
