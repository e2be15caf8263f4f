//! Mimir: remote game-data retrieval and caching engine.
//!
//! Resolves player names to stable identifiers and serves player, profile, and guild
//! records through a memory → persistent store → remote API pipeline.

pub mod model;
pub mod server;
