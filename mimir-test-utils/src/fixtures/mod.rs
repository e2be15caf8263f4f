//! Test fixture modules for database rows and HTTP mock endpoints.
//!
//! - `game` - Game API reply bodies, endpoints and persisted reply rows
//! - `identity` - Identity service endpoints and persisted name mappings

pub mod game;
pub mod identity;
