//! Server application models and type definitions.
//!
//! Application state, database model type aliases, upstream reply shapes and the cache key
//! and outcome types shared by the retrieval pipeline.

pub mod app;
pub mod db;
pub mod identity;
pub mod payload;
pub mod reply;
