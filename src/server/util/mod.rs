//! Utility functions and helpers for server operations.
//!
//! Pure helpers used across services: the username validity predicate and freshness window
//! calculations.

pub mod time;
pub mod username;
