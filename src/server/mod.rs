//! Server application core modules.
//!
//! This module contains the retrieval engine: upstream clients for the game API and the
//! identity service, the persistent tier repositories, the memory tier, the services that
//! tie the tiers together, and the HTTP API exposing them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
