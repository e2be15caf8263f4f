//! Service layer for business logic and orchestration.
//!
//! Services coordinate the memory tier, the repositories and the upstream clients. The
//! shared retrieval pipeline lives in [`reply`]; [`player`], [`profile`] and [`guild`] build
//! on it, and [`identity`] resolves names to stable IDs for them.

pub mod cache;
pub mod guild;
pub mod identity;
pub mod player;
pub mod profile;
pub mod reply;
