//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. The persistent
//! tier of the reply cache lives in [`reply`], name to stable ID mappings in [`identity`].

pub mod identity;
pub mod reply;
