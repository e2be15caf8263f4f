//! Test harness for the Mimir workspace.
//!
//! Tests are set up in two phases. A [`TestBuilder`] declares tables, identity rows and mock
//! upstream endpoints, then `build()` returns a [`TestContext`] holding an in-memory SQLite
//! database and a mockito server standing in for both the game API and the identity service.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_API_KEY, TEST_USER_AGENT},
        fixtures::game::factory,
        TestBuilder, TestContext, TestError,
    };
}
