use crate::TestContext;

pub mod data;
pub mod mockito;

impl TestContext {
    pub fn identity<'a>(&'a mut self) -> IdentityFixtures<'a> {
        IdentityFixtures { setup: self }
    }
}

pub struct IdentityFixtures<'a> {
    pub setup: &'a mut TestContext,
}
