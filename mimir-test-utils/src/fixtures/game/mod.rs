use crate::TestContext;

pub mod data;
pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn game<'a>(&'a mut self) -> GameFixtures<'a> {
        GameFixtures { setup: self }
    }
}

pub struct GameFixtures<'a> {
    pub setup: &'a mut TestContext,
}
