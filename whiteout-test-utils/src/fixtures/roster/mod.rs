use crate::TestContext;

pub mod data;
pub mod factory;

impl TestContext {
    pub fn roster<'a>(&'a mut self) -> RosterFixtures<'a> {
        RosterFixtures { setup: self }
    }
}

pub struct RosterFixtures<'a> {
    pub setup: &'a mut TestContext,
}
