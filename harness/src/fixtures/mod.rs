//! Planning fixtures for the harness runner.

pub mod blocksworld;
pub mod edge_cases;
pub mod gripper;
pub mod switches;

use crate::contract::FixtureV1;

/// The fixed suite the lock tests and the fixture binary iterate, in a
/// stable order.
#[must_use]
pub fn suite() -> Vec<Box<dyn FixtureV1>> {
    vec![
        Box::new(gripper::Gripper::new(2)),
        Box::new(gripper::Gripper::new(3)),
        Box::new(blocksworld::Blocksworld::new(3)),
        Box::new(switches::Switches::new(3)),
        Box::new(edge_cases::TrivialGoal),
        Box::new(edge_cases::NoActions),
        Box::new(edge_cases::FreeParameters),
        Box::new(edge_cases::AddWins),
        Box::new(edge_cases::Shuttle),
        Box::new(edge_cases::OneStep),
    ]
}

/// Look up a suite fixture by id.
#[must_use]
pub fn by_id(id: &str) -> Option<Box<dyn FixtureV1>> {
    suite().into_iter().find(|f| f.fixture_id() == id)
}
