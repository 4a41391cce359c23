//! Fixture contract: the minimal trait a planning fixture must implement.
//!
//! Fixtures describe a problem through [`ProblemBuilder`] and nothing else.
//! Grounding, search, replay, and hashing are runner concerns.

use groundwork_kernel::formalism::builder::ProblemBuilder;
use groundwork_kernel::formalism::error::ModelError;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::problem::Problem;

/// What a fixture promises about its search result under an unbounded
/// breadth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Solvable with a shortest plan of this many actions.
    PlanLength(usize),
    /// No goal state is reachable.
    Unsolvable,
}

/// A named planning problem the runner can build and solve.
pub trait FixtureV1 {
    /// Unique fixture identifier (e.g., `"gripper-2"`).
    fn fixture_id(&self) -> String;

    /// PDDL domain name shared by every instance of the fixture family.
    fn domain_name(&self) -> &'static str;

    /// Declare types, objects, predicates, schemas, initial atoms, and goal.
    fn describe(&self, builder: &mut ProblemBuilder);

    /// Expected BFS result, checked by the lock tests.
    fn expectation(&self) -> Expectation;

    /// Intern the fixture into a problem.
    ///
    /// # Errors
    ///
    /// [`ModelError`] if the description is malformed.
    fn build(&self) -> Result<(Problem, PddlFactories), ModelError> {
        let id = self.fixture_id();
        let mut builder = ProblemBuilder::new(self.domain_name(), &id);
        self.describe(&mut builder);
        builder.build()
    }
}
