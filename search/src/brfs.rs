//! Breadth-first search.
//!
//! BFS is [`graph_search`] over a [`FifoFrontier`]. Under unit action cost the
//! first goal popped is at minimum depth, so returned plans are optimal.
//! Successors are visited in generator order, so the plan is a pure function
//! of the problem, the generator kind, and the policy.

use groundwork_kernel::actions::generator::ApplicableActionGenerator;
use groundwork_kernel::formalism::atom_set::AtomSet;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::state::successor::SuccessorStateGenerator;

use crate::algorithm::{SearchAlgorithm, SearchOutcome};
use crate::error::SearchError;
use crate::event::SearchEventHandler;
use crate::frontier::FifoFrontier;
use crate::policy::SearchPolicyV1;
use crate::search::graph_search;

/// Breadth-first search over borrowed components.
///
/// The state generator, action generator, and handler are borrowed mutably
/// for the lifetime of the search; the problem and factories are shared.
pub struct BreadthFirstSearch<'s, 'a> {
    problem: &'a Problem,
    factories: &'a PddlFactories,
    ssg: &'s mut SuccessorStateGenerator,
    aag: &'s mut (dyn ApplicableActionGenerator + 'a),
    handler: &'s mut dyn SearchEventHandler,
    policy: SearchPolicyV1,
}

impl<'s, 'a> BreadthFirstSearch<'s, 'a> {
    /// Wire up a search with the default (unbounded) policy.
    ///
    /// # Errors
    ///
    /// [`SearchError::MismatchedProblem`] if `aag` was built for a different
    /// problem, or `ssg` does not start from `problem`'s initial state.
    pub fn new(
        problem: &'a Problem,
        factories: &'a PddlFactories,
        ssg: &'s mut SuccessorStateGenerator,
        aag: &'s mut (dyn ApplicableActionGenerator + 'a),
        handler: &'s mut dyn SearchEventHandler,
    ) -> Result<Self, SearchError> {
        if !std::ptr::eq(aag.problem(), problem) {
            return Err(SearchError::MismatchedProblem {
                expected: problem.name().to_string(),
                actual: aag.problem().name().to_string(),
            });
        }
        let initial = AtomSet::from_atoms(problem.initial_atoms().iter().copied());
        if ssg.state(ssg.initial_state()) != &initial {
            return Err(SearchError::MismatchedProblem {
                expected: problem.name().to_string(),
                actual: "successor generator with a different initial state".to_string(),
            });
        }
        Ok(Self {
            problem,
            factories,
            ssg,
            aag,
            handler,
            policy: SearchPolicyV1::default(),
        })
    }

    /// Replace the policy.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if the policy has a zero bound.
    pub fn with_policy(mut self, policy: SearchPolicyV1) -> Result<Self, SearchError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }
}

impl SearchAlgorithm for BreadthFirstSearch<'_, '_> {
    fn find_solution(&mut self) -> SearchOutcome {
        graph_search(
            self.problem,
            self.factories,
            self.ssg,
            &mut *self.aag,
            &mut *self.handler,
            &self.policy,
            FifoFrontier::new(),
        )
    }
}
