//! `GroundedAag`: precompute reachable ground actions, filter per state.
//!
//! Construction runs the lifted matcher to a fixpoint over the
//! delete-relaxed atom set: starting from the initial atoms, every action
//! whose positive preconditions hold is grounded and its add effects
//! (conditional ones included) join the set. Negative preconditions and
//! delete effects are ignored, so the result over-approximates every action
//! that can ever be applicable.

use crate::actions::generator::{AagKind, AagStatistics, ApplicableActionGenerator};
use crate::actions::ground::GroundAction;
use crate::actions::lifted::LiftedAag;
use crate::formalism::atom::GroundAtomTable;
use crate::formalism::atom_set::AtomSet;
use crate::formalism::error::ModelError;
use crate::formalism::factories::PddlFactories;
use crate::formalism::ids::GroundActionId;
use crate::formalism::problem::Problem;

/// Grounded applicable-action generator.
pub struct GroundedAag<'a> {
    lifted: LiftedAag<'a>,
    /// Relaxed-reachable actions, ascending.
    reachable: Vec<GroundActionId>,
    statistics: AagStatistics,
}

impl<'a> GroundedAag<'a> {
    /// Ground the relaxed-reachable actions of `problem`.
    ///
    /// # Errors
    ///
    /// Same as [`LiftedAag::new`].
    pub fn new(problem: &'a Problem, factories: &'a PddlFactories) -> Result<Self, ModelError> {
        let mut lifted = LiftedAag::new(problem, factories)?;
        let mut reached = AtomSet::from_atoms(problem.initial_atoms().iter().copied());
        let mut rounds = 0u32;
        loop {
            rounds += 1;
            let before = reached.len();
            for id in lifted.relaxed_actions(&reached) {
                let action = lifted.action(id);
                let conditional_adds = action
                    .conditional
                    .iter()
                    .filter(|c| !c.effect.negated)
                    .map(|c| c.effect.atom);
                for atom in action.add.iter().copied().chain(conditional_adds) {
                    reached.insert(atom);
                }
            }
            if reached.len() == before {
                break;
            }
        }

        let reachable: Vec<GroundActionId> = lifted
            .ground_actions()
            .iter()
            .map(|a| a.id)
            .collect();
        let statistics = AagStatistics {
            cache_misses: lifted.statistics().cache_misses,
            ..AagStatistics::default()
        };
        tracing::debug!(
            problem = problem.name(),
            rounds,
            actions = reachable.len(),
            relaxed_atoms = reached.len(),
            "grounded generator ready"
        );
        Ok(Self {
            lifted,
            reachable,
            statistics,
        })
    }

    /// Every relaxed-reachable ground action, in id order.
    #[must_use]
    pub fn reachable_actions(&self) -> &[GroundActionId] {
        &self.reachable
    }
}

impl ApplicableActionGenerator for GroundedAag<'_> {
    fn applicable_actions<'s>(
        &'s mut self,
        state: &'s AtomSet,
    ) -> Box<dyn Iterator<Item = GroundActionId> + 's> {
        let Self {
            lifted,
            reachable,
            statistics,
        } = self;
        statistics.generate_calls += 1;
        let lifted: &LiftedAag<'_> = lifted;
        Box::new(reachable.iter().copied().filter(move |&id| {
            let applicable = lifted.action(id).is_applicable(state);
            if applicable {
                statistics.applicable_yielded += 1;
            }
            applicable
        }))
    }

    fn action(&self, id: GroundActionId) -> &GroundAction {
        self.lifted.action(id)
    }

    fn atoms(&self) -> &GroundAtomTable {
        self.lifted.atoms()
    }

    fn problem(&self) -> &Problem {
        self.lifted.problem()
    }

    fn statistics(&self) -> &AagStatistics {
        &self.statistics
    }

    fn kind(&self) -> AagKind {
        AagKind::Grounded
    }
}
