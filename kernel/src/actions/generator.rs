//! The applicable-action generator contract and its variant selector.

use std::fmt;

use crate::actions::ground::GroundAction;
use crate::actions::grounded::GroundedAag;
use crate::actions::lifted::LiftedAag;
use crate::formalism::atom::GroundAtomTable;
use crate::formalism::atom_set::AtomSet;
use crate::formalism::error::ModelError;
use crate::formalism::factories::PddlFactories;
use crate::formalism::ids::GroundActionId;
use crate::formalism::problem::Problem;

/// Counters kept by every generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AagStatistics {
    /// Calls to `applicable_actions`.
    pub generate_calls: u64,
    /// Applicable actions yielded across all calls.
    pub applicable_yielded: u64,
    /// Bindings found in the grounding cache.
    pub cache_hits: u64,
    /// Bindings grounded for the first time.
    pub cache_misses: u64,
}

impl AagStatistics {
    /// Distinct ground actions materialized so far.
    #[must_use]
    pub fn ground_actions(&self) -> u64 {
        self.cache_misses
    }
}

/// Produces the ground actions applicable in a state.
///
/// Implementations own their ground actions and an extension of the
/// factories' atom table; ids they hand out are valid only against them.
pub trait ApplicableActionGenerator {
    /// Applicable actions in `state`, streamed lazily.
    ///
    /// The order is deterministic for a fixed state and generator history.
    fn applicable_actions<'s>(
        &'s mut self,
        state: &'s AtomSet,
    ) -> Box<dyn Iterator<Item = GroundActionId> + 's>;

    /// Collect every applicable action into `out`, clearing it first.
    fn generate_applicable_actions(&mut self, state: &AtomSet, out: &mut Vec<GroundActionId>) {
        out.clear();
        out.extend(self.applicable_actions(state));
    }

    /// Ground action by id. Panics on a foreign id.
    fn action(&self, id: GroundActionId) -> &GroundAction;

    /// Atom table backing every id this generator produced.
    fn atoms(&self) -> &GroundAtomTable;

    /// The problem this generator grounds.
    fn problem(&self) -> &Problem;

    fn statistics(&self) -> &AagStatistics;

    fn kind(&self) -> AagKind;
}

/// Grounding strategy, chosen when the generator is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AagKind {
    /// Match schemas against each state on demand.
    #[default]
    Lifted,
    /// Precompute delete-relaxed reachable actions, then filter per state.
    Grounded,
}

impl AagKind {
    /// Build the selected generator.
    ///
    /// # Errors
    ///
    /// [`ModelError`] if the problem refers to symbols the factories do not
    /// hold.
    pub fn build<'a>(
        self,
        problem: &'a Problem,
        factories: &'a PddlFactories,
    ) -> Result<Box<dyn ApplicableActionGenerator + 'a>, ModelError> {
        Ok(match self {
            Self::Lifted => Box::new(LiftedAag::new(problem, factories)?),
            Self::Grounded => Box::new(GroundedAag::new(problem, factories)?),
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lifted => "lifted",
            Self::Grounded => "grounded",
        }
    }
}

impl fmt::Display for AagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
