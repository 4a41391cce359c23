//! `SuccessorStateGenerator`: apply ground actions and intern the result.
//!
//! Effect semantics for `apply(s, a)`:
//!
//! - the delete list is `a.delete` plus the negated conditional effects whose
//!   condition holds in `s`;
//! - the add list is `a.add` plus the positive conditional effects whose
//!   condition holds in `s`;
//! - `s' = (s - deletes) + adds`, so an atom both added and deleted stays.
//!
//! Conditions are evaluated against the source state only. Preconditions
//! are not re-checked here; that is the generator's job.

use crate::actions::ground::GroundAction;
use crate::formalism::atom::GroundLiteral;
use crate::formalism::atom_set::AtomSet;
use crate::formalism::ids::StateId;
use crate::formalism::problem::Problem;
use crate::proof::hash::ContentHash;
use crate::state::registry::StateRegistry;

/// Owns the state registry for one search.
#[derive(Debug, Clone)]
pub struct SuccessorStateGenerator {
    registry: StateRegistry,
    initial: StateId,
}

impl SuccessorStateGenerator {
    /// Register the initial state of `problem`.
    #[must_use]
    pub fn new(problem: &Problem) -> Self {
        let mut registry = StateRegistry::new();
        let (initial, _) =
            registry.get_or_create(AtomSet::from_atoms(problem.initial_atoms().iter().copied()));
        Self { registry, initial }
    }

    #[must_use]
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Successor of `state` under `action`.
    pub fn apply(&mut self, state: StateId, action: &GroundAction) -> StateId {
        self.apply_tracked(state, action).0
    }

    /// Like [`apply`](Self::apply), also reporting whether the successor was
    /// registered by this call.
    pub fn apply_tracked(&mut self, state: StateId, action: &GroundAction) -> (StateId, bool) {
        let next = successor_atoms(self.registry.state(state), action);
        self.registry.get_or_create(next)
    }

    /// Intern an arbitrary atom set.
    pub fn get_or_create(&mut self, atoms: AtomSet) -> StateId {
        self.registry.get_or_create(atoms).0
    }

    /// Atoms of `id`. Panics on a foreign id.
    #[must_use]
    pub fn state(&self, id: StateId) -> &AtomSet {
        self.registry.state(id)
    }

    /// Every positive goal atom present, every negative one absent.
    #[must_use]
    pub fn is_goal(&self, id: StateId, goal: &[GroundLiteral]) -> bool {
        let atoms = self.registry.state(id);
        goal.iter().all(|l| atoms.contains(l.atom) != l.negated)
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    #[must_use]
    pub fn fingerprint(&self, id: StateId) -> ContentHash {
        self.registry.fingerprint(id)
    }
}

/// `(source - deletes) + adds` with triggered conditional effects folded in.
#[must_use]
pub fn successor_atoms(source: &AtomSet, action: &GroundAction) -> AtomSet {
    let triggered: Vec<&GroundLiteral> = action
        .conditional
        .iter()
        .filter(|c| c.condition.holds(source))
        .map(|c| &c.effect)
        .collect();

    let mut next = source.clone();
    for &atom in &action.delete {
        next.remove(atom);
    }
    for effect in triggered.iter().filter(|e| e.negated) {
        next.remove(effect.atom);
    }
    for &atom in &action.add {
        next.insert(atom);
    }
    for effect in triggered.iter().filter(|e| !e.negated) {
        next.insert(effect.atom);
    }
    next
}
