//! Naive reference implementations.
//!
//! - [`brute_force_applicable`] tries every typed binding of every schema
//!   and evaluates preconditions literal by literal.
//! - [`explore`] enumerates the reachable state space layer by layer with
//!   plain hash sets, independent of the search crate.

use std::collections::HashSet;

use groundwork_kernel::actions::generator::{AagKind, ApplicableActionGenerator};
use groundwork_kernel::formalism::atom::{GroundAtomTable, LiftedLiteral};
use groundwork_kernel::formalism::atom_set::AtomSet;
use groundwork_kernel::formalism::describe::Describer;
use groundwork_kernel::formalism::factories::PddlFactories;
use groundwork_kernel::formalism::ids::ObjectId;
use groundwork_kernel::formalism::problem::Problem;
use groundwork_kernel::state::successor::successor_atoms;

/// Does `literal` hold in `state` under `binding`?
///
/// An atom the table never interned cannot be in the state.
fn literal_holds(
    literal: &LiftedLiteral,
    binding: &[ObjectId],
    atoms: &GroundAtomTable,
    state: &AtomSet,
) -> bool {
    let present = atoms
        .get(literal.atom.predicate, &literal.atom.ground_objects(binding))
        .is_some_and(|id| state.contains(id));
    present != literal.negated
}

/// Every binding in the cartesian product of `domains`, odometer order.
fn bindings(domains: &[Vec<ObjectId>]) -> Vec<Vec<ObjectId>> {
    let mut out = vec![Vec::new()];
    for domain in domains {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                domain.iter().map(move |&o| {
                    let mut next = prefix.clone();
                    next.push(o);
                    next
                })
            })
            .collect();
    }
    out
}

/// Applicable ground actions of `state`, rendered and sorted.
///
/// `atoms` must be the table `state` was built against.
#[must_use]
pub fn brute_force_applicable(
    problem: &Problem,
    factories: &PddlFactories,
    atoms: &GroundAtomTable,
    state: &AtomSet,
) -> Vec<String> {
    let describer = Describer::new(factories, atoms);
    let mut out = Vec::new();
    for schema in problem.schemas() {
        let domains: Vec<Vec<ObjectId>> = schema
            .parameters
            .iter()
            .map(|p| factories.objects_of_type(p.type_id))
            .collect();
        for binding in bindings(&domains) {
            if schema
                .precondition
                .iter()
                .all(|l| literal_holds(l, &binding, atoms, state))
            {
                out.push(describer.action(&schema.name, &binding));
            }
        }
    }
    out.sort();
    out
}

/// Applicable actions of `state` according to `aag`, rendered and sorted.
#[must_use]
pub fn generator_applicable(
    problem: &Problem,
    factories: &PddlFactories,
    aag: &mut dyn ApplicableActionGenerator,
    state: &AtomSet,
) -> Vec<String> {
    let mut ids = Vec::new();
    aag.generate_applicable_actions(state, &mut ids);
    let describer = Describer::new(factories, aag.atoms());
    let mut out: Vec<String> = ids
        .iter()
        .map(|&id| aag.action(id).describe(problem, &describer))
        .collect();
    out.sort();
    out
}

/// Goal literals checked directly against an atom set.
#[must_use]
pub fn goal_holds(problem: &Problem, state: &AtomSet) -> bool {
    problem
        .goal()
        .iter()
        .all(|l| state.contains(l.atom) != l.negated)
}

/// Result of [`explore`].
pub struct Exploration<'a> {
    /// The generator whose atom table the states are expressed in.
    pub aag: Box<dyn ApplicableActionGenerator + 'a>,
    /// Distinct states by first depth reached.
    pub layers: Vec<Vec<AtomSet>>,
    /// Depth of the first layer containing a goal state.
    pub goal_depth: Option<usize>,
}

impl Exploration<'_> {
    /// All explored states, shallowest first.
    pub fn states(&self) -> impl Iterator<Item = &AtomSet> {
        self.layers.iter().flatten()
    }
}

/// Enumerate reachable states layer by layer until the space is exhausted
/// or `max_states` states are known.
///
/// # Panics
///
/// Panics if the generator cannot be built.
#[must_use]
pub fn explore<'a>(
    problem: &'a Problem,
    factories: &'a PddlFactories,
    kind: AagKind,
    max_states: usize,
) -> Exploration<'a> {
    let mut aag = kind.build(problem, factories).expect("generator builds");
    let initial = AtomSet::from_atoms(problem.initial_atoms().iter().copied());
    let mut visited: HashSet<AtomSet> = HashSet::from([initial.clone()]);
    let mut goal_depth = goal_holds(problem, &initial).then_some(0);
    let mut layers = vec![vec![initial]];
    let mut ids = Vec::new();

    while visited.len() < max_states {
        let mut next = Vec::new();
        for state in layers.last().expect("at least one layer") {
            aag.generate_applicable_actions(state, &mut ids);
            for &id in &ids {
                let successor = successor_atoms(state, aag.action(id));
                if visited.insert(successor.clone()) {
                    next.push(successor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        if goal_depth.is_none() && next.iter().any(|s| goal_holds(problem, s)) {
            goal_depth = Some(layers.len());
        }
        layers.push(next);
    }

    Exploration {
        aag,
        layers,
        goal_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_odometer_order() {
        let a = ObjectId::new(0);
        let b = ObjectId::new(1);
        let got = bindings(&[vec![a, b], vec![a, b]]);
        assert_eq!(got, vec![vec![a, a], vec![a, b], vec![b, a], vec![b, b]]);
        assert_eq!(bindings(&[]), vec![Vec::<ObjectId>::new()]);
        assert!(bindings(&[vec![a], vec![]]).is_empty());
    }
}
