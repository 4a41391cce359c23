//! PDDL-style rendering of atoms, states, and actions for logs and plans.

use crate::formalism::atom::{GroundAtom, GroundAtomTable, GroundLiteral};
use crate::formalism::atom_set::AtomSet;
use crate::formalism::factories::PddlFactories;
use crate::formalism::ids::{GroundAtomId, ObjectId, TypeId};
use crate::formalism::problem::Problem;

/// Renders handles back to names.
///
/// `atoms` must be the table the rendered ids came from; during a search
/// that is the generator's table, which extends the factories' one.
#[derive(Debug, Clone, Copy)]
pub struct Describer<'a> {
    factories: &'a PddlFactories,
    atoms: &'a GroundAtomTable,
}

impl<'a> Describer<'a> {
    #[must_use]
    pub fn new(factories: &'a PddlFactories, atoms: &'a GroundAtomTable) -> Self {
        Self { factories, atoms }
    }

    /// Describer over the factories' own atom table.
    #[must_use]
    pub fn for_factories(factories: &'a PddlFactories) -> Self {
        Self::new(factories, factories.atoms())
    }

    #[must_use]
    pub fn factories(&self) -> &'a PddlFactories {
        self.factories
    }

    /// `(at ball1 rooma)`
    #[must_use]
    pub fn ground_atom(&self, atom: &GroundAtom) -> String {
        let name = &self.factories.predicate(atom.predicate).name;
        self.call(name, &atom.objects)
    }

    #[must_use]
    pub fn atom(&self, id: GroundAtomId) -> String {
        self.ground_atom(self.atoms.atom(id))
    }

    /// `(not (at ball1 rooma))` for negated literals.
    #[must_use]
    pub fn literal(&self, literal: &GroundLiteral) -> String {
        let atom = self.atom(literal.atom);
        if literal.negated {
            format!("(not {atom})")
        } else {
            atom
        }
    }

    /// Atoms in id order, space separated, in braces.
    #[must_use]
    pub fn state(&self, state: &AtomSet) -> String {
        let atoms: Vec<String> = state.iter().map(|a| self.atom(a)).collect();
        format!("{{{}}}", atoms.join(" "))
    }

    /// `(pick ball1 rooma left)`
    #[must_use]
    pub fn action(&self, name: &str, arguments: &[ObjectId]) -> String {
        self.call(name, arguments)
    }

    /// Object names for `objects`, in order.
    #[must_use]
    pub fn object_names(&self, objects: &[ObjectId]) -> Vec<String> {
        objects
            .iter()
            .map(|&o| self.factories.object(o).name.clone())
            .collect()
    }

    /// Name-based identity of `problem` for digests.
    ///
    /// Every list is sorted by its rendered text, so the value does not
    /// depend on the order the problem was built in.
    #[must_use]
    pub fn problem_json(&self, problem: &Problem) -> serde_json::Value {
        let type_name = |t: TypeId| self.factories.get_type(t).name.clone();
        let mut objects: Vec<String> = self
            .factories
            .objects()
            .iter()
            .map(|o| format!("{} - {}", o.name, type_name(o.type_id)))
            .collect();
        objects.sort();
        let mut schemas: Vec<serde_json::Value> = problem
            .schemas()
            .iter()
            .map(|s| {
                let parameters: Vec<String> = s
                    .parameters
                    .iter()
                    .map(|p| format!("{} - {}", p.name, type_name(p.type_id)))
                    .collect();
                serde_json::json!({ "name": s.name, "parameters": parameters })
            })
            .collect();
        schemas.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
        let mut initial: Vec<String> = problem.initial_atoms().iter().map(|&a| self.atom(a)).collect();
        initial.sort();
        let mut goal: Vec<String> = problem.goal().iter().map(|l| self.literal(l)).collect();
        goal.sort();
        serde_json::json!({
            "domain": problem.domain_name(),
            "problem": problem.name(),
            "objects": objects,
            "schemas": schemas,
            "initial": initial,
            "goal": goal,
        })
    }

    fn call(&self, head: &str, objects: &[ObjectId]) -> String {
        let mut out = format!("({head}");
        for &o in objects {
            out.push(' ');
            out.push_str(&self.factories.object(o).name);
        }
        out.push(')');
        out
    }
}
