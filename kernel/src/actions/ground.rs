//! `GroundAction`: a schema instantiated with a full parameter binding.
//!
//! Preconditions and effects are materialized as ground atom id lists once,
//! when the binding is first grounded, and reused for every later state.

use crate::formalism::atom::{GroundAtomTable, GroundLiteral, LiftedAtom, LiftedLiteral, Literal};
use crate::formalism::atom_set::AtomSet;
use crate::formalism::describe::Describer;
use crate::formalism::ids::{GroundActionId, GroundAtomId, ObjectId, SchemaId};
use crate::formalism::problem::Problem;
use crate::formalism::schema::ActionSchema;

/// Conjunction of ground literals split by polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundCondition {
    pub positive: Vec<GroundAtomId>,
    pub negative: Vec<GroundAtomId>,
}

impl GroundCondition {
    /// Closed-world evaluation: absent atoms are false.
    #[must_use]
    pub fn holds(&self, state: &AtomSet) -> bool {
        self.positive.iter().all(|&a| state.contains(a))
            && self.negative.iter().all(|&a| !state.contains(a))
    }
}

/// A grounded `when` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundConditionalEffect {
    pub condition: GroundCondition,
    pub effect: GroundLiteral,
}

/// An action schema with every parameter bound to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundAction {
    pub id: GroundActionId,
    pub schema: SchemaId,
    /// `binding[i]` is the object bound to parameter `i`.
    pub binding: Vec<ObjectId>,
    pub precondition: GroundCondition,
    pub add: Vec<GroundAtomId>,
    pub delete: Vec<GroundAtomId>,
    pub conditional: Vec<GroundConditionalEffect>,
    /// Unit cost for every action.
    pub cost: u64,
}

impl GroundAction {
    /// Ground `schema` under `binding`, interning every atom it mentions.
    ///
    /// `binding` must have one object per schema parameter.
    #[must_use]
    pub fn instantiate(
        id: GroundActionId,
        schema: &ActionSchema,
        binding: Vec<ObjectId>,
        atoms: &mut GroundAtomTable,
    ) -> Self {
        debug_assert_eq!(binding.len(), schema.arity());
        let precondition = ground_condition(&schema.precondition, &binding, atoms);

        let mut add = Vec::new();
        let mut delete = Vec::new();
        for literal in &schema.effect {
            let atom = intern(&literal.atom, &binding, atoms);
            if literal.negated {
                delete.push(atom);
            } else {
                add.push(atom);
            }
        }

        let conditional = schema
            .conditional_effects
            .iter()
            .map(|c| GroundConditionalEffect {
                condition: ground_condition(&c.condition, &binding, atoms),
                effect: Literal {
                    atom: intern(&c.effect.atom, &binding, atoms),
                    negated: c.effect.negated,
                },
            })
            .collect();

        Self {
            id,
            schema: schema.id,
            binding,
            precondition,
            add,
            delete,
            conditional,
            cost: 1,
        }
    }

    #[must_use]
    pub fn is_applicable(&self, state: &AtomSet) -> bool {
        self.precondition.holds(state)
    }

    /// Schema name.
    #[must_use]
    pub fn name<'p>(&self, problem: &'p Problem) -> &'p str {
        &problem.schema(self.schema).name
    }

    /// `(pick ball1 rooma left)`
    #[must_use]
    pub fn describe(&self, problem: &Problem, describer: &Describer<'_>) -> String {
        describer.action(self.name(problem), &self.binding)
    }
}

fn intern(atom: &LiftedAtom, binding: &[ObjectId], atoms: &mut GroundAtomTable) -> GroundAtomId {
    atoms.get_or_create(atom.predicate, atom.ground_objects(binding))
}

fn ground_condition(
    literals: &[LiftedLiteral],
    binding: &[ObjectId],
    atoms: &mut GroundAtomTable,
) -> GroundCondition {
    let mut condition = GroundCondition::default();
    for literal in literals {
        let atom = intern(&literal.atom, binding, atoms);
        if literal.negated {
            condition.negative.push(atom);
        } else {
            condition.positive.push(atom);
        }
    }
    condition
}
