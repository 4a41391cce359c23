//! Action schemas: parameterized action templates.

use std::collections::BTreeSet;

use crate::formalism::atom::LiftedLiteral;
use crate::formalism::error::ModelError;
use crate::formalism::ids::{PredicateId, SchemaId, TypeId};

/// A typed schema parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Name including the leading `?`.
    pub name: String,
    pub type_id: TypeId,
}

/// `when (condition) (effect)`: fires only if `condition` holds in the
/// state the action is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalEffect {
    pub condition: Vec<LiftedLiteral>,
    pub effect: LiftedLiteral,
}

/// A parameterized action template. Immutable once built.
///
/// - `precondition`: conjunction of literals; negated literals require the
///   atom to be absent.
/// - `effect`: non-negated literals are add-effects, negated ones are
///   delete-effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    pub id: SchemaId,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub precondition: Vec<LiftedLiteral>,
    pub effect: Vec<LiftedLiteral>,
    pub conditional_effects: Vec<ConditionalEffect>,
}

impl ActionSchema {
    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn positive_preconditions(&self) -> impl Iterator<Item = &LiftedLiteral> {
        self.precondition.iter().filter(|l| !l.negated)
    }

    pub fn negative_preconditions(&self) -> impl Iterator<Item = &LiftedLiteral> {
        self.precondition.iter().filter(|l| l.negated)
    }

    /// Parameters that no positive precondition atom mentions, ascending.
    ///
    /// These cannot be bound by matching against the state and are
    /// enumerated over their type's objects instead.
    #[must_use]
    pub fn free_parameters(&self) -> Vec<usize> {
        let bound: BTreeSet<usize> = self
            .positive_preconditions()
            .flat_map(|l| l.atom.parameters())
            .collect();
        (0..self.arity()).filter(|p| !bound.contains(p)).collect()
    }

    /// Predicates this schema can change (unconditional and conditional).
    pub fn affected_predicates(&self) -> impl Iterator<Item = PredicateId> + '_ {
        self.effect
            .iter()
            .chain(self.conditional_effects.iter().map(|c| &c.effect))
            .map(|l| l.atom.predicate)
    }

    /// Check that every parameter reference is inside the parameter list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParameterOutOfRange`] for the first offending
    /// term.
    pub fn validate(&self) -> Result<(), ModelError> {
        let literals = self
            .precondition
            .iter()
            .chain(self.effect.iter())
            .chain(
                self.conditional_effects
                    .iter()
                    .flat_map(|c| c.condition.iter().chain(std::iter::once(&c.effect))),
            );
        for literal in literals {
            if let Some(index) = literal.atom.parameters().find(|&p| p >= self.arity()) {
                return Err(ModelError::ParameterOutOfRange {
                    schema: self.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}
