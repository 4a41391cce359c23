//! `Problem`: the immutable planning task handed to the search.

use std::collections::BTreeSet;

use crate::formalism::atom::GroundLiteral;
use crate::formalism::error::ModelError;
use crate::formalism::ids::{GroundAtomId, PredicateId, SchemaId};
use crate::formalism::schema::ActionSchema;

/// A planning task: initial atoms, goal, and action schemas.
///
/// Handles inside refer to the `PddlFactories` built alongside it. The
/// problem is read-only for the lifetime of any search over it.
#[derive(Debug, Clone)]
pub struct Problem {
    name: String,
    domain_name: String,
    schemas: Vec<ActionSchema>,
    initial: Vec<GroundAtomId>,
    goal: Vec<GroundLiteral>,
    static_predicates: BTreeSet<PredicateId>,
}

impl Problem {
    /// Assemble a problem from already-interned parts.
    ///
    /// `initial` is sorted and deduplicated. Schema ids are reassigned to
    /// their position in `schemas`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParameterOutOfRange`] if a schema references a
    /// parameter it does not declare.
    pub fn new(
        name: String,
        domain_name: String,
        mut schemas: Vec<ActionSchema>,
        mut initial: Vec<GroundAtomId>,
        goal: Vec<GroundLiteral>,
        predicates: impl IntoIterator<Item = PredicateId>,
    ) -> Result<Self, ModelError> {
        for (i, schema) in schemas.iter_mut().enumerate() {
            schema.id = SchemaId::from_index(i);
            schema.validate()?;
        }
        initial.sort_unstable();
        initial.dedup();

        let affected: BTreeSet<PredicateId> =
            schemas.iter().flat_map(ActionSchema::affected_predicates).collect();
        let static_predicates = predicates
            .into_iter()
            .filter(|p| !affected.contains(p))
            .collect();

        Ok(Self {
            name,
            domain_name,
            schemas,
            initial,
            goal,
            static_predicates,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    #[must_use]
    pub fn schemas(&self) -> &[ActionSchema] {
        &self.schemas
    }

    /// Schema by id. Panics on a foreign id.
    #[must_use]
    pub fn schema(&self, id: SchemaId) -> &ActionSchema {
        &self.schemas[id.index()]
    }

    /// Initial atoms, sorted ascending.
    #[must_use]
    pub fn initial_atoms(&self) -> &[GroundAtomId] {
        &self.initial
    }

    /// Goal conjunction.
    #[must_use]
    pub fn goal(&self) -> &[GroundLiteral] {
        &self.goal
    }

    /// Whether no schema effect mentions `predicate`.
    #[must_use]
    pub fn is_static(&self, predicate: PredicateId) -> bool {
        self.static_predicates.contains(&predicate)
    }

    #[must_use]
    pub fn static_predicates(&self) -> &BTreeSet<PredicateId> {
        &self.static_predicates
    }
}
