//! Programmatic problem construction.
//!
//! `ProblemBuilder` stands in for a PDDL front end: declarations are recorded
//! by name and resolved in one pass by [`ProblemBuilder::build`], which
//! interns every symbol and ground atom into a fresh [`PddlFactories`] and
//! returns the matching [`Problem`].
//!
//! Resolution order is types, objects, predicates, schemas, initial state,
//! goal. A type's parent must be declared before it.
//!
//! Term syntax: an argument starting with `?` names a schema parameter;
//! anything else names an object (domain constant or problem object).

use std::collections::BTreeSet;

use crate::formalism::atom::{GroundLiteral, LiftedAtom, LiftedLiteral, Literal, Term};
use crate::formalism::error::ModelError;
use crate::formalism::factories::PddlFactories;
use crate::formalism::ids::{GroundAtomId, ObjectId, PredicateId, SchemaId, TypeId};
use crate::formalism::problem::Problem;
use crate::formalism::schema::{ActionSchema, ConditionalEffect, Parameter};

/// An unresolved literal: predicate name, argument names, polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLiteral {
    pub predicate: String,
    pub arguments: Vec<String>,
    pub negated: bool,
}

impl RawLiteral {
    #[must_use]
    pub fn pos(predicate: &str, arguments: &[&str]) -> Self {
        Self {
            predicate: predicate.to_string(),
            arguments: arguments.iter().map(ToString::to_string).collect(),
            negated: false,
        }
    }

    #[must_use]
    pub fn neg(predicate: &str, arguments: &[&str]) -> Self {
        Self {
            negated: true,
            ..Self::pos(predicate, arguments)
        }
    }

    fn render(&self) -> String {
        let inner = if self.arguments.is_empty() {
            format!("({})", self.predicate)
        } else {
            format!("({} {})", self.predicate, self.arguments.join(" "))
        };
        if self.negated {
            format!("(not {inner})")
        } else {
            inner
        }
    }
}

/// Unresolved action schema, built by chaining.
///
/// ```ignore
/// SchemaBuilder::new("move")
///     .parameter("?from", "room")
///     .parameter("?to", "room")
///     .precondition("at-robby", &["?from"])
///     .add_effect("at-robby", &["?to"])
///     .delete_effect("at-robby", &["?from"])
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    parameters: Vec<(String, String)>,
    precondition: Vec<RawLiteral>,
    effect: Vec<RawLiteral>,
    conditional: Vec<(Vec<RawLiteral>, RawLiteral)>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            precondition: Vec::new(),
            effect: Vec::new(),
            conditional: Vec::new(),
        }
    }

    /// Declare a parameter. `name` includes the leading `?`.
    #[must_use]
    pub fn parameter(mut self, name: &str, type_name: &str) -> Self {
        self.parameters.push((name.to_string(), type_name.to_string()));
        self
    }

    #[must_use]
    pub fn precondition(mut self, predicate: &str, arguments: &[&str]) -> Self {
        self.precondition.push(RawLiteral::pos(predicate, arguments));
        self
    }

    #[must_use]
    pub fn precondition_not(mut self, predicate: &str, arguments: &[&str]) -> Self {
        self.precondition.push(RawLiteral::neg(predicate, arguments));
        self
    }

    #[must_use]
    pub fn add_effect(mut self, predicate: &str, arguments: &[&str]) -> Self {
        self.effect.push(RawLiteral::pos(predicate, arguments));
        self
    }

    #[must_use]
    pub fn delete_effect(mut self, predicate: &str, arguments: &[&str]) -> Self {
        self.effect.push(RawLiteral::neg(predicate, arguments));
        self
    }

    /// `when (and condition...) effect`.
    #[must_use]
    pub fn when(mut self, condition: Vec<RawLiteral>, effect: RawLiteral) -> Self {
        self.conditional.push((condition, effect));
        self
    }
}

/// Records declarations by name; [`build`](Self::build) resolves them.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    domain_name: String,
    problem_name: String,
    types: Vec<(String, Option<String>)>,
    objects: Vec<(String, String)>,
    predicates: Vec<(String, Vec<String>)>,
    schemas: Vec<SchemaBuilder>,
    initial: Vec<RawLiteral>,
    goal: Vec<RawLiteral>,
}

impl ProblemBuilder {
    #[must_use]
    pub fn new(domain_name: &str, problem_name: &str) -> Self {
        Self {
            domain_name: domain_name.to_string(),
            problem_name: problem_name.to_string(),
            types: Vec::new(),
            objects: Vec::new(),
            predicates: Vec::new(),
            schemas: Vec::new(),
            initial: Vec::new(),
            goal: Vec::new(),
        }
    }

    /// Declare a type. `parent: None` means `object`.
    pub fn add_type(&mut self, name: &str, parent: Option<&str>) -> &mut Self {
        self.types.push((name.to_string(), parent.map(ToString::to_string)));
        self
    }

    /// Declare a domain constant. Constants share the object namespace.
    pub fn add_constant(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.add_object(name, type_name)
    }

    /// Declare a problem object.
    pub fn add_object(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.objects.push((name.to_string(), type_name.to_string()));
        self
    }

    /// Declare several objects of one type.
    pub fn add_objects(&mut self, names: &[&str], type_name: &str) -> &mut Self {
        for name in names {
            self.add_object(name, type_name);
        }
        self
    }

    /// Declare a predicate with per-position parameter types.
    pub fn add_predicate(&mut self, name: &str, parameter_types: &[&str]) -> &mut Self {
        self.predicates.push((
            name.to_string(),
            parameter_types.iter().map(ToString::to_string).collect(),
        ));
        self
    }

    pub fn add_schema(&mut self, schema: SchemaBuilder) -> &mut Self {
        self.schemas.push(schema);
        self
    }

    pub fn add_initial(&mut self, predicate: &str, arguments: &[&str]) -> &mut Self {
        self.initial.push(RawLiteral::pos(predicate, arguments));
        self
    }

    /// Rejected by `build`: the initial state is closed-world.
    pub fn add_initial_negated(&mut self, predicate: &str, arguments: &[&str]) -> &mut Self {
        self.initial.push(RawLiteral::neg(predicate, arguments));
        self
    }

    pub fn add_goal(&mut self, predicate: &str, arguments: &[&str]) -> &mut Self {
        self.goal.push(RawLiteral::pos(predicate, arguments));
        self
    }

    pub fn add_goal_negated(&mut self, predicate: &str, arguments: &[&str]) -> &mut Self {
        self.goal.push(RawLiteral::neg(predicate, arguments));
        self
    }

    /// Resolve all declarations.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found: duplicate or unknown names,
    /// arity or type mismatches, unknown schema parameters, or a negative
    /// literal in the initial state.
    pub fn build(&self) -> Result<(Problem, PddlFactories), ModelError> {
        let mut factories = PddlFactories::new();

        for (name, parent) in &self.types {
            if factories.type_by_name(name).is_some() {
                return Err(duplicate("type", name));
            }
            let parent = match parent {
                None => TypeId::OBJECT,
                Some(p) => resolve_type(&factories, p)?,
            };
            factories.insert_type(name, parent);
        }

        for (name, type_name) in &self.objects {
            if factories.object_by_name(name).is_some() {
                return Err(duplicate("object", name));
            }
            let type_id = resolve_type(&factories, type_name)?;
            factories.insert_object(name, type_id);
        }

        let mut predicate_ids = Vec::with_capacity(self.predicates.len());
        for (name, types) in &self.predicates {
            if factories.predicate_by_name(name).is_some() {
                return Err(duplicate("predicate", name));
            }
            let types = types
                .iter()
                .map(|t| resolve_type(&factories, t))
                .collect::<Result<Vec<_>, _>>()?;
            predicate_ids.push(factories.insert_predicate(name, types));
        }

        let mut schema_names = BTreeSet::new();
        let mut schemas = Vec::with_capacity(self.schemas.len());
        for (i, raw) in self.schemas.iter().enumerate() {
            if !schema_names.insert(raw.name.as_str()) {
                return Err(duplicate("schema", &raw.name));
            }
            schemas.push(resolve_schema(&factories, raw, SchemaId::from_index(i))?);
        }

        let mut initial: Vec<GroundAtomId> = Vec::with_capacity(self.initial.len());
        for literal in &self.initial {
            if literal.negated {
                return Err(ModelError::NegativeInitialLiteral {
                    atom: literal.render(),
                });
            }
            initial.push(resolve_ground(&mut factories, literal)?.atom);
        }

        let goal = self
            .goal
            .iter()
            .map(|l| resolve_ground(&mut factories, l))
            .collect::<Result<Vec<_>, _>>()?;

        let problem = Problem::new(
            self.problem_name.clone(),
            self.domain_name.clone(),
            schemas,
            initial,
            goal,
            predicate_ids,
        )?;
        tracing::debug!(
            problem = problem.name(),
            objects = factories.objects().len(),
            predicates = factories.predicates().len(),
            schemas = problem.schemas().len(),
            atoms = factories.atoms().len(),
            "problem built"
        );
        Ok((problem, factories))
    }
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

fn duplicate(kind: &'static str, name: &str) -> ModelError {
    ModelError::DuplicateName {
        kind,
        name: name.to_string(),
    }
}

fn resolve_type(factories: &PddlFactories, name: &str) -> Result<TypeId, ModelError> {
    factories
        .type_by_name(name)
        .ok_or_else(|| ModelError::UnknownType {
            name: name.to_string(),
        })
}

fn resolve_object(factories: &PddlFactories, name: &str) -> Result<ObjectId, ModelError> {
    factories
        .object_by_name(name)
        .ok_or_else(|| ModelError::UnknownObject {
            name: name.to_string(),
        })
}

/// Look up the predicate and check the argument count.
fn resolve_predicate(
    factories: &PddlFactories,
    literal: &RawLiteral,
) -> Result<PredicateId, ModelError> {
    let id = factories
        .predicate_by_name(&literal.predicate)
        .ok_or_else(|| ModelError::UnknownPredicate {
            name: literal.predicate.clone(),
        })?;
    let expected = factories.predicate(id).arity();
    if expected != literal.arguments.len() {
        return Err(ModelError::ArityMismatch {
            predicate: literal.predicate.clone(),
            expected,
            actual: literal.arguments.len(),
        });
    }
    Ok(id)
}

fn type_mismatch(
    factories: &PddlFactories,
    context: &str,
    argument: &str,
    expected: TypeId,
) -> ModelError {
    ModelError::TypeMismatch {
        context: context.to_string(),
        argument: argument.to_string(),
        expected: factories.get_type(expected).name.clone(),
    }
}

fn resolve_ground(
    factories: &mut PddlFactories,
    literal: &RawLiteral,
) -> Result<GroundLiteral, ModelError> {
    let predicate = resolve_predicate(factories, literal)?;
    let mut objects = Vec::with_capacity(literal.arguments.len());
    for (position, name) in literal.arguments.iter().enumerate() {
        let object = resolve_object(factories, name)?;
        let expected = factories.predicate(predicate).parameter_types[position];
        if !factories.is_instance_of(object, expected) {
            return Err(type_mismatch(factories, &literal.render(), name, expected));
        }
        objects.push(object);
    }
    let atom = factories.atoms_mut().get_or_create(predicate, objects);
    Ok(Literal {
        atom,
        negated: literal.negated,
    })
}

fn resolve_schema(
    factories: &PddlFactories,
    raw: &SchemaBuilder,
    id: SchemaId,
) -> Result<ActionSchema, ModelError> {
    let mut parameters: Vec<Parameter> = Vec::with_capacity(raw.parameters.len());
    for (name, type_name) in &raw.parameters {
        if parameters.iter().any(|p| &p.name == name) {
            return Err(duplicate("parameter", name));
        }
        parameters.push(Parameter {
            name: name.clone(),
            type_id: resolve_type(factories, type_name)?,
        });
    }

    let lift = |literal: &RawLiteral| resolve_lifted(factories, &raw.name, &parameters, literal);

    let precondition = raw.precondition.iter().map(&lift).collect::<Result<_, _>>()?;
    let effect = raw.effect.iter().map(&lift).collect::<Result<_, _>>()?;
    let conditional_effects = raw
        .conditional
        .iter()
        .map(|(condition, effect)| -> Result<ConditionalEffect, ModelError> {
            Ok(ConditionalEffect {
                condition: condition.iter().map(&lift).collect::<Result<_, _>>()?,
                effect: lift(effect)?,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(ActionSchema {
        id,
        name: raw.name.clone(),
        parameters,
        precondition,
        effect,
        conditional_effects,
    })
}

/// Parameters type-check if either type subsumes the other: the binding's
/// objects are later filtered by the parameter type, so an overlap is enough.
fn resolve_lifted(
    factories: &PddlFactories,
    schema: &str,
    parameters: &[Parameter],
    literal: &RawLiteral,
) -> Result<LiftedLiteral, ModelError> {
    let predicate = resolve_predicate(factories, literal)?;
    let context = format!("{schema}: {}", literal.render());
    let mut terms = Vec::with_capacity(literal.arguments.len());
    for (position, name) in literal.arguments.iter().enumerate() {
        let expected = factories.predicate(predicate).parameter_types[position];
        if name.starts_with('?') {
            let index = parameters
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| ModelError::UnknownParameter {
                    schema: schema.to_string(),
                    name: name.clone(),
                })?;
            let declared = parameters[index].type_id;
            if !factories.is_subtype(declared, expected) && !factories.is_subtype(expected, declared) {
                return Err(type_mismatch(factories, &context, name, expected));
            }
            terms.push(Term::Parameter(index));
        } else {
            let object = resolve_object(factories, name)?;
            if !factories.is_instance_of(object, expected) {
                return Err(type_mismatch(factories, &context, name, expected));
            }
            terms.push(Term::Object(object));
        }
    }
    Ok(Literal {
        atom: LiftedAtom::new(predicate, terms),
        negated: literal.negated,
    })
}
