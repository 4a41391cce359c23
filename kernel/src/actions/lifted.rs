//! `LiftedAag`: applicable actions by matching schemas against the state.
//!
//! Each schema's precondition is evaluated as a conjunctive query:
//!
//! 1. Positive precondition atoms are joined in a fixed plan order. An atom
//!    sharing the most already-bound parameters goes next; ties go to the
//!    atom introducing fewer new parameters, then to declaration order.
//! 2. Candidates for a join step come only from the state's atoms of that
//!    step's predicate, in ascending atom id order.
//! 3. Free parameters (mentioned by no positive precondition atom) are
//!    enumerated over every object of their declared type, in object id
//!    order, after the join steps.
//! 4. Negative precondition atoms are checked once a binding is complete.
//!    An atom the table has never interned cannot be in the state.
//!
//! Bindings are streamed by an explicit backtracking stack, so nothing is
//! materialized beyond the binding currently being extended. Ground actions
//! are cached by `(schema, binding)`.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::actions::generator::{AagKind, AagStatistics, ApplicableActionGenerator};
use crate::actions::ground::GroundAction;
use crate::formalism::atom::{GroundAtomTable, LiftedAtom, Term};
use crate::formalism::atom_set::AtomSet;
use crate::formalism::error::ModelError;
use crate::formalism::factories::PddlFactories;
use crate::formalism::ids::{GroundActionId, GroundAtomId, ObjectId, PredicateId, SchemaId};
use crate::formalism::problem::Problem;
use crate::formalism::schema::ActionSchema;

// ---------------------------------------------------------------------------
// Per-schema plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SchemaPlan {
    schema: SchemaId,
    arity: usize,
    /// Positive precondition atoms in join order.
    steps: Vec<LiftedAtom>,
    /// Free parameter index and the objects it ranges over.
    free: Vec<(usize, Vec<ObjectId>)>,
    negative: Vec<LiftedAtom>,
    /// `allowed[p][o]`: object `o` is an instance of parameter `p`'s type.
    allowed: Vec<Vec<bool>>,
}

impl SchemaPlan {
    fn new(schema: &ActionSchema, factories: &PddlFactories) -> Self {
        let object_count = factories.objects().len();
        let allowed = schema
            .parameters
            .iter()
            .map(|p| {
                let mut row = vec![false; object_count];
                for o in factories.objects_of_type(p.type_id) {
                    row[o.index()] = true;
                }
                row
            })
            .collect();

        let free = schema
            .free_parameters()
            .into_iter()
            .map(|p| {
                let parameter = &schema.parameters[p];
                let domain = factories.objects_of_type(parameter.type_id);
                tracing::debug!(
                    schema = %schema.name,
                    parameter = %parameter.name,
                    domain = domain.len(),
                    "free parameter enumerated over its type"
                );
                (p, domain)
            })
            .collect();

        Self {
            schema: schema.id,
            arity: schema.arity(),
            steps: join_order(schema.positive_preconditions().map(|l| &l.atom)),
            free,
            negative: schema.negative_preconditions().map(|l| l.atom.clone()).collect(),
            allowed,
        }
    }

    fn levels(&self) -> usize {
        self.steps.len() + self.free.len()
    }

    fn negatives_hold(&self, binding: &[ObjectId], table: &GroundAtomTable, state: &AtomSet) -> bool {
        self.negative.iter().all(|atom| {
            table
                .get(atom.predicate, &atom.ground_objects(binding))
                .map_or(true, |id| !state.contains(id))
        })
    }
}

fn join_order<'s>(atoms: impl Iterator<Item = &'s LiftedAtom>) -> Vec<LiftedAtom> {
    let mut remaining: Vec<&LiftedAtom> = atoms.collect();
    let mut bound: BTreeSet<usize> = BTreeSet::new();
    let mut ordered = Vec::with_capacity(remaining.len());
    while let Some(next) = (0..remaining.len()).min_by_key(|&i| {
        let params: BTreeSet<usize> = remaining[i].parameters().collect();
        let shared = params.iter().filter(|p| bound.contains(p)).count();
        (Reverse(shared), params.len() - shared, i)
    }) {
        let atom = remaining.remove(next);
        bound.extend(atom.parameters());
        ordered.push(atom.clone());
    }
    ordered
}

// ---------------------------------------------------------------------------
// State index and binding enumeration
// ---------------------------------------------------------------------------

/// State atoms grouped by predicate, each group ascending.
struct StateIndex {
    by_predicate: Vec<Vec<GroundAtomId>>,
}

impl StateIndex {
    fn new(state: &AtomSet, table: &GroundAtomTable, predicate_count: usize) -> Self {
        let mut by_predicate = vec![Vec::new(); predicate_count];
        for id in state.iter() {
            let predicate = table.atom(id).predicate;
            if let Some(group) = by_predicate.get_mut(predicate.index()) {
                group.push(id);
            }
        }
        Self { by_predicate }
    }

    fn atoms(&self, predicate: PredicateId) -> &[GroundAtomId] {
        self.by_predicate
            .get(predicate.index())
            .map_or(&[], Vec::as_slice)
    }
}

/// Backtracking cursor over one schema's bindings.
///
/// Level `i < steps.len()` matches join step `i`; the remaining levels bind
/// free parameters. `bound_at[i]` lists the parameters level `i` bound, so
/// they can be released when the level moves to its next candidate.
struct Enumeration {
    binding: Vec<Option<ObjectId>>,
    cursors: Vec<usize>,
    bound_at: Vec<Vec<usize>>,
    depth: usize,
    exhausted: bool,
}

impl Enumeration {
    fn new(plan: &SchemaPlan) -> Self {
        let levels = plan.levels();
        Self {
            binding: vec![None; plan.arity],
            cursors: vec![0; levels],
            bound_at: vec![Vec::new(); levels],
            depth: 0,
            exhausted: false,
        }
    }

    /// Next complete binding, or `None` once exhausted.
    ///
    /// With `state: None` negative preconditions are ignored (relaxed
    /// matching).
    fn next_binding(
        &mut self,
        plan: &SchemaPlan,
        index: &StateIndex,
        table: &GroundAtomTable,
        state: Option<&AtomSet>,
    ) -> Option<Vec<ObjectId>> {
        let levels = plan.levels();
        while !self.exhausted {
            if self.depth == levels {
                let complete = self.binding.iter().copied().collect::<Option<Vec<_>>>();
                if levels == 0 {
                    self.exhausted = true;
                } else {
                    self.depth -= 1;
                }
                let Some(binding) = complete else { continue };
                if state.map_or(true, |s| plan.negatives_hold(&binding, table, s)) {
                    return Some(binding);
                }
                continue;
            }
            if self.advance(plan, index, table) {
                self.depth += 1;
                if self.depth < levels {
                    self.cursors[self.depth] = 0;
                }
            } else if self.depth == 0 {
                self.exhausted = true;
            } else {
                self.depth -= 1;
            }
        }
        None
    }

    /// Move the current level to its next consistent candidate.
    fn advance(&mut self, plan: &SchemaPlan, index: &StateIndex, table: &GroundAtomTable) -> bool {
        let level = self.depth;
        self.release(level);
        if let Some(step) = plan.steps.get(level) {
            let candidates = index.atoms(step.predicate);
            while let Some(&candidate) = candidates.get(self.cursors[level]) {
                self.cursors[level] += 1;
                if self.unify(level, step, &table.atom(candidate).objects, plan) {
                    return true;
                }
            }
            false
        } else {
            let (parameter, domain) = &plan.free[level - plan.steps.len()];
            let Some(&object) = domain.get(self.cursors[level]) else {
                return false;
            };
            self.cursors[level] += 1;
            self.binding[*parameter] = Some(object);
            self.bound_at[level].push(*parameter);
            true
        }
    }

    fn unify(&mut self, level: usize, step: &LiftedAtom, objects: &[ObjectId], plan: &SchemaPlan) -> bool {
        for (term, &object) in step.terms.iter().zip(objects) {
            let consistent = match *term {
                Term::Object(constant) => constant == object,
                Term::Parameter(p) => match self.binding[p] {
                    Some(bound) => bound == object,
                    None => {
                        let allowed = plan.allowed[p].get(object.index()).copied().unwrap_or(false);
                        if allowed {
                            self.binding[p] = Some(object);
                            self.bound_at[level].push(p);
                        }
                        allowed
                    }
                },
            };
            if !consistent {
                self.release(level);
                return false;
            }
        }
        true
    }

    fn release(&mut self, level: usize) {
        for p in self.bound_at[level].drain(..) {
            self.binding[p] = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Lifted applicable-action generator.
pub struct LiftedAag<'a> {
    problem: &'a Problem,
    factories: &'a PddlFactories,
    atoms: GroundAtomTable,
    plans: Vec<SchemaPlan>,
    actions: Vec<GroundAction>,
    cache: HashMap<(SchemaId, Vec<ObjectId>), GroundActionId>,
    statistics: AagStatistics,
}

impl<'a> LiftedAag<'a> {
    /// Build join plans for every schema of `problem`.
    ///
    /// # Errors
    ///
    /// [`ModelError`] if a schema refers to a predicate or object the
    /// factories do not hold, or an atom's arity disagrees with its
    /// predicate.
    pub fn new(problem: &'a Problem, factories: &'a PddlFactories) -> Result<Self, ModelError> {
        for schema in problem.schemas() {
            schema.validate()?;
            check_symbols(schema, factories)?;
        }
        let plans: Vec<SchemaPlan> = problem
            .schemas()
            .iter()
            .map(|s| SchemaPlan::new(s, factories))
            .collect();
        tracing::debug!(
            problem = problem.name(),
            schemas = plans.len(),
            "lifted generator ready"
        );
        Ok(Self {
            problem,
            factories,
            atoms: factories.atoms().clone(),
            plans,
            actions: Vec::new(),
            cache: HashMap::new(),
            statistics: AagStatistics::default(),
        })
    }

    #[must_use]
    pub fn factories(&self) -> &'a PddlFactories {
        self.factories
    }

    /// Ground actions materialized so far, in id order.
    #[must_use]
    pub fn ground_actions(&self) -> &[GroundAction] {
        &self.actions
    }

    /// Cached id for `(schema, binding)`, grounding it on a miss.
    pub fn ground(&mut self, schema: SchemaId, binding: Vec<ObjectId>) -> GroundActionId {
        let key = (schema, binding);
        if let Some(&id) = self.cache.get(&key) {
            self.statistics.cache_hits += 1;
            return id;
        }
        self.statistics.cache_misses += 1;
        let id = GroundActionId::from_index(self.actions.len());
        let action = GroundAction::instantiate(
            id,
            self.problem.schema(schema),
            key.1.clone(),
            &mut self.atoms,
        );
        self.actions.push(action);
        self.cache.insert(key, id);
        id
    }

    /// Ground every binding whose positive preconditions hold in `reached`,
    /// ignoring negative preconditions.
    pub(crate) fn relaxed_actions(&mut self, reached: &AtomSet) -> Vec<GroundActionId> {
        let index = StateIndex::new(reached, &self.atoms, self.factories.predicates().len());
        let mut found = Vec::new();
        for i in 0..self.plans.len() {
            let mut enumeration = Enumeration::new(&self.plans[i]);
            while let Some(binding) =
                enumeration.next_binding(&self.plans[i], &index, &self.atoms, None)
            {
                let schema = self.plans[i].schema;
                found.push(self.ground(schema, binding));
            }
        }
        found
    }
}

fn check_symbols(schema: &ActionSchema, factories: &PddlFactories) -> Result<(), ModelError> {
    let atoms = schema
        .precondition
        .iter()
        .chain(&schema.effect)
        .chain(
            schema
                .conditional_effects
                .iter()
                .flat_map(|c| c.condition.iter().chain(std::iter::once(&c.effect))),
        )
        .map(|l| &l.atom);
    for atom in atoms {
        let Some(predicate) = factories.predicates().get(atom.predicate.index()) else {
            return Err(ModelError::UnknownPredicate {
                name: atom.predicate.to_string(),
            });
        };
        if predicate.arity() != atom.terms.len() {
            return Err(ModelError::ArityMismatch {
                predicate: predicate.name.clone(),
                expected: predicate.arity(),
                actual: atom.terms.len(),
            });
        }
        for term in &atom.terms {
            if let Term::Object(o) = term {
                if o.index() >= factories.objects().len() {
                    return Err(ModelError::UnknownObject { name: o.to_string() });
                }
            }
        }
    }
    Ok(())
}

/// Streaming iterator returned by [`LiftedAag::applicable_actions`].
struct Applicable<'s, 'a> {
    aag: &'s mut LiftedAag<'a>,
    state: &'s AtomSet,
    index: StateIndex,
    schema: usize,
    enumeration: Option<Enumeration>,
}

impl Iterator for Applicable<'_, '_> {
    type Item = GroundActionId;

    fn next(&mut self) -> Option<GroundActionId> {
        while let Some(plan) = self.aag.plans.get(self.schema) {
            let enumeration = self
                .enumeration
                .get_or_insert_with(|| Enumeration::new(plan));
            if let Some(binding) =
                enumeration.next_binding(plan, &self.index, &self.aag.atoms, Some(self.state))
            {
                let schema = plan.schema;
                let id = self.aag.ground(schema, binding);
                self.aag.statistics.applicable_yielded += 1;
                return Some(id);
            }
            self.schema += 1;
            self.enumeration = None;
        }
        None
    }
}

impl ApplicableActionGenerator for LiftedAag<'_> {
    fn applicable_actions<'s>(
        &'s mut self,
        state: &'s AtomSet,
    ) -> Box<dyn Iterator<Item = GroundActionId> + 's> {
        self.statistics.generate_calls += 1;
        let index = StateIndex::new(state, &self.atoms, self.factories.predicates().len());
        Box::new(Applicable {
            aag: self,
            state,
            index,
            schema: 0,
            enumeration: None,
        })
    }

    fn action(&self, id: GroundActionId) -> &GroundAction {
        &self.actions[id.index()]
    }

    fn atoms(&self) -> &GroundAtomTable {
        &self.atoms
    }

    fn problem(&self) -> &Problem {
        self.problem
    }

    fn statistics(&self) -> &AagStatistics {
        &self.statistics
    }

    fn kind(&self) -> AagKind {
        AagKind::Lifted
    }
}
