//! `PddlFactories`: the symbol tables a `Problem`'s handles point into.
//!
//! Holds types, objects, predicates, and the ground atoms the problem
//! mentions (initial state and goal). Name lookups go through `BTreeMap`s so
//! any iteration over names is deterministic.

use std::collections::BTreeMap;

use crate::formalism::atom::{GroundAtom, GroundAtomTable};
use crate::formalism::ids::{GroundAtomId, ObjectId, PredicateId, TypeId};
use crate::formalism::symbols::{Object, Predicate, Type};

/// Interned symbol tables for one problem.
#[derive(Debug, Clone)]
pub struct PddlFactories {
    types: Vec<Type>,
    objects: Vec<Object>,
    predicates: Vec<Predicate>,
    atoms: GroundAtomTable,
    type_names: BTreeMap<String, TypeId>,
    object_names: BTreeMap<String, ObjectId>,
    predicate_names: BTreeMap<String, PredicateId>,
}

impl Default for PddlFactories {
    fn default() -> Self {
        Self::new()
    }
}

impl PddlFactories {
    /// Empty tables containing only the root `object` type.
    #[must_use]
    pub fn new() -> Self {
        let mut type_names = BTreeMap::new();
        type_names.insert("object".to_string(), TypeId::OBJECT);
        Self {
            types: vec![Type {
                id: TypeId::OBJECT,
                name: "object".into(),
                parent: None,
            }],
            objects: Vec::new(),
            predicates: Vec::new(),
            atoms: GroundAtomTable::new(),
            type_names,
            object_names: BTreeMap::new(),
            predicate_names: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_type(&mut self, name: &str, parent: TypeId) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.types.push(Type {
            id,
            name: name.to_string(),
            parent: Some(parent),
        });
        self.type_names.insert(name.to_string(), id);
        id
    }

    pub(crate) fn insert_object(&mut self, name: &str, type_id: TypeId) -> ObjectId {
        let id = ObjectId::from_index(self.objects.len());
        self.objects.push(Object {
            id,
            name: name.to_string(),
            type_id,
        });
        self.object_names.insert(name.to_string(), id);
        id
    }

    pub(crate) fn insert_predicate(&mut self, name: &str, parameter_types: Vec<TypeId>) -> PredicateId {
        let id = PredicateId::from_index(self.predicates.len());
        self.predicates.push(Predicate {
            id,
            name: name.to_string(),
            parameter_types,
        });
        self.predicate_names.insert(name.to_string(), id);
        id
    }

    pub(crate) fn atoms_mut(&mut self) -> &mut GroundAtomTable {
        &mut self.atoms
    }

    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    #[must_use]
    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_names.get(name).copied()
    }

    #[must_use]
    pub fn predicate_by_name(&self, name: &str) -> Option<PredicateId> {
        self.predicate_names.get(name).copied()
    }

    /// Type by id. Panics on a foreign id.
    #[must_use]
    pub fn get_type(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    /// Object by id. Panics on a foreign id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    /// Predicate by id. Panics on a foreign id.
    #[must_use]
    pub fn predicate(&self, id: PredicateId) -> &Predicate {
        &self.predicates[id.index()]
    }

    #[must_use]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Ground atoms interned while building the problem.
    #[must_use]
    pub fn atoms(&self) -> &GroundAtomTable {
        &self.atoms
    }

    /// Whether `sub` equals `sup` or inherits from it.
    #[must_use]
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = Some(sub);
        while let Some(t) = current {
            if t == sup {
                return true;
            }
            current = self.types[t.index()].parent;
        }
        false
    }

    /// Whether `object` may bind a parameter of type `type_id`.
    #[must_use]
    pub fn is_instance_of(&self, object: ObjectId, type_id: TypeId) -> bool {
        self.is_subtype(self.objects[object.index()].type_id, type_id)
    }

    /// Objects that are instances of `type_id`, in id order.
    #[must_use]
    pub fn objects_of_type(&self, type_id: TypeId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| self.is_subtype(o.type_id, type_id))
            .map(|o| o.id)
            .collect()
    }

    /// Look up an interned ground atom by names, e.g.
    /// `ground_atom("at", &["ball1", "rooma"])`.
    #[must_use]
    pub fn ground_atom(&self, predicate: &str, objects: &[&str]) -> Option<GroundAtomId> {
        let predicate = self.predicate_by_name(predicate)?;
        let objects = objects
            .iter()
            .map(|n| self.object_by_name(n))
            .collect::<Option<Vec<_>>>()?;
        self.atoms.get(predicate, &objects)
    }

    /// Build a [`GroundAtom`] value by names without interning it.
    #[must_use]
    pub fn make_ground_atom(&self, predicate: &str, objects: &[&str]) -> Option<GroundAtom> {
        let predicate = self.predicate_by_name(predicate)?;
        let objects = objects
            .iter()
            .map(|n| self.object_by_name(n))
            .collect::<Option<Vec<_>>>()?;
        Some(GroundAtom { predicate, objects })
    }
}
