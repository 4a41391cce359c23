//! Modeling errors.
//!
//! A `ModelError` means the problem or one of its schemas is malformed.
//! These are fatal: they are surfaced at build or generator-construction
//! time and never turned into silently wrong ground actions.

use std::fmt;

/// Typed failure for problem construction and schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A name was declared twice within the same namespace.
    DuplicateName { kind: &'static str, name: String },
    /// A type name was referenced but never declared.
    UnknownType { name: String },
    /// An object or constant name was referenced but never declared.
    UnknownObject { name: String },
    /// A predicate name was referenced but never declared.
    UnknownPredicate { name: String },
    /// A `?name` term does not match any parameter of its schema.
    UnknownParameter { schema: String, name: String },
    /// A term refers to a parameter index past the end of the schema's
    /// parameter list.
    ParameterOutOfRange { schema: String, index: usize },
    /// An atom has the wrong number of arguments for its predicate.
    ArityMismatch {
        predicate: String,
        expected: usize,
        actual: usize,
    },
    /// An argument's type is incompatible with the predicate position.
    TypeMismatch {
        context: String,
        argument: String,
        expected: String,
    },
    /// Negative literals are not allowed in the initial state (closed world).
    NegativeInitialLiteral { atom: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { kind, name } => write!(f, "duplicate {kind} name: {name}"),
            Self::UnknownType { name } => write!(f, "unknown type: {name}"),
            Self::UnknownObject { name } => write!(f, "unknown object: {name}"),
            Self::UnknownPredicate { name } => write!(f, "unknown predicate: {name}"),
            Self::UnknownParameter { schema, name } => {
                write!(f, "schema {schema} has no parameter {name}")
            }
            Self::ParameterOutOfRange { schema, index } => {
                write!(f, "schema {schema} references parameter index {index} out of range")
            }
            Self::ArityMismatch {
                predicate,
                expected,
                actual,
            } => write!(
                f,
                "predicate {predicate} expects {expected} arguments, got {actual}"
            ),
            Self::TypeMismatch {
                context,
                argument,
                expected,
            } => write!(f, "{context}: argument {argument} is not of type {expected}"),
            Self::NegativeInitialLiteral { atom } => {
                write!(f, "negative literal in initial state is not supported: {atom}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
