//! Canonical JSON: the one serialization used for digests.
//!
//! Plans, policies, and run reports are rendered to a `serde_json::Value`
//! and then to bytes here before hashing. Rules:
//!
//! - object keys sorted by byte order, at every depth;
//! - compact form, no whitespace;
//! - numbers must be integers (`i64` or `u64`); floats are rejected;
//! - strings escaped as `serde_json` escapes them, non-ASCII passed through.

use std::fmt;

use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Failure to canonicalize a JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A number was not representable as `i64` or `u64`.
    NonIntegerNumber { raw: String },
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Canonical bytes of `value`.
///
/// # Errors
///
/// [`CanonError::NonIntegerNumber`] if any number in `value` is a float.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out.into_bytes())
}

/// Canonical form as a `String`, for logs and golden tests.
///
/// # Errors
///
/// Same as [`canonical_json_bytes`].
pub fn canonical_json_string(value: &serde_json::Value) -> Result<String, CanonError> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Hash the canonical bytes of `value` under `domain`.
///
/// # Errors
///
/// Same as [`canonical_json_bytes`].
pub fn canonical_json_hash(
    domain: HashDomain,
    value: &serde_json::Value,
) -> Result<ContentHash, CanonError> {
    Ok(canonical_hash(domain, &canonical_json_bytes(value)?))
}

fn write_value(out: &mut String, value: &serde_json::Value) -> Result<(), CanonError> {
    use serde_json::Value;

    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.push_str(&i.to_string());
            } else if let Some(u) = n.as_u64() {
                out.push_str(&u.to_string());
            } else {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) {
    out.push_str(&serde_json::Value::from(s).to_string());
}
