//! Canonicalization and hash governance locks.
//!
//! - STATE-CANON: equal atom sets intern to one id; distinct sets never
//!   share one.
//! - JSON-CANON: key order and construction order never change digests.
//! - HASH-DOMAIN-LOCK: domain set, uniqueness, null termination, naming.
//! - ONE-HASHER: no domain literal or digest constructor outside `proof/`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use groundwork_harness::contract::FixtureV1;
use groundwork_harness::fixtures::gripper::Gripper;
use groundwork_kernel::actions::generator::AagKind;
use groundwork_kernel::formalism::atom_set::AtomSet;
use groundwork_kernel::formalism::ids::GroundAtomId;
use groundwork_kernel::proof::canon::{canonical_json_bytes, canonical_json_hash};
use groundwork_kernel::proof::hash_domain::HashDomain;
use groundwork_kernel::state::registry::StateRegistry;
use groundwork_kernel::state::successor::SuccessorStateGenerator;
use lock_tests::oracle::explore;

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}

fn set(ids: &[u32]) -> AtomSet {
    ids.iter().map(|&i| GroundAtomId::new(i)).collect()
}

// ---------------------------------------------------------------------------
// State canonicalization
// ---------------------------------------------------------------------------

/// ACCEPTANCE: STATE-CANON
#[test]
fn equal_sets_share_an_id() {
    let mut registry = StateRegistry::new();
    let (a, created) = registry.get_or_create(set(&[3, 1, 200]));
    assert!(created);
    let (b, created) = registry.get_or_create(set(&[200, 3, 1, 3]));
    assert!(!created);
    assert_eq!(a, b);

    // Removing the high atom must not leave a distinguishable trailing word.
    let mut shrunk = set(&[1, 3, 200]);
    shrunk.remove(GroundAtomId::new(200));
    let (c, _) = registry.get_or_create(shrunk);
    let (d, _) = registry.get_or_create(set(&[1, 3]));
    assert_eq!(c, d);
    assert_ne!(a, c);
}

/// ACCEPTANCE: STATE-CANON
#[test]
fn reachable_states_intern_bijectively() {
    let (problem, factories) = Gripper::new(3).build().unwrap();
    let exploration = explore(&problem, &factories, AagKind::Lifted, usize::MAX);
    let mut ssg = SuccessorStateGenerator::new(&problem);

    let ids: Vec<_> = exploration.states().map(|s| ssg.get_or_create(s.clone())).collect();
    let distinct: BTreeSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());
    assert_eq!(ssg.state_count(), ids.len());

    for (state, &id) in exploration.states().zip(&ids) {
        assert_eq!(ssg.get_or_create(state.clone()), id);
        assert_eq!(ssg.state(id), state);
    }
    assert_eq!(ids[0], ssg.initial_state());
}

#[test]
fn fingerprints_follow_content_not_id() {
    let (problem, _) = Gripper::new(2).build().unwrap();
    let mut left = SuccessorStateGenerator::new(&problem);
    let mut right = SuccessorStateGenerator::new(&problem);
    right.get_or_create(set(&[0]));
    let l = left.get_or_create(set(&[0, 1]));
    let r = right.get_or_create(set(&[1, 0]));
    assert_ne!(l, r);
    assert_eq!(left.fingerprint(l), right.fingerprint(r));
    assert_ne!(left.fingerprint(l), left.fingerprint(left.initial_state()));
}

// ---------------------------------------------------------------------------
// Canonical JSON
// ---------------------------------------------------------------------------

/// ACCEPTANCE: JSON-CANON
#[test]
fn key_order_does_not_change_bytes() {
    let a: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":{"z":[1,2],"y":null}}"#).unwrap();
    let b: serde_json::Value = serde_json::from_str(r#"{"a":{"y":null,"z":[1,2]},"b":1}"#).unwrap();
    assert_eq!(canonical_json_bytes(&a).unwrap(), canonical_json_bytes(&b).unwrap());
    assert_eq!(
        String::from_utf8(canonical_json_bytes(&a).unwrap()).unwrap(),
        r#"{"a":{"y":null,"z":[1,2]},"b":1}"#
    );
    assert_ne!(
        canonical_json_hash(HashDomain::Plan, &a).unwrap(),
        canonical_json_hash(HashDomain::RunReport, &a).unwrap()
    );
}

#[test]
fn floats_are_rejected() {
    let v = serde_json::json!({ "x": 0.5 });
    assert!(canonical_json_bytes(&v).is_err());
}

// ---------------------------------------------------------------------------
// Hash domains
// ---------------------------------------------------------------------------

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_canonical_set() {
    assert_eq!(
        HashDomain::ALL.len(),
        6,
        "expected 6 domain variants; if you added a new domain, update this count"
    );
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(seen.insert(bytes), "duplicate domain bytes: {domain}");
        assert_eq!(bytes.last(), Some(&0), "{domain} is not null-terminated");
        let text = std::str::from_utf8(&bytes[..bytes.len() - 1]).unwrap();
        assert!(
            text.starts_with("GROUNDWORK::") && text.ends_with("::V1"),
            "{domain} breaks the GROUNDWORK::*::V1 convention: {text}"
        );
    }
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// ACCEPTANCE: ONE-HASHER
#[test]
fn no_domain_literals_or_digests_outside_proof() {
    let mut files = Vec::new();
    for crate_dir in ["kernel/src", "search/src", "harness/src"] {
        rust_files(&workspace_root().join(crate_dir), &mut files);
    }
    assert!(!files.is_empty());

    let domain_literal = concat!("GROUNDWORK", "::");
    let digest_ctor = concat!("Sha256", "::new");
    for file in files {
        let in_proof = file.components().any(|c| c.as_os_str() == "proof");
        if in_proof {
            continue;
        }
        let text = fs::read_to_string(&file).unwrap();
        assert!(
            !text.contains(domain_literal),
            "{} contains a raw hash domain literal",
            file.display()
        );
        assert!(
            !text.contains(digest_ctor),
            "{} constructs a digest directly",
            file.display()
        );
    }
}
