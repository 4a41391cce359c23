//! Search policy types.

use std::time::Duration;

use groundwork_kernel::proof::canon::{canonical_json_hash, CanonError};
use groundwork_kernel::proof::hash::ContentHash;
use groundwork_kernel::proof::hash_domain::HashDomain;

use crate::error::SearchError;

/// Resource bounds and duplicate handling for one search.
///
/// Every bound is optional; `None` means unbounded. Bounds are checked
/// before each expansion, so a search stops cooperatively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions.
    pub max_expansions: Option<u64>,
    /// Hard cap on generated successors.
    pub max_generated: Option<u64>,
    /// Nodes at this depth are not expanded.
    pub max_depth: Option<u32>,
    /// Wall-clock budget.
    pub max_time: Option<Duration>,
    /// Which successors are suppressed as duplicates.
    pub dedup: DedupPolicyV1,
}

impl SearchPolicyV1 {
    /// Reject bounds that would stop a search before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion or
    /// generation budget, or a zero time budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.max_generated == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_generated must be at least 1".into(),
            });
        }
        if self.max_time == Some(Duration::ZERO) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_time must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Canonical JSON snapshot. Absent bounds are `null`; time is in
    /// milliseconds.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "schema_version": "search_policy.v1",
            "max_expansions": self.max_expansions,
            "max_generated": self.max_generated,
            "max_depth": self.max_depth,
            "max_time_ms": self
                .max_time
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "dedup": self.dedup.as_str(),
        })
    }

    /// Content hash of [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// [`CanonError`] if the snapshot holds a non-integer number.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::SearchPolicy, &self.to_json())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_generated: None,
            max_depth: None,
            max_time: None,
            dedup: DedupPolicyV1::Seen,
        }
    }
}

/// Which successors are dropped before they reach the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DedupPolicyV1 {
    /// Drop successors already expanded. A state may sit in the frontier
    /// several times; later copies are skipped when popped.
    ClosedOnly,
    /// Drop successors already generated in this search (expanded or
    /// queued). Each state enters the frontier at most once.
    #[default]
    Seen,
}

impl DedupPolicyV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClosedOnly => "closed_only",
            Self::Seen => "seen",
        }
    }
}

/// The bound that stopped an `OutOfResources` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLimitV1 {
    Expansions,
    Generated,
    Depth,
    Time,
}

impl ResourceLimitV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expansions => "expansions",
            Self::Generated => "generated",
            Self::Depth => "depth",
            Self::Time => "time",
        }
    }
}
