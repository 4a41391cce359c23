//! Typed domain separators for canonical hashing.
//!
//! Every hash computed by the workspace selects a [`HashDomain`]. The enum,
//! `as_bytes()`, `ALL`, and `Display` come from one macro list, so adding a
//! domain is a one-line change.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Domain separator for [`super::hash::canonical_hash`].
        ///
        /// Each variant maps to a unique, null-terminated prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// Prefix bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domains in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Kernel
    // -----------------------------------------------------------------------

    /// State fingerprint: sorted ground atom ids of one registered state.
    StateFingerprint => b"GROUNDWORK::STATE_FINGERPRINT::V1\0",

    /// Problem identity: canonical JSON of names, initial state, and goal.
    ProblemIdentity => b"GROUNDWORK::PROBLEM_IDENTITY::V1\0",

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Plan digest: canonical JSON of the plan steps.
    Plan => b"GROUNDWORK::PLAN::V1\0",

    /// Search policy snapshot.
    SearchPolicy => b"GROUNDWORK::SEARCH_POLICY::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Run report digest (normative fields only).
    RunReport => b"GROUNDWORK::RUN_REPORT::V1\0",

    // -----------------------------------------------------------------------
    // Benchmarks
    // -----------------------------------------------------------------------

    /// Benchmark determinism guard.
    BenchGuard => b"GROUNDWORK::BENCH_GUARD::V1\0",
}
