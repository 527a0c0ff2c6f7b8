//! Execution limits and safeguards
//!
//! Kernels have no cancellation or timeout. These bounds are the only defense
//! against a single row with pathological input dominating a query.

/// Maximum value of `|left| * |right|` (in code points) accepted by
/// `levenshtein_distance`.
///
/// The DP is O(n·m) in time, so this caps the work per row at roughly one
/// million cell updates. Presto uses the same bound.
pub const MAX_LEVENSHTEIN_COMBINED_INPUT_SIZE: usize = 1_000_000;

/// Maximum target size, in characters, accepted by `lpad` and `rpad`
pub const MAX_PAD_SIZE: usize = 1024 * 1024;
