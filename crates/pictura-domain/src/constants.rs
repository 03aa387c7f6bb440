//! Shared domain constants

/// Default number of results returned by a search when the caller does
/// not specify `k`.
pub const DEFAULT_TOP_K: usize = 5;

/// Tolerance for the unit-norm invariant: every stored or queried vector
/// must satisfy `(l2_norm - 1.0).abs() <= NORM_TOLERANCE`.
pub const NORM_TOLERANCE: f32 = 1e-5;

/// Service identifier reported by the health endpoint.
pub const SERVICE_NAME: &str = "pictura";
