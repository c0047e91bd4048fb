//! Constants shared across the crate.

/// Two reals closer than this are considered equal.
pub const NUMERIC_TOLERANCE: f64 = 1e-6;

/// The random seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1;

/// The minimal number of records in a leaf of `DecisionStump`.
pub const DEFAULT_MIN_LEAF: usize = 1;

/// Column width used when printing predictions.
pub const PRINT_WIDTH: usize = 10;

/// Digits after the decimal point used when printing predictions.
pub const PRINT_DECIMALS: u32 = 4;
