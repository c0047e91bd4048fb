//! Defines some common functions used in this library.

/// Constants shared across the crate.
pub mod constants;

/// Defines the numeric primitives such as tolerance comparisons,
/// stable sorting, selection, normalization and entropy.
pub mod utils;

/// Defines fixed-precision number rendering.
pub mod format;

/// Defines the option-token grammar.
pub mod options;

/// Defines environment-variable substitution.
pub mod environment;

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines the kind of prediction targets.
pub(crate) mod task;

pub use task::TargetKind;
pub use options::OptionTokens;
pub use environment::Environment;
