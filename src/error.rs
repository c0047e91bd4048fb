//! Error types of this crate.
use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::capability::Capability;


/// A `Result` type whose error is [`EnsembleError`].
pub type Result<T> = std::result::Result<T, EnsembleError>;


/// Top-level error returned by the ensemble and its collaborators.
#[derive(Debug, Error)]
pub enum EnsembleError {
    /// The ensemble or a base model is configured wrongly.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The training data cannot be handled by the ensemble.
    #[error(transparent)]
    DataIncompatibility(#[from] DataIncompatibility),

    /// A pre-built model could not be read.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A numeric operation met an invalid value.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// A state that must not be reachable was reached.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// A base model was asked to predict before it was trained.
    #[error("{model}: no model built yet")]
    NotTrained {
        /// Name of the model.
        model: String,
    },

    /// An I/O error other than a missing model file.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A failure raised by a user-supplied base model.
    /// It is passed through as is.
    #[error(transparent)]
    Model(Box<dyn Error + Send + Sync>),
}


/// Errors in option tokens, model specifications and ensemble settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The combination rule name is not one of `AVG|PROD|MAJ|MIN|MAX|MED`.
    #[error("unknown combination rule `{0}` (expected AVG|PROD|MAJ|MIN|MAX|MED)")]
    UnknownRule(String),

    /// A dash token that is neither a flag nor a number.
    #[error("illegal option: {0}")]
    MalformedOption(String),

    /// `-X` was given as the last token.
    #[error("no value given for -{0} option")]
    MissingValue(char),

    /// Tokens left over after every known option was extracted.
    #[error("illegal options: {}", .0.join(" "))]
    UnrecognizedOptions(Vec<String>),

    /// The value of an option could not be parsed.
    #[error("invalid value `{value}` for -{flag} option")]
    InvalidValue {
        /// The option letter.
        flag: char,
        /// The rejected value.
        value: String,
    },

    /// A base-model specification names no known model.
    #[error("unknown base model `{0}`")]
    UnknownModel(String),

    /// `${NAME}` refers to a variable that is not set.
    #[error("environment variable `{0}` is not set")]
    UnresolvedVariable(String),

    /// The ensemble would have no member at all.
    #[error("the ensemble has no base model")]
    EmptyEnsemble,
}


/// The training data does not fit the ensemble.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIncompatibility {
    /// The aggregate capabilities reject the data.
    #[error("cannot handle {capability}")]
    Unsupported {
        /// The capability the data requires.
        capability: Capability,
    },

    /// Fewer records than the ensemble needs.
    #[error("not enough training instances: {got} < {required}")]
    TooFewInstances {
        /// The number of usable records.
        got: usize,
        /// The minimum the members need.
        required: usize,
    },

    /// A pre-built model was trained on a differently structured dataset.
    #[error(
        "\"{}\" was trained with data that is of a different structure \
        than the incoming training data",
        path.display()
    )]
    SchemaMismatch {
        /// The model file.
        path: PathBuf,
    },
}


/// A pre-built model file could not be turned into a model.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The path does not resolve to a readable file.
    #[error("\"{}\" does not seem to be a valid file", path.display())]
    FileNotFound {
        /// The resolved path.
        path: PathBuf,
    },

    /// The file does not contain a predictive model.
    #[error("\"{}\" does not contain a model: {reason}", path.display())]
    InvalidModel {
        /// The resolved path.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },
}


/// Numeric failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The sum of a vector to normalize is `NaN`.
    #[error("array contains NaN, can't normalize")]
    NaN,

    /// Normalization by an explicit sum of zero.
    #[error("can't normalize array, sum is zero")]
    ZeroSum,
}


impl EnsembleError {
    /// Wraps an error raised by a user-supplied base model.
    pub fn model<E>(error: E) -> Self
        where E: Into<Box<dyn Error + Send + Sync>>
    {
        Self::Model(error.into())
    }
}
