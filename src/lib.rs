#![warn(missing_docs)]

//! 
//! A crate that combines the predictions of several models.
//! 
//! [`Vote`] holds a fixed set of members,
//! trained in-process from a [`Sample`]
//! or read from files written beforehand,
//! and merges their per-class probability vectors
//! (or scalar predictions for a numeric target)
//! under one of the following [`CombinationRule`]s.
//! 
//! - Average, product, minimum and maximum of probabilities
//!     The members' vectors are combined element-wise.
//! 
//! - Majority voting
//!     Each member votes for its most probable class.
//!     Ties between classes are broken at random,
//!     with a source seeded from the ensemble's configuration,
//!     so a fixed seed gives the same predictions.
//! 
//! - Median
//!     The median of the members' numeric predictions.
//! 
//! # Example
//! ```no_run
//! use minivote::prelude::*;
//! 
//! let sample = SampleReader::new()
//!     .file("/path/to/iris.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()
//!     .unwrap();
//! 
//! let vote = VoteBuilder::new()
//!     .rule(CombinationRule::Average)
//!     .model(DecisionStump::new())
//!     .model(ZeroR::new())
//!     .build(&sample)
//!     .unwrap();
//! 
//! println!("{vote}");
//! let predictions = vote.predict_all(&sample).unwrap();
//! ```

pub mod common;
pub mod error;
pub mod sample;
pub mod capability;
pub mod base_model;
pub mod loader;
pub mod vote;

pub mod prelude;


pub use common::{Environment, OptionTokens, TargetKind};
pub use error::{
    EnsembleError,
    ConfigurationError,
    DataIncompatibility,
    ResourceError,
    ArithmeticError,
    Result,
};

pub use sample::{
    Attribute,
    AttributeKind,
    Feature,
    Instance,
    Sample,
    SampleReader,
    Schema,
};

pub use capability::{Capabilities, Capability};

pub use base_model::{
    BaseModel,
    DecisionStump,
    StoredModel,
    ZeroR,
    model_from_spec,
};

pub use loader::{JsonModelLoader, LoadedModel, ModelLoader, save_model};

pub use vote::{
    CombinationRule,
    Label,
    Prediction,
    Vote,
    VoteBuilder,
};
