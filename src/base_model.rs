//! The files in `base_model/` directory defines
//! `BaseModel` trait and the built-in models.

/// Provides BaseModel trait.
pub mod core;

/// Defines the majority-class (mean) predictor.
pub mod zero_r;

/// Defines the one-level decision tree.
pub mod decision_stump;

/// Defines the serializable form of the built-in models.
pub mod stored;


pub use self::core::BaseModel;
pub use self::zero_r::ZeroR;
pub use self::decision_stump::DecisionStump;
pub use self::stored::{StoredModel, model_from_spec};
