//! The files in `vote/` directory defines
//! the ensemble that combines the predictions of its members.

/// Defines the combination rules.
pub mod rule;

/// Defines the builder of `Vote`.
pub mod builder;

/// Defines `Vote`.
pub mod vote_struct;

/// Defines the output of `Vote::predict`.
pub mod prediction;


pub use self::rule::CombinationRule;
pub use self::builder::VoteBuilder;
pub use self::vote_struct::Vote;
pub use self::prediction::{Label, Prediction};
