//! Exports the ensemble, the built-in models and the traits.
//! 
pub use crate::vote::{
    CombinationRule,
    Vote,
    VoteBuilder,
    Label,
    Prediction,
};


pub use crate::base_model::{
    // Base model trait
    BaseModel,

    // Built-in models
    ZeroR,
    DecisionStump,
};


pub use crate::loader::{
    ModelLoader,
    JsonModelLoader,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    Instance,
    Schema,
    Attribute,
};


pub use crate::common::Environment;
