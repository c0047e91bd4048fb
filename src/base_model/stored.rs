use serde::{Serialize, Deserialize};

use crate::common::options::OptionTokens;
use crate::error::{ConfigurationError, Result};
use super::core::BaseModel;
use super::decision_stump::DecisionStump;
use super::zero_r::ZeroR;


/// A built-in model in a serializable form.
///
/// Pre-built model files store one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoredModel {
    /// See [`ZeroR`].
    ZeroR(ZeroR),
    /// See [`DecisionStump`].
    DecisionStump(DecisionStump),
}


impl StoredModel {
    /// Returns the model as a trait object.
    pub fn into_model(self) -> Box<dyn BaseModel> {
        match self {
            Self::ZeroR(model) => Box::new(model),
            Self::DecisionStump(model) => Box::new(model),
        }
    }
}


impl From<ZeroR> for StoredModel {
    fn from(model: ZeroR) -> Self {
        Self::ZeroR(model)
    }
}


impl From<DecisionStump> for StoredModel {
    fn from(model: DecisionStump) -> Self {
        Self::DecisionStump(model)
    }
}


/// Builds an untrained built-in model from its specification,
/// the model name followed by its options.
///
/// ```
/// use minivote::model_from_spec;
/// let model = model_from_spec("DecisionStump -M 3").unwrap();
/// assert_eq!(model.spec(), "DecisionStump -M 3");
/// assert!(model_from_spec("J48 -C 0.25").is_err());
/// ```
pub fn model_from_spec(spec: &str) -> Result<Box<dyn BaseModel>> {
    let mut words = spec.split_whitespace();
    let name = words.next().unwrap_or_default();
    let mut tokens = OptionTokens::new(words);

    let model: Box<dyn BaseModel> = match name {
        "ZeroR" => Box::new(ZeroR::new()),
        "DecisionStump" => Box::new(DecisionStump::from_options(&mut tokens)?),
        _ => {
            let err = ConfigurationError::UnknownModel(spec.trim().to_string());
            return Err(err.into());
        },
    };
    tokens.reject_remaining()?;
    Ok(model)
}
