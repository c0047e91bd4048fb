use std::fmt;

use crate::capability::Capabilities;
use crate::common::options::join_options;
use crate::error::{EnsembleError, Result};
use crate::sample::{Instance, Sample};


/// A trait that defines the behavior of a predictive model
/// that can be a member of an ensemble.
///
/// A model returns a *distribution* for each instance:
/// one probability per class for a categorical target,
/// or a single entry holding the predicted value for a numeric target.
///
/// Implementors must be `Send + Sync`
/// so that the ensemble can query its members in parallel.
pub trait BaseModel: Send + Sync {
    /// Returns the name of this model, e.g. `"DecisionStump"`.
    fn name(&self) -> &str;


    /// Returns the option tokens that reproduce this model's settings.
    fn options(&self) -> Vec<String> {
        Vec::new()
    }


    /// Returns the data this model can be trained on.
    fn capabilities(&self) -> Capabilities;


    /// Trains this model on `sample`.
    fn train(&mut self, sample: &Sample) -> Result<()>;


    /// Returns the distribution for `instance`.
    fn distribution(&self, instance: &Instance) -> Result<Vec<f64>>;


    /// Returns the predicted value of `instance` for a numeric target.
    /// By default, this is the first entry of the distribution.
    fn predict_value(&self, instance: &Instance) -> Result<f64> {
        let dist = self.distribution(instance)?;
        dist.first()
            .copied()
            .ok_or_else(|| EnsembleError::InternalInvariant(
                format!("{} returned an empty distribution", self.name())
            ))
    }


    /// Returns the name followed by the options,
    /// in the form accepted by [`model_from_spec`](super::model_from_spec).
    fn spec(&self) -> String {
        let options = self.options();
        if options.is_empty() {
            return self.name().to_string();
        }
        format!("{} {}", self.name(), join_options(options))
    }
}


impl fmt::Debug for dyn BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec())
    }
}
