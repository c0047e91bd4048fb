use serde::{Serialize, Deserialize};

use crate::capability::Capabilities;
use crate::common::{utils, TargetKind};
use crate::error::{EnsembleError, Result};
use crate::sample::{Instance, Sample};
use super::core::BaseModel;


/// A model that ignores the features.
///
/// For a categorical target it predicts the relative class frequencies
/// of the training records;
/// for a numeric target it predicts their mean.
/// A [`Vote`](crate::Vote) without any configured member uses this model.
///
/// # Example
/// ```
/// use minivote::{Attribute, BaseModel, Instance, Sample, Schema, ZeroR};
/// let schema = Schema::new(
///     vec![Attribute::numeric("x")],
///     Attribute::categorical("class", ["a", "b"]),
/// );
/// let mut sample = Sample::new(schema);
/// sample.push(vec![0.0], Some(0.0));
/// sample.push(vec![1.0], Some(1.0));
/// sample.push(vec![2.0], Some(1.0));
/// sample.push(vec![3.0], Some(1.0));
///
/// let mut model = ZeroR::new();
/// model.train(&sample).unwrap();
/// let dist = model.distribution(&Instance::new(vec![5.0])).unwrap();
/// assert_eq!(dist, vec![0.25, 0.75]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZeroR {
    target: Option<TargetKind>,
    prediction: Vec<f64>,
}


impl ZeroR {
    /// Construct an untrained [`ZeroR`].
    pub fn new() -> Self {
        Self::default()
    }
}


impl BaseModel for ZeroR {
    fn name(&self) -> &str {
        "ZeroR"
    }


    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }


    fn train(&mut self, sample: &Sample) -> Result<()> {
        let sample = sample.remove_missing_target();
        let target = sample.target_kind();

        self.prediction = match target {
            TargetKind::Categorical { .. } => {
                let mut freq = sample.class_counts()
                    .into_iter()
                    .map(|c| c as f64)
                    .collect::<Vec<_>>();
                utils::normalize(&mut freq[..])?;
                freq
            },
            TargetKind::Numeric => vec![utils::mean(sample.target())],
        };
        self.target = Some(target);
        Ok(())
    }


    fn distribution(&self, _instance: &Instance) -> Result<Vec<f64>> {
        if self.target.is_none() {
            return Err(EnsembleError::NotTrained {
                model: self.name().to_string()
            });
        }
        Ok(self.prediction.clone())
    }
}
