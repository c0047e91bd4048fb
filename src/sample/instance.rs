use std::ops::Index;


/// One observation: feature values and an optional target.
/// Missing feature values are `NaN`.
///
/// For a categorical target the target is the class index as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    values: Vec<f64>,
    target: Option<f64>,
}


impl Instance {
    /// Construct an unlabeled instance.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, target: None }
    }


    /// Attach a target value.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = if target.is_nan() { None } else { Some(target) };
        self
    }


    /// Returns the feature values.
    pub fn values(&self) -> &[f64] {
        &self.values[..]
    }


    /// Returns the target, if known.
    pub fn target(&self) -> Option<f64> {
        self.target
    }


    /// Returns the number of feature values.
    pub fn len(&self) -> usize {
        self.values.len()
    }


    /// Returns `true` if this instance has no feature.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }


    /// Returns `true` if the `idx`-th value is missing.
    pub fn is_missing(&self, idx: usize) -> bool {
        self.values[idx].is_nan()
    }
}


impl Index<usize> for Instance {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}
