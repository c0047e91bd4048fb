use std::ops::Index;
use std::slice::Iter;

const BUF_SIZE: usize = 256;


/// A dense feature column. Missing values are `NaN`.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature name
    pub(crate) name: String,
    /// Feature values.
    pub(crate) sample: Vec<f64>,
}


impl Feature {
    /// Construct an empty feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            sample: Vec::with_capacity(BUF_SIZE),
        }
    }


    /// Returns the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns an iterator over feature values.
    pub fn iter(&self) -> Iter<'_, f64> {
        self.sample.iter()
    }


    /// Returns the slice of feature values.
    pub fn values(&self) -> &[f64] {
        &self.sample[..]
    }


    /// Append an example to this feature.
    pub fn append(&mut self, x: f64) {
        self.sample.push(x);
    }


    /// Returns the number of items in `self.sample`.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if `self.len()` is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }


    /// Returns `true` if some value is missing.
    pub fn has_missing(&self) -> bool {
        self.sample.iter().any(|x| x.is_nan())
    }


    /// Returns a feature that keeps the rows in `rows`, in that order.
    pub(crate) fn select(&self, rows: &[usize]) -> Self {
        let sample = rows.iter()
            .map(|&i| self.sample[i])
            .collect();
        Self { name: self.name.clone(), sample }
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.sample[idx]
    }
}
