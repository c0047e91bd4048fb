use serde::{Serialize, Deserialize};
use std::fmt;


/// Defines the kind of the prediction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Classification into `n_class` labels `0, 1, ..., n_class - 1`.
    Categorical {
        /// The number of class labels.
        n_class: usize,
    },
    /// Regression.
    Numeric,
}


impl TargetKind {
    /// Returns `true` for a categorical target.
    #[inline(always)]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical { .. })
    }


    /// Returns `true` for a numeric target.
    #[inline(always)]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }


    /// The length of a probability vector for this target,
    /// `n_class` for a categorical target and `1` otherwise.
    #[inline(always)]
    pub fn distribution_len(&self) -> usize {
        match self {
            Self::Categorical { n_class } => *n_class,
            Self::Numeric => 1,
        }
    }
}


impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical { n_class } => {
                write!(f, "categorical ({n_class} classes)")
            },
            Self::Numeric => write!(f, "numeric"),
        }
    }
}


/// Convert a class label into a one-hot vector of length `n_class`.
/// ```text
/// 1, 3 -> [0, 1, 0]
/// ```
#[inline(always)]
pub(crate) fn vectorize(label: usize, n_class: usize) -> Vec<f64> {
    assert!(label < n_class, "label {label} is out of {n_class} classes");
    let mut vec = vec![0f64; n_class];
    vec[label] = 1f64;
    vec
}
