use std::fmt;

use crate::common::constants::{PRINT_DECIMALS, PRINT_WIDTH};
use crate::common::format::format_fixed_width;


/// The predicted label of an instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Label {
    /// The index of the predicted class.
    Class(usize),
    /// The predicted value of a numeric target.
    Value(f64),
    /// The ensemble gives no prediction:
    /// the combined distribution is zero at its maximum.
    Missing,
}


impl Label {
    /// Returns the label as `f64`, `NaN` for [`Label::Missing`].
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Class(k) => *k as f64,
            Self::Value(v) => *v,
            Self::Missing => f64::NAN,
        }
    }


    /// Returns `true` for [`Label::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}


impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(k) => write!(f, "{k}"),
            Self::Value(v) => {
                let v = format_fixed_width(*v, PRINT_WIDTH, PRINT_DECIMALS);
                write!(f, "{}", v.trim())
            },
            Self::Missing => write!(f, "?"),
        }
    }
}


/// The output of [`Vote::predict`](super::Vote::predict).
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted label.
    pub label: Label,
    /// The combined distribution the label is read from.
    pub distribution: Vec<f64>,
}
