//! Describes what kind of data a model can handle.
use fixedbitset::FixedBitSet;
use std::fmt;

use crate::common::TargetKind;
use crate::error::DataIncompatibility;
use crate::sample::Sample;


/// A single property of a dataset that a model may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A categorical target (classification).
    CategoricalTarget,
    /// A numeric target (regression).
    NumericTarget,
    /// Numeric feature attributes.
    NumericFeatures,
    /// Categorical feature attributes.
    CategoricalFeatures,
    /// Missing feature values.
    MissingFeatureValues,
}


impl Capability {
    /// Every capability, in bit order.
    pub const ALL: [Capability; 5] = [
        Capability::CategoricalTarget,
        Capability::NumericTarget,
        Capability::NumericFeatures,
        Capability::CategoricalFeatures,
        Capability::MissingFeatureValues,
    ];


    #[inline(always)]
    fn bit(self) -> usize {
        self as usize
    }
}


impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CategoricalTarget => "categorical target",
            Self::NumericTarget => "numeric target",
            Self::NumericFeatures => "numeric features",
            Self::CategoricalFeatures => "categorical features",
            Self::MissingFeatureValues => "missing feature values",
        };
        write!(f, "{name}")
    }
}


/// A set of [`Capability`] plus the minimum number of records
/// a model needs to be trained.
///
/// # Example
/// ```
/// use minivote::{Capabilities, Capability};
/// let a = Capabilities::none()
///     .enable(Capability::CategoricalTarget)
///     .enable(Capability::NumericFeatures);
/// let b = Capabilities::all().min_instances(2);
/// let both = a.and(&b);
/// assert!(both.handles(Capability::NumericFeatures));
/// assert!(!both.handles(Capability::NumericTarget));
/// assert_eq!(both.required_instances(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    bits: FixedBitSet,
    min_instances: usize,
}


impl Capabilities {
    /// A set that handles nothing.
    pub fn none() -> Self {
        let bits = FixedBitSet::with_capacity(Capability::ALL.len());
        Self { bits, min_instances: 0 }
    }


    /// A set that handles everything.
    pub fn all() -> Self {
        let mut bits = FixedBitSet::with_capacity(Capability::ALL.len());
        bits.insert_range(..);
        Self { bits, min_instances: 0 }
    }


    /// Everything except targets other than `target`.
    pub fn for_target(target: TargetKind) -> Self {
        match target {
            TargetKind::Categorical { .. }
                => Self::all().disable(Capability::NumericTarget),
            TargetKind::Numeric
                => Self::all().disable(Capability::CategoricalTarget),
        }
    }


    /// Add `capability` to this set.
    pub fn enable(mut self, capability: Capability) -> Self {
        self.bits.insert(capability.bit());
        self
    }


    /// Remove `capability` from this set.
    pub fn disable(mut self, capability: Capability) -> Self {
        self.bits.set(capability.bit(), false);
        self
    }


    /// Set the minimum number of training records.
    pub fn min_instances(mut self, n: usize) -> Self {
        self.min_instances = n;
        self
    }


    /// Returns the minimum number of training records.
    pub fn required_instances(&self) -> usize {
        self.min_instances
    }


    /// Returns `true` if `capability` is in this set.
    #[inline(always)]
    pub fn handles(&self, capability: Capability) -> bool {
        self.bits.contains(capability.bit())
    }


    /// The intersection of `self` and `other`.
    /// The minimum number of records is the larger of the two.
    pub fn and(&self, other: &Self) -> Self {
        let mut bits = self.bits.clone();
        bits.intersect_with(&other.bits);
        let min_instances = self.min_instances.max(other.min_instances);
        Self { bits, min_instances }
    }


    /// Returns the capabilities `sample` requires, in bit order.
    pub fn required_by(sample: &Sample) -> Vec<Capability> {
        let schema = sample.schema();
        let mut required = Vec::new();

        if schema.target_kind().is_categorical() {
            required.push(Capability::CategoricalTarget);
        } else {
            required.push(Capability::NumericTarget);
        }
        if schema.features().iter().any(|a| a.is_numeric()) {
            required.push(Capability::NumericFeatures);
        }
        if schema.features().iter().any(|a| a.is_categorical()) {
            required.push(Capability::CategoricalFeatures);
        }
        if sample.has_missing_values() {
            required.push(Capability::MissingFeatureValues);
        }
        required
    }


    /// Check whether this set can handle `sample`.
    ///
    /// Fails with the first capability `sample` requires
    /// that is not in this set,
    /// or when `sample` has too few records.
    pub fn test(&self, sample: &Sample) -> Result<(), DataIncompatibility> {
        let missing = Self::required_by(sample)
            .into_iter()
            .find(|&c| !self.handles(c));
        if let Some(capability) = missing {
            return Err(DataIncompatibility::Unsupported { capability });
        }

        let (n_sample, _) = sample.shape();
        if n_sample < self.min_instances {
            return Err(DataIncompatibility::TooFewInstances {
                got: n_sample,
                required: self.min_instances,
            });
        }
        Ok(())
    }
}


impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}


impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Capability::ALL.iter()
            .filter(|&&c| self.handles(c))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        write!(f, "[{}], min. instances: {}", names.join(", "), self.min_instances)
    }
}
