//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::error::{EnsembleError, Result};


/// Check whether a record has as many values as the schema has features.
#[inline(always)]
pub(crate) fn check_width(n_feature: usize, n_values: usize) {
    assert_eq!(
        n_feature, n_values,
        "A record must have {n_feature} feature values, got {n_values}"
    );
}


/// Check whether a base model returned a vector of the expected length.
#[inline(always)]
pub(crate) fn check_distribution(model: &str, dist: &[f64], expected: usize)
    -> Result<()>
{
    if dist.len() != expected {
        let message = format!(
            "{model} returned {} values, expected {expected}",
            dist.len()
        );
        return Err(EnsembleError::InternalInvariant(message));
    }
    Ok(())
}


/// Check whether a class label fits in `n_class` labels.
#[inline(always)]
pub(crate) fn check_label(label: f64, n_class: usize) {
    assert!(
        label >= 0f64 && label.fract() == 0f64 && (label as usize) < n_class,
        "class label {label} is not in 0..{n_class}"
    );
}
