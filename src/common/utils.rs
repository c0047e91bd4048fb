//! This file provides the numeric primitives
//! shared by the combiner and the built-in models.
//!
//! Every comparison of two predicted values goes through
//! the tolerance comparisons below,
//! so that near-equal values are treated as equal consistently
//! in sorting, run grouping and vote counting.
use crate::common::constants::NUMERIC_TOLERANCE;
use crate::error::ArithmeticError;


/// Returns `true` if `a` and `b` differ by less than the tolerance.
#[inline(always)]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b < NUMERIC_TOLERANCE) && (b - a < NUMERIC_TOLERANCE)
}


/// Returns `true` if `a` is smaller than or tolerance-equal to `b`.
#[inline(always)]
pub fn approx_le(a: f64, b: f64) -> bool {
    a - b < NUMERIC_TOLERANCE
}


/// Returns `true` if `a` is greater than or tolerance-equal to `b`.
#[inline(always)]
pub fn approx_ge(a: f64, b: f64) -> bool {
    b - a < NUMERIC_TOLERANCE
}


/// Returns `true` if `a` is smaller than `b` by more than the tolerance.
#[inline(always)]
pub fn approx_lt(a: f64, b: f64) -> bool {
    b - a > NUMERIC_TOLERANCE
}


/// Returns `true` if `a` is greater than `b` by more than the tolerance.
#[inline(always)]
pub fn approx_gt(a: f64, b: f64) -> bool {
    a - b > NUMERIC_TOLERANCE
}


/// Returns the permutation of indices that sorts `values` ascending.
/// `values` itself is never moved.
///
/// The sort is stable under tolerance-equality:
/// indices whose values are tolerance-equal
/// keep their original relative order.
///
/// ```
/// use minivote::common::utils::stable_sort;
/// let order = stable_sort(&[3.0, 1.0, 1.0000001, 2.0]);
/// assert_eq!(order, vec![1, 2, 3, 0]);
/// ```
///
/// `NaN` sorts as the largest finite value,
/// so it comes after every finite value and before `+inf`.
pub fn stable_sort(values: &[f64]) -> Vec<usize> {
    let n_values = values.len();
    let mut index = (0..n_values).collect::<Vec<usize>>();
    if n_values < 2 { return index; }

    let keys = sort_keys(values);
    quick_sort(&keys[..], &mut index[..], 0, n_values as isize - 1);

    // Restore the input order among each run of tolerance-equal values.
    let mut i = 0;
    while i < n_values {
        let head = keys[index[i]];
        let run = 1 + index[i + 1..].iter()
            .take_while(|&&k| same_key(head, keys[k]))
            .count();
        if run > 1 {
            index[i..i + run].sort_unstable();
        }
        i += run;
    }
    index
}


/// Maps `NaN` to `f64::MAX` so that every key is ordered.
#[inline(always)]
fn sort_keys(values: &[f64]) -> Vec<f64> {
    values.iter()
        .map(|&v| if v.is_nan() { f64::MAX } else { v })
        .collect()
}


/// Tolerance-equality that also holds between equal infinities.
#[inline(always)]
fn same_key(a: f64, b: f64) -> bool {
    a == b || approx_eq(a, b)
}


/// Partition-based sort of `index[lo0..=hi0]` by the values it addresses.
fn quick_sort(values: &[f64], index: &mut [usize], lo0: isize, hi0: isize) {
    if hi0 <= lo0 { return; }

    let (lo, hi) = partition(values, index, lo0, hi0);

    if lo0 < hi { quick_sort(values, index, lo0, hi); }
    if lo < hi0 { quick_sort(values, index, lo, hi0); }
}


/// Partitions `index[lo0..=hi0]` around its middle entry.
/// On return, entries in `lo0..=hi` are not greater than the pivot,
/// entries in `lo..=hi0` are not smaller,
/// and entries strictly between `hi` and `lo` are tolerance-equal to it.
fn partition(values: &[f64], index: &mut [usize], lo0: isize, hi0: isize)
    -> (isize, isize)
{
    let (mut lo, mut hi) = (lo0, hi0);

    let mid = values[index[((lo0 + hi0) / 2) as usize]];
    let mid_minus = mid - NUMERIC_TOLERANCE;
    let mid_plus  = mid + NUMERIC_TOLERANCE;

    while lo <= hi {
        while values[index[lo as usize]] < mid_minus && lo < hi0 {
            lo += 1;
        }
        while values[index[hi as usize]] > mid_plus && hi > lo0 {
            hi -= 1;
        }
        if lo <= hi {
            index.swap(lo as usize, hi as usize);
            lo += 1;
            hi -= 1;
        }
    }
    (lo, hi)
}


/// Returns the value at sorted rank `k` (0-based) of `values`,
/// ordered as in [`stable_sort`].
/// Only the part of the ordering that contains rank `k` is computed.
///
/// # Panics
/// Panics if `k >= values.len()`.
pub fn select_kth(values: &[f64], k: usize) -> f64 {
    assert!(
        k < values.len(),
        "rank {k} is out of range for {} values", values.len()
    );

    let keys = sort_keys(values);
    let mut index = (0..values.len()).collect::<Vec<usize>>();
    let target = k as isize;
    let (mut lo0, mut hi0) = (0_isize, values.len() as isize - 1);

    while lo0 < hi0 {
        let (lo, hi) = partition(&keys[..], &mut index[..], lo0, hi0);
        if target <= hi {
            hi0 = hi;
        } else if target >= lo {
            lo0 = lo;
        } else {
            break;
        }
    }
    values[index[k]]
}


/// Computes the sum of `values`.
#[inline(always)]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum::<f64>()
}


/// Computes the mean of `values`. Returns `0` for an empty slice.
#[inline(always)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() { return 0f64; }
    sum(values) / values.len() as f64
}


/// Computes the (unbiased) sample variance of `values`.
/// Returns `0` if `values` has at most one element.
pub fn variance(values: &[f64]) -> f64 {
    let n_values = values.len();
    if n_values <= 1 { return 0f64; }

    let (s, sq) = values.iter()
        .fold((0f64, 0f64), |(s, sq), &v| (s + v, sq + v * v));
    (sq - s * s / n_values as f64) / (n_values - 1) as f64
}


/// Returns the index of the first maximal element.
/// Returns `0` for an empty slice.
#[inline(always)]
pub fn max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] { best = i; }
    }
    best
}


/// Returns the index of the first minimal element.
/// Returns `0` for an empty slice.
#[inline(always)]
pub fn min_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] { best = i; }
    }
    best
}


/// Normalizes `items` by their sum.
///
/// Fails if the sum is `NaN`.
/// If the sum is exactly `0`, `items` is left unchanged.
pub fn normalize(items: &mut [f64]) -> Result<(), ArithmeticError> {
    let z = sum(items);
    if z.is_nan() {
        return Err(ArithmeticError::NaN);
    }
    if z != 0f64 {
        items.iter_mut()
            .for_each(|item| { *item /= z; });
    }
    Ok(())
}


/// Divides every element of `items` by `z`.
/// Fails if `z` is zero.
pub fn normalize_by(items: &mut [f64], z: f64) -> Result<(), ArithmeticError> {
    if z == 0f64 {
        return Err(ArithmeticError::ZeroSum);
    }
    items.iter_mut()
        .for_each(|item| { *item /= z; });
    Ok(())
}


/// Returns the logarithm of `x` for base 2.
#[inline(always)]
pub fn log2(x: f64) -> f64 {
    x.log2()
}


/// Returns `c * log2(c)`, or `0` if `c` is `0`.
#[inline(always)]
pub fn xlogx(c: u64) -> f64 {
    if c == 0 { return 0f64; }
    let c = c as f64;
    c * log2(c)
}


/// Computes the information of class counts `[a, b, c, ...]`:
/// ```txt
/// - a log2 a - b log2 b - c log2 c - ... + N log2 N,
/// ```
/// where `N = a + b + c + ...`.
pub fn entropy(counts: &[u64]) -> f64 {
    let total = counts.iter().sum::<u64>();
    let x = counts.iter()
        .map(|&c| - xlogx(c))
        .sum::<f64>();
    x + xlogx(total)
}


/// Rounds `value` to the nearest integer, halves away from zero.
#[inline(always)]
pub fn round(value: f64) -> i64 {
    if value > 0f64 {
        (value + 0.5) as i64
    } else {
        - ((value.abs() + 0.5) as i64)
    }
}


/// Rounds `value` to `decimals` places after the decimal point.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let mask = 10f64.powi(decimals as i32);
    round(value * mask) as f64 / mask
}
