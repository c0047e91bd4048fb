use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::capability::{Capabilities, Capability};
use crate::common::constants::DEFAULT_MIN_LEAF;
use crate::common::options::OptionTokens;
use crate::common::{utils, TargetKind};
use crate::error::{ConfigurationError, EnsembleError, Result};
use crate::sample::{Instance, Sample};
use super::core::BaseModel;


/// The chosen split of a trained [`DecisionStump`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Split {
    feature: usize,
    threshold: f64,
    left: Vec<f64>,
    right: Vec<f64>,
}


/// A one-level decision tree over numeric features.
///
/// The stump picks the feature and threshold
/// that minimize the total class entropy of the two branches
/// for a categorical target,
/// or the total squared error for a numeric target.
/// Records with `x <= threshold` go left.
/// A record whose split feature is missing gets
/// the distribution of the whole training sample.
/// If no split leaves `min_leaf` records on both sides,
/// the stump predicts like [`ZeroR`](super::ZeroR).
///
/// # Example
/// ```no_run
/// use minivote::{BaseModel, DecisionStump, SampleReader};
/// let sample = SampleReader::new()
///     .file("/path/to/iris.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let mut stump = DecisionStump::new().min_leaf(2);
/// stump.train(&sample).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStump {
    min_leaf: usize,
    target: Option<TargetKind>,
    node: Vec<f64>,
    split: Option<Split>,
}


impl DecisionStump {
    /// Construct an untrained [`DecisionStump`].
    /// By default, `min_leaf == 1`.
    pub fn new() -> Self {
        Self {
            min_leaf: DEFAULT_MIN_LEAF,
            target: None,
            node: Vec::new(),
            split: None,
        }
    }


    /// Set the minimum number of records in each branch.
    pub fn min_leaf(mut self, min_leaf: usize) -> Self {
        assert!(min_leaf > 0, "A branch must hold at least one record");
        self.min_leaf = min_leaf;
        self
    }


    /// Build a stump from `-M <min leaf>` options.
    pub fn from_options(tokens: &mut OptionTokens)
        -> std::result::Result<Self, ConfigurationError>
    {
        let mut stump = Self::new();
        if let Some(value) = tokens.extract_value('M')? {
            let min_leaf = value.parse::<usize>()
                .ok()
                .filter(|&m| m > 0)
                .ok_or(ConfigurationError::InvalidValue { flag: 'M', value })?;
            stump = stump.min_leaf(min_leaf);
        }
        Ok(stump)
    }


    /// Returns the index of the split feature, if the stump splits.
    pub fn split_feature(&self) -> Option<usize> {
        self.split.as_ref().map(|s| s.feature)
    }


    /// Returns the threshold of the split, if the stump splits.
    pub fn threshold(&self) -> Option<f64> {
        self.split.as_ref().map(|s| s.threshold)
    }


    /// Returns the best `(score, threshold)` for `j`-th feature.
    fn best_threshold(&self, sample: &Sample, j: usize)
        -> Option<(f64, f64)>
    {
        let feature = &sample.features()[j];
        let target = sample.target();

        let rows = feature.iter()
            .enumerate()
            .filter_map(|(i, x)| if x.is_nan() { None } else { Some(i) })
            .collect::<Vec<usize>>();
        let values = rows.iter()
            .map(|&i| feature[i])
            .collect::<Vec<f64>>();
        let order = utils::stable_sort(&values[..]);

        let n_rows = rows.len();
        if n_rows < 2 * self.min_leaf { return None; }

        let mut left = Side::new(self.target?);
        let mut right = Side::new(self.target?);
        rows.iter().for_each(|&i| { right.add(target[i]); });

        let mut best: Option<(f64, f64)> = None;
        for k in 0..n_rows - 1 {
            let i = rows[order[k]];
            left.add(target[i]);
            right.remove(target[i]);

            let (x, x_next) = (values[order[k]], values[order[k + 1]]);
            if !utils::approx_lt(x, x_next) { continue; }
            if k + 1 < self.min_leaf || n_rows - k - 1 < self.min_leaf {
                continue;
            }

            let score = left.score() + right.score();
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, midpoint(x, x_next)));
            }
        }
        best
    }
}


impl Default for DecisionStump {
    fn default() -> Self {
        Self::new()
    }
}


impl BaseModel for DecisionStump {
    fn name(&self) -> &str {
        "DecisionStump"
    }


    fn options(&self) -> Vec<String> {
        vec!["-M".to_string(), self.min_leaf.to_string()]
    }


    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
            .disable(Capability::CategoricalFeatures)
    }


    fn train(&mut self, sample: &Sample) -> Result<()> {
        let sample = sample.remove_missing_target();
        self.capabilities().test(&sample)?;

        let target = sample.target_kind();
        self.target = Some(target);
        self.split = None;

        let all_rows = (0..sample.shape().0).collect::<Vec<_>>();
        self.node = leaf(&sample, &all_rows[..], target)?;

        let (_, n_feature) = sample.shape();
        let scores = (0..n_feature).into_par_iter()
            .map(|j| self.best_threshold(&sample, j))
            .collect::<Vec<_>>();

        // Ties go to the first feature.
        let mut best: Option<(usize, f64, f64)> = None;
        for (j, score) in scores.into_iter().enumerate() {
            let Some((score, threshold)) = score else { continue; };
            if best.map_or(true, |(_, s, _)| score < s) {
                best = Some((j, score, threshold));
            }
        }

        if let Some((feature, _, threshold)) = best {
            let x = sample.features()[feature].values();
            let (lhs, rhs): (Vec<usize>, Vec<usize>) = all_rows.iter()
                .copied()
                .filter(|&i| !x[i].is_nan())
                .partition(|&i| x[i] <= threshold);

            self.split = Some(Split {
                feature,
                threshold,
                left: leaf(&sample, &lhs[..], target)?,
                right: leaf(&sample, &rhs[..], target)?,
            });
        }
        Ok(())
    }


    fn distribution(&self, instance: &Instance) -> Result<Vec<f64>> {
        if self.target.is_none() {
            return Err(EnsembleError::NotTrained {
                model: self.name().to_string()
            });
        }

        let Some(split) = &self.split else {
            return Ok(self.node.clone());
        };
        let x = instance[split.feature];
        let dist = if x.is_nan() {
            &self.node
        } else if x <= split.threshold {
            &split.left
        } else {
            &split.right
        };
        Ok(dist.clone())
    }
}


/// Returns a threshold `t` with `x <= t < x_next`.
/// Infinite neighbours make the plain midpoint unusable.
#[inline(always)]
fn midpoint(x: f64, x_next: f64) -> f64 {
    let mid = x / 2f64 + x_next / 2f64;
    if mid.is_nan() {
        0f64
    } else if mid == f64::INFINITY {
        x
    } else {
        mid
    }
}


/// Returns the leaf distribution of `rows`.
fn leaf(sample: &Sample, rows: &[usize], target: TargetKind)
    -> Result<Vec<f64>>
{
    let y = sample.target();
    match target {
        TargetKind::Categorical { n_class } => {
            let mut dist = vec![0f64; n_class];
            rows.iter().for_each(|&i| { dist[y[i] as usize] += 1f64; });
            utils::normalize(&mut dist[..])?;
            Ok(dist)
        },
        TargetKind::Numeric => {
            let values = rows.iter()
                .map(|&i| y[i])
                .collect::<Vec<_>>();
            Ok(vec![utils::mean(&values[..])])
        },
    }
}


/// Running statistics of one branch.
enum Side {
    Counts(Vec<u64>),
    Moments { n: f64, sum: f64, sum_sq: f64 },
}


impl Side {
    fn new(target: TargetKind) -> Self {
        match target {
            TargetKind::Categorical { n_class }
                => Self::Counts(vec![0; n_class]),
            TargetKind::Numeric
                => Self::Moments { n: 0f64, sum: 0f64, sum_sq: 0f64 },
        }
    }


    #[inline(always)]
    fn add(&mut self, y: f64) {
        match self {
            Self::Counts(counts) => { counts[y as usize] += 1; },
            Self::Moments { n, sum, sum_sq } => {
                *n += 1f64;
                *sum += y;
                *sum_sq += y * y;
            },
        }
    }


    #[inline(always)]
    fn remove(&mut self, y: f64) {
        match self {
            Self::Counts(counts) => { counts[y as usize] -= 1; },
            Self::Moments { n, sum, sum_sq } => {
                *n -= 1f64;
                *sum -= y;
                *sum_sq -= y * y;
            },
        }
    }


    /// Entropy of the class counts, or the squared error around the mean.
    #[inline(always)]
    fn score(&self) -> f64 {
        match self {
            Self::Counts(counts) => utils::entropy(&counts[..]),
            Self::Moments { n, sum, sum_sq } => {
                if *n == 0f64 { return 0f64; }
                (sum_sq - sum * sum / n).max(0f64)
            },
        }
    }
}
