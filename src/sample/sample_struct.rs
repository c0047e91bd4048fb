use std::ops::Index;

use crate::common::{checker, TargetKind};
use super::feature_struct::Feature;
use super::instance::Instance;
use super::schema::Schema;


/// A batch of records sharing one [`Schema`].
///
/// Features are stored column by column.
/// A missing target is stored as `NaN`.
///
/// # Example
/// ```
/// use minivote::{Attribute, Sample, Schema};
/// let schema = Schema::new(
///     vec![Attribute::numeric("x")],
///     Attribute::categorical("class", ["neg", "pos"]),
/// );
/// let mut sample = Sample::new(schema);
/// sample.push(vec![0.5], Some(1.0));
/// sample.push(vec![-0.5], None);
/// assert_eq!(sample.shape(), (2, 1));
/// assert_eq!(sample.remove_missing_target().shape(), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) schema: Schema,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
}


impl Sample {
    /// Construct an empty sample with the given schema.
    pub fn new(schema: Schema) -> Self {
        let features = schema.features()
            .iter()
            .map(|a| Feature::new(a.name()))
            .collect();
        Self { schema, features, target: Vec::new(), n_sample: 0, }
    }


    /// Append a record.
    ///
    /// # Panics
    /// Panics if `values` does not have one value per feature,
    /// or if a categorical target is not a class index.
    pub fn push(&mut self, values: Vec<f64>, target: Option<f64>) {
        checker::check_width(self.features.len(), values.len());

        let y = target.filter(|y| !y.is_nan());
        if let (Some(y), TargetKind::Categorical { n_class })
            = (y, self.target_kind())
        {
            checker::check_label(y, n_class);
        }

        self.features.iter_mut()
            .zip(values)
            .for_each(|(feat, x)| { feat.append(x); });
        self.target.push(y.unwrap_or(f64::NAN));
        self.n_sample += 1;
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.features.len())
    }


    /// Returns `true` if the sample has no record.
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns the schema of this sample.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the kind of the target.
    pub fn target_kind(&self) -> TargetKind {
        self.schema.target_kind()
    }


    /// Returns the slice of target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the `row`-th record as an [`Instance`].
    pub fn instance(&self, row: usize) -> Instance {
        let values = self.features.iter()
            .map(|feat| feat[row])
            .collect::<Vec<f64>>();
        Instance::new(values).with_target(self.target[row])
    }


    /// Returns an iterator over the records.
    pub fn instances(&self) -> impl Iterator<Item = Instance> + '_ {
        (0..self.n_sample).map(|row| self.instance(row))
    }


    /// Returns a copy of `self` without the records
    /// whose target is missing.
    pub fn remove_missing_target(&self) -> Self {
        let rows = self.target.iter()
            .enumerate()
            .filter_map(|(i, y)| if y.is_nan() { None } else { Some(i) })
            .collect::<Vec<usize>>();

        let features = self.features.iter()
            .map(|feat| feat.select(&rows[..]))
            .collect();
        let target = rows.iter()
            .map(|&i| self.target[i])
            .collect();

        Self {
            schema: self.schema.clone(),
            features,
            target,
            n_sample: rows.len(),
        }
    }


    /// Returns `true` if some feature value is missing.
    pub fn has_missing_values(&self) -> bool {
        self.features.iter().any(Feature::has_missing)
    }


    /// Returns `true` if some target value is missing.
    pub fn has_missing_target(&self) -> bool {
        self.target.iter().any(|y| y.is_nan())
    }


    /// Returns the number of records of each class,
    /// ignoring records whose target is missing.
    ///
    /// # Panics
    /// Panics if the target is numeric.
    pub fn class_counts(&self) -> Vec<u64> {
        let TargetKind::Categorical { n_class } = self.target_kind() else {
            panic!("class counts are defined only for a categorical target");
        };
        let mut counts = vec![0_u64; n_class];
        self.target.iter()
            .filter(|y| !y.is_nan())
            .for_each(|&y| { counts[y as usize] += 1; });
        counts
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = self.schema.feature_index(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}
