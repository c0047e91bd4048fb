use serde::{Serialize, Deserialize};
use std::fmt;

use crate::common::TargetKind;


/// The kind of values a column holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Real values.
    Numeric,
    /// Indices into the given labels.
    Categorical(Vec<String>),
}


/// A named column of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}


impl Attribute {
    /// A numeric attribute named `name`.
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), kind: AttributeKind::Numeric }
    }


    /// A categorical attribute named `name` with the given labels.
    /// The `i`-th label is encoded as the value `i`.
    pub fn categorical<S, I, T>(name: S, labels: I) -> Self
        where S: Into<String>,
              I: IntoIterator<Item = T>,
              T: Into<String>,
    {
        let labels = labels.into_iter()
            .map(Into::into)
            .collect();
        Self { name: name.into(), kind: AttributeKind::Categorical(labels) }
    }


    /// Returns the name of this attribute.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the kind of this attribute.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }


    /// Returns `true` if this attribute is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }


    /// Returns `true` if this attribute is categorical.
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, AttributeKind::Categorical(_))
    }


    /// Returns the labels of a categorical attribute.
    pub fn labels(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Categorical(labels) => Some(&labels[..]),
            AttributeKind::Numeric => None,
        }
    }


    /// Returns the encoded value of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels()?
            .iter()
            .position(|l| l == label)
    }
}


impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AttributeKind::Numeric => write!(f, "{}: numeric", self.name),
            AttributeKind::Categorical(labels) => {
                write!(f, "{}: {{{}}}", self.name, labels.join(","))
            },
        }
    }
}


/// The structure of a dataset:
/// its feature attributes and its target attribute.
///
/// A pre-built model may carry the schema it was trained on,
/// which is compared with [`Schema::equal_headers`]
/// against the data the ensemble is built on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    features: Vec<Attribute>,
    target: Attribute,
}


impl Schema {
    /// Construct a new instance of [`Schema`].
    pub fn new(features: Vec<Attribute>, target: Attribute) -> Self {
        Self { features, target }
    }


    /// Returns the feature attributes.
    pub fn features(&self) -> &[Attribute] {
        &self.features[..]
    }


    /// Returns the target attribute.
    pub fn target(&self) -> &Attribute {
        &self.target
    }


    /// Returns the number of features.
    pub fn n_feature(&self) -> usize {
        self.features.len()
    }


    /// Returns the kind of the target.
    pub fn target_kind(&self) -> TargetKind {
        match self.target.labels() {
            Some(labels) => TargetKind::Categorical { n_class: labels.len() },
            None => TargetKind::Numeric,
        }
    }


    /// Returns the position of the feature named `name`.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features.iter()
            .position(|a| a.name() == name)
    }


    /// Returns `true` if `other` has the same structure:
    /// the same features in the same order with the same kinds,
    /// and the same target.
    pub fn equal_headers(&self, other: &Schema) -> bool {
        self == other
    }
}


impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.features {
            writeln!(f, "  {attribute}")?;
        }
        write!(f, "  {} (target)", self.target)
    }
}
