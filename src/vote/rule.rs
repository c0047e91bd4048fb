use std::fmt;
use std::str::FromStr;

use crate::capability::{Capabilities, Capability};
use crate::error::ConfigurationError;


/// How the ensemble combines the outputs of its members.
///
/// | Tag    | Rule                   | Target               |
/// |--------|------------------------|----------------------|
/// | `AVG`  | Average of probabilities | both               |
/// | `PROD` | Product of probabilities | categorical        |
/// | `MAJ`  | Majority voting          | categorical        |
/// | `MIN`  | Minimum probability      | both               |
/// | `MAX`  | Maximum probability      | both               |
/// | `MED`  | Median                   | numeric            |
///
/// ```
/// use minivote::CombinationRule;
/// let rule = "maj".parse::<CombinationRule>().unwrap();
/// assert_eq!(rule, CombinationRule::MajorityVote);
/// assert_eq!(rule.tag(), "MAJ");
/// assert_eq!(rule.to_string(), "Majority Voting");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CombinationRule {
    /// Element-wise mean of the members' distributions.
    #[default]
    Average,
    /// Element-wise product of the members' distributions.
    Product,
    /// Each member votes for its most probable class(es).
    MajorityVote,
    /// Element-wise minimum of the members' distributions.
    Min,
    /// Element-wise maximum of the members' distributions.
    Max,
    /// Median of the members' numeric predictions.
    Median,
}


impl CombinationRule {
    /// Every rule, in tag order.
    pub const ALL: [CombinationRule; 6] = [
        Self::Average,
        Self::Product,
        Self::MajorityVote,
        Self::Min,
        Self::Max,
        Self::Median,
    ];


    /// Returns the short name used in `-R` options.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Average => "AVG",
            Self::Product => "PROD",
            Self::MajorityVote => "MAJ",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Median => "MED",
        }
    }


    /// Returns the data this rule can combine predictions for.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Product | Self::MajorityVote => {
                Capabilities::all().disable(Capability::NumericTarget)
            },
            Self::Median => {
                Capabilities::all().disable(Capability::CategoricalTarget)
            },
            Self::Average | Self::Min | Self::Max => Capabilities::all(),
        }
    }
}


impl fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Average => "Average of Probabilities",
            Self::Product => "Product of Probabilities",
            Self::MajorityVote => "Majority Voting",
            Self::Min => "Minimum Probability",
            Self::Max => "Maximum Probability",
            Self::Median => "Median",
        };
        write!(f, "{name}")
    }
}


impl FromStr for CombinationRule {
    type Err = ConfigurationError;


    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|rule| rule.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigurationError::UnknownRule(s.to_string()))
    }
}
