use colored::Colorize;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use std::fmt;
use std::path::PathBuf;

use crate::base_model::BaseModel;
use crate::capability::Capabilities;
use crate::common::{checker, task, utils, Environment, TargetKind};
use crate::error::{ConfigurationError, DataIncompatibility, Result};
use crate::loader::ModelLoader;
use crate::sample::{Instance, Sample, Schema};
use super::builder::render_options;
use super::prediction::{Label, Prediction};
use super::rule::CombinationRule;


const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// An ensemble that combines the predictions of its members
/// under a [`CombinationRule`].
///
/// Members trained in-process come first, in configuration order,
/// followed by the pre-built models in load order.
/// This order is fixed for the lifetime of the ensemble.
///
/// Build one with [`VoteBuilder`](super::VoteBuilder).
pub struct Vote {
    pub(super) rule: CombinationRule,
    pub(super) seed: u64,
    pub(super) models: Vec<Box<dyn BaseModel>>,
    pub(super) default_model: bool,
    pub(super) pre_built_paths: Vec<String>,
    pub(super) pre_built: Vec<Box<dyn BaseModel>>,
    pub(super) loader: Box<dyn ModelLoader>,
    pub(super) environment: Environment,
    pub(super) debug: bool,
    pub(super) schema: Schema,
    pub(super) rng: Mutex<StdRng>,
}


impl Vote {
    /// Train the ensemble again on `sample`.
    ///
    /// The tie-breaking source is reseeded,
    /// pre-built models are read again
    /// and every in-process member is retrained.
    /// On failure, the ensemble is dropped.
    pub fn rebuild(mut self, sample: &Sample) -> Result<Self> {
        let sample = sample.remove_missing_target();
        info!(
            rule = %self.rule,
            n_sample = sample.shape().0,
            "Building the ensemble"
        );

        *self.rng.lock() = StdRng::seed_from_u64(self.seed);
        self.schema = sample.schema().clone();

        self.load_pre_built(&sample)?;
        if self.models.is_empty() && self.pre_built.is_empty() {
            return Err(ConfigurationError::EmptyEnsemble.into());
        }

        let capabilities = self.capabilities();
        debug!(%capabilities, "Aggregate capabilities");
        capabilities.test(&sample)?;

        for model in self.models.iter_mut() {
            debug!(model = %model.spec(), "Training member");
            model.train(&sample)?;
        }

        if self.debug {
            self.print_stats(&sample);
        }
        info!(n_member = self.n_member(), "The ensemble is built");
        Ok(self)
    }


    /// Reads every pre-built model and checks its header.
    fn load_pre_built(&mut self, sample: &Sample) -> Result<()> {
        self.pre_built.clear();
        for raw in &self.pre_built_paths {
            let path = self.resolve(raw);
            let loaded = self.loader.load(&path)?;

            match loaded.header {
                Some(header) if !header.equal_headers(sample.schema()) => {
                    return Err(DataIncompatibility::SchemaMismatch {
                        path
                    }.into());
                },
                Some(_) => {},
                None => {
                    warn!(
                        path = %path.display(),
                        "The model does not record the structure \
                        of its training data; it is not checked"
                    );
                },
            }
            self.pre_built.push(loaded.model);
        }

        if !self.pre_built.is_empty()
            && self.default_model
            && self.models.len() == 1
        {
            debug!("Dropping the default ZeroR in favor of pre-built models");
            self.models.clear();
            self.default_model = false;
        }
        Ok(())
    }


    /// Expands `${NAME}` in `raw`.
    /// An unset variable leaves the path as written.
    fn resolve(&self, raw: &str) -> PathBuf {
        if !Environment::contains_variables(raw) {
            return PathBuf::from(raw);
        }
        match self.environment.substitute(raw) {
            Ok(path) => PathBuf::from(path),
            Err(e) => {
                warn!(path = %raw, error = %e, "Using the path as written");
                PathBuf::from(raw)
            },
        }
    }


    /// Returns the members in combination order.
    pub fn members(&self) -> impl Iterator<Item = &dyn BaseModel> + '_ {
        self.models.iter()
            .chain(self.pre_built.iter())
            .map(|m| m.as_ref())
    }


    /// Returns the number of members.
    pub fn n_member(&self) -> usize {
        self.models.len() + self.pre_built.len()
    }


    /// Returns the combination rule.
    pub fn rule(&self) -> CombinationRule {
        self.rule
    }


    /// Returns the schema of the data the ensemble was built on.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the intersection of the members' capabilities
    /// and the capabilities of the rule.
    pub fn capabilities(&self) -> Capabilities {
        self.members()
            .map(|m| m.capabilities())
            .fold(self.rule.capabilities(), |acc, c| acc.and(&c))
    }


    /// Returns the option tokens that reproduce this ensemble.
    pub fn options(&self) -> Vec<String> {
        let specs = self.models.iter()
            .map(|m| m.spec())
            .collect::<Vec<_>>();
        render_options(
            self.rule,
            self.seed,
            &specs[..],
            &self.pre_built_paths[..],
            self.debug,
        )
    }


    /// Returns the combined distribution for `instance`.
    ///
    /// For a categorical target the result sums to `1`,
    /// unless every entry is `0`.
    /// For a numeric target it has one entry, the predicted value.
    pub fn distribution(&self, instance: &Instance) -> Result<Vec<f64>> {
        let target = self.schema.target_kind();

        let outputs = match self.rule {
            CombinationRule::Median => {
                self.member_values(instance)?
                    .into_iter()
                    .map(|v| vec![v])
                    .collect()
            },
            _ => self.member_distributions(instance)?,
        };
        let mut dist = combine(
            self.rule, outputs, target.distribution_len(), &self.rng
        );

        if target.is_categorical() && utils::sum(&dist[..]) > 0f64 {
            utils::normalize(&mut dist[..])?;
        }
        Ok(dist)
    }


    /// Returns the predicted label of `instance`.
    pub fn classify(&self, instance: &Instance) -> Result<Label> {
        Ok(self.predict(instance)?.label)
    }


    /// Returns the predicted label of `instance`
    /// with the distribution it is read from.
    pub fn predict(&self, instance: &Instance) -> Result<Prediction> {
        let distribution = self.distribution(instance)?;
        let label = match self.schema.target_kind() {
            TargetKind::Categorical { .. } => {
                let k = utils::max_index(&distribution[..]);
                if distribution.get(k).map_or(true, |&p| p == 0f64) {
                    Label::Missing
                } else {
                    Label::Class(k)
                }
            },
            TargetKind::Numeric => Label::Value(distribution[0]),
        };
        Ok(Prediction { label, distribution })
    }


    /// Predicts every record of `sample`, in order.
    pub fn predict_all(&self, sample: &Sample) -> Result<Vec<Prediction>> {
        sample.instances()
            .map(|instance| self.predict(&instance))
            .collect()
    }


    /// Collects the members' distributions in member order.
    fn member_distributions(&self, instance: &Instance)
        -> Result<Vec<Vec<f64>>>
    {
        let expected = self.schema.target_kind().distribution_len();
        let members = self.members().collect::<Vec<_>>();
        members.into_par_iter()
            .map(|model| {
                let dist = model.distribution(instance)?;
                checker::check_distribution(model.name(), &dist[..], expected)?;
                Ok(dist)
            })
            .collect()
    }


    /// Collects the members' predicted values in member order.
    fn member_values(&self, instance: &Instance) -> Result<Vec<f64>> {
        let members = self.members().collect::<Vec<_>>();
        members.into_par_iter()
            .map(|model| model.predict_value(instance))
            .collect()
    }


    fn print_stats(&self, sample: &Sample) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Rule".bold(),
            self.rule.to_string().bold().green(),
            "Seed".bold(),
            self.seed.to_string().bold().green(),
            "Target".bold(),
            self.schema.target_kind().to_string().bold().green(),
        );

        let members = self.models.iter()
            .map(|m| (m.spec(), "trained"))
            .chain(self.pre_built.iter().map(|m| (m.spec(), "pre-built")))
            .map(|(spec, kind)| {
                format!(
                    "    + {:<STAT_WIDTH$}\t{:>width$}",
                    spec,
                    kind.bold().yellow(),
                    width = STAT_WIDTH - 8
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n{members}",
            "Members".bold(),
            self.n_member().to_string().bold().green(),
        );
        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Instances".bold(),
            sample.shape().0.to_string().bold().green(),
            "".bold(),
        );
    }
}


/// Combines the members' outputs under `rule`.
/// `rng` is drawn only when a majority vote is tied.
fn combine(
    rule: CombinationRule,
    outputs: Vec<Vec<f64>>,
    n_out: usize,
    rng: &Mutex<StdRng>,
) -> Vec<f64>
{
    let n_member = outputs.len() as f64;
    match rule {
        CombinationRule::Average => {
            let mut dist = vec![0f64; n_out];
            for output in &outputs {
                dist.iter_mut()
                    .zip(output)
                    .for_each(|(d, o)| { *d += o; });
            }
            dist.iter_mut().for_each(|d| { *d /= n_member; });
            dist
        },
        CombinationRule::Product => {
            let mut dist = vec![1f64; n_out];
            for output in &outputs {
                dist.iter_mut()
                    .zip(output)
                    .for_each(|(d, o)| { *d *= o; });
            }
            dist
        },
        CombinationRule::Min | CombinationRule::Max => {
            let pick: fn(f64, f64) -> f64 = if rule == CombinationRule::Min {
                f64::min
            } else {
                f64::max
            };
            let mut outputs = outputs.into_iter();
            let Some(mut dist) = outputs.next() else {
                return vec![0f64; n_out];
            };
            for output in outputs {
                dist.iter_mut()
                    .zip(output)
                    .for_each(|(d, o)| { *d = pick(*d, o); });
            }
            dist
        },
        CombinationRule::MajorityVote => {
            if n_out == 0 { return Vec::new(); }

            // A member votes for every class tied with its maximum.
            let mut votes = vec![0f64; n_out];
            for output in &outputs {
                let max = output[utils::max_index(&output[..])];
                output.iter()
                    .zip(votes.iter_mut())
                    .filter(|(&o, _)| utils::approx_eq(o, max))
                    .for_each(|(_, v)| { *v += 1f64; });
            }

            let most = votes[utils::max_index(&votes[..])];
            let tied = votes.iter()
                .enumerate()
                .filter_map(|(k, &v)| if v == most { Some(k) } else { None })
                .collect::<Vec<usize>>();
            let winner = if tied.len() > 1 {
                tied[rng.lock().gen_range(0..tied.len())]
            } else {
                tied[0]
            };
            task::vectorize(winner, n_out)
        },
        CombinationRule::Median => {
            let values = outputs.iter()
                .map(|o| o[0])
                .collect::<Vec<_>>();
            let median = match values.len() {
                0 => 0f64,
                1 => values[0],
                n => utils::select_kth(&values[..], n / 2),
            };
            vec![median]
        },
    }
}


impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Vote combines the probability distributions \
            of these base learners:"
        )?;
        for model in self.members() {
            writeln!(f, "\t{}", model.spec())?;
        }
        write!(f, "using the '{}' combination rule", self.rule)
    }
}


impl fmt::Debug for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vote")
            .field("rule", &self.rule)
            .field("seed", &self.seed)
            .field("models", &self.models)
            .field("pre_built", &self.pre_built_paths)
            .finish()
    }
}

