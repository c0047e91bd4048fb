use rand::SeedableRng;
use rand::rngs::StdRng;
use parking_lot::Mutex;

use crate::base_model::{BaseModel, ZeroR, model_from_spec};
use crate::common::constants::DEFAULT_SEED;
use crate::common::options::OptionTokens;
use crate::common::Environment;
use crate::error::{ConfigurationError, Result};
use crate::loader::{JsonModelLoader, ModelLoader};
use crate::sample::Sample;
use super::rule::CombinationRule;
use super::vote_struct::Vote;


/// A struct that builds [`Vote`].
/// `VoteBuilder` keeps the parameters for constructing [`Vote`].
///
/// Without any configured member, the ensemble holds a single [`ZeroR`].
/// That default member is dropped
/// when pre-built models are added at build time.
///
/// # Example
///
/// ```no_run
/// use minivote::prelude::*;
///
/// let sample = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let vote = VoteBuilder::new()
///     .rule(CombinationRule::MajorityVote)
///     .seed(7)
///     .model(DecisionStump::new())
///     .model(ZeroR::new())
///     .pre_built("${MODELS}/stump.json")
///     .build(&sample)
///     .unwrap();
/// let label = vote.classify(&sample.instance(0)).unwrap();
/// ```
pub struct VoteBuilder {
    pub(super) rule: CombinationRule,
    pub(super) seed: u64,
    pub(super) models: Vec<Box<dyn BaseModel>>,
    pub(super) default_model: bool,
    pub(super) pre_built: Vec<String>,
    pub(super) loader: Box<dyn ModelLoader>,
    pub(super) environment: Environment,
    pub(super) debug: bool,
}


impl VoteBuilder {
    /// Construct a new instance of [`VoteBuilder`].
    /// By default, [`VoteBuilder`] sets the parameters as follows;
    /// ```text
    /// rule: CombinationRule::Average,
    /// seed: 1,
    /// models: [ZeroR],
    /// pre_built: [],
    /// loader: JsonModelLoader,
    /// environment: the process environment,
    /// debug: false,
    /// ```
    pub fn new() -> Self {
        Self {
            rule: CombinationRule::default(),
            seed: DEFAULT_SEED,
            models: vec![Box::new(ZeroR::new())],
            default_model: true,
            pre_built: Vec::new(),
            loader: Box::new(JsonModelLoader::new()),
            environment: Environment::system(),
            debug: false,
        }
    }


    /// Parses `-R <rule>`, `-S <seed>`, `-B <model spec>` (repeatable),
    /// `-P <path>` (repeatable) and `-D` from `tokens`.
    ///
    /// Recognized tokens are consumed;
    /// the caller decides what to do with the rest.
    ///
    /// ```
    /// use minivote::{OptionTokens, VoteBuilder};
    /// let mut tokens = OptionTokens::new([
    ///     "-R", "MED", "-S", "3", "-B", "DecisionStump -M 2", "-B", "ZeroR",
    /// ]);
    /// let builder = VoteBuilder::from_options(&mut tokens).unwrap();
    /// assert!(tokens.is_empty());
    /// assert_eq!(
    ///     builder.options(),
    ///     vec!["-S", "3", "-R", "MED", "-B", "DecisionStump -M 2", "-B", "ZeroR"],
    /// );
    /// ```
    pub fn from_options(tokens: &mut OptionTokens) -> Result<Self> {
        let mut builder = Self::new();

        if let Some(rule) = tokens.extract_value('R')? {
            builder = builder.rule(rule.parse()?);
        }

        if let Some(seed) = tokens.extract_value('S')? {
            let seed = seed.parse::<u64>()
                .map_err(|_| {
                    ConfigurationError::InvalidValue { flag: 'S', value: seed }
                })?;
            builder = builder.seed(seed);
        }

        for spec in tokens.extract_values('B')? {
            builder = builder.boxed_model(model_from_spec(&spec)?);
        }

        for path in tokens.extract_values('P')? {
            builder = builder.pre_built(path);
        }

        builder = builder.debug(tokens.extract_flag('D')?);
        Ok(builder)
    }


    /// Returns the option tokens that reproduce this configuration.
    pub fn options(&self) -> Vec<String> {
        let specs = self.models.iter()
            .map(|m| m.spec())
            .collect::<Vec<_>>();
        render_options(
            self.rule, self.seed, &specs[..], &self.pre_built[..], self.debug
        )
    }


    /// Set the combination rule.
    /// Default is [`CombinationRule::Average`].
    pub fn rule(mut self, rule: CombinationRule) -> Self {
        self.rule = rule;
        self
    }


    /// Set the seed of the tie-breaking random source.
    /// Default is `1`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Add a member that is trained when the ensemble is built.
    /// The first call replaces the default [`ZeroR`].
    pub fn model<M>(self, model: M) -> Self
        where M: BaseModel + 'static
    {
        self.boxed_model(Box::new(model))
    }


    /// Same as [`VoteBuilder::model`] for a boxed model.
    pub fn boxed_model(mut self, model: Box<dyn BaseModel>) -> Self {
        if self.default_model {
            self.models.clear();
            self.default_model = false;
        }
        self.models.push(model);
        self
    }


    /// Replace all members that are trained when the ensemble is built.
    pub fn models(mut self, models: Vec<Box<dyn BaseModel>>) -> Self {
        self.models = models;
        self.default_model = false;
        self
    }


    /// Add a member from its specification, e.g. `"DecisionStump -M 2"`.
    pub fn model_spec(self, spec: &str) -> Result<Self> {
        Ok(self.boxed_model(model_from_spec(spec)?))
    }


    /// Add the path of a pre-built model.
    /// `${NAME}` references are expanded from the environment
    /// when the ensemble is built.
    pub fn pre_built<S: Into<String>>(mut self, path: S) -> Self {
        self.pre_built.push(path.into());
        self
    }


    /// Set the reader of pre-built models.
    /// Default is [`JsonModelLoader`].
    pub fn loader<L>(mut self, loader: L) -> Self
        where L: ModelLoader + 'static
    {
        self.loader = Box::new(loader);
        self
    }


    /// Set the variables used to expand pre-built model paths.
    /// Default is the process environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }


    /// Print the settings of the built ensemble to stdout.
    pub fn debug(mut self, flag: bool) -> Self {
        self.debug = flag;
        self
    }


    /// Build a [`Vote`] on `sample`.
    /// This method consumes `self`.
    pub fn build(self, sample: &Sample) -> Result<Vote> {
        let vote = Vote {
            rule: self.rule,
            seed: self.seed,
            models: self.models,
            default_model: self.default_model,
            pre_built_paths: self.pre_built,
            pre_built: Vec::new(),
            loader: self.loader,
            environment: self.environment,
            debug: self.debug,
            schema: sample.schema().clone(),
            rng: Mutex::new(StdRng::seed_from_u64(self.seed)),
        };
        vote.rebuild(sample)
    }
}


impl Default for VoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}


pub(super) fn render_options(
    rule: CombinationRule,
    seed: u64,
    specs: &[String],
    paths: &[String],
    debug: bool,
) -> Vec<String>
{
    let mut options = vec![
        "-S".to_string(), seed.to_string(),
        "-R".to_string(), rule.tag().to_string(),
    ];
    for spec in specs {
        options.push("-B".to_string());
        options.push(spec.clone());
    }
    for path in paths {
        options.push("-P".to_string());
        options.push(path.clone());
    }
    if debug {
        options.push("-D".to_string());
    }
    options
}
