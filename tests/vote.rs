use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use minivote::prelude::*;
use minivote::{
    Capabilities,
    Capability,
    DataIncompatibility,
    EnsembleError,
    Result,
};


/// A model that always returns the same vector.
struct Fixed {
    dist: Vec<f64>,
    trained: Arc<AtomicBool>,
}


impl Fixed {
    fn boxed(dist: &[f64]) -> Box<dyn BaseModel> {
        Box::new(Self { dist: dist.to_vec(), trained: Arc::default() })
    }
}


impl BaseModel for Fixed {
    fn name(&self) -> &str {
        "Fixed"
    }


    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }


    fn train(&mut self, _sample: &Sample) -> Result<()> {
        self.trained.store(true, Ordering::SeqCst);
        Ok(())
    }


    fn distribution(&self, _instance: &Instance) -> Result<Vec<f64>> {
        Ok(self.dist.clone())
    }
}


/// A model whose predictions always fail.
struct Broken;


impl BaseModel for Broken {
    fn name(&self) -> &str {
        "Broken"
    }


    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }


    fn train(&mut self, _sample: &Sample) -> Result<()> {
        Ok(())
    }


    fn distribution(&self, _instance: &Instance) -> Result<Vec<f64>> {
        Err(EnsembleError::model("the backend is unavailable"))
    }
}


/// A model that cannot be trained.
struct Untrainable;


impl BaseModel for Untrainable {
    fn name(&self) -> &str {
        "Untrainable"
    }


    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }


    fn train(&mut self, _sample: &Sample) -> Result<()> {
        Err(EnsembleError::model("out of memory"))
    }


    fn distribution(&self, _instance: &Instance) -> Result<Vec<f64>> {
        Ok(vec![0.5, 0.5])
    }
}


fn categorical(n_class: usize) -> Sample {
    let labels = (0..n_class).map(|k| format!("c{k}")).collect::<Vec<_>>();
    let schema = Schema::new(
        vec![Attribute::numeric("x")],
        Attribute::categorical("class", labels),
    );
    let mut sample = Sample::new(schema);
    for i in 0..4 {
        sample.push(vec![i as f64], Some((i % n_class) as f64));
    }
    sample
}


fn numeric() -> Sample {
    let schema = Schema::new(
        vec![Attribute::numeric("x")],
        Attribute::numeric("y"),
    );
    let mut sample = Sample::new(schema);
    for i in 0..4 {
        sample.push(vec![i as f64], Some(i as f64 * 2.0));
    }
    sample
}


fn build(
    rule: CombinationRule,
    seed: u64,
    members: &[&[f64]],
    sample: &Sample,
) -> Result<Vote>
{
    let models = members.iter()
        .map(|dist| Fixed::boxed(dist))
        .collect();
    VoteBuilder::new()
        .rule(rule)
        .seed(seed)
        .models(models)
        .environment(Environment::empty())
        .build(sample)
}


fn assert_close(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
    }
}


/// Tests for `Vote`.
#[cfg(test)]
pub mod vote_tests {
    use super::*;

    #[test]
    fn average_of_probabilities() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[0.2, 0.8], &[0.4, 0.6], &[0.6, 0.4]];
        let vote = build(CombinationRule::Average, 1, members, &sample).unwrap();

        let x = Instance::new(vec![0.0]);
        let prediction = vote.predict(&x).unwrap();
        assert_close(&prediction.distribution, &[0.4, 0.6]);
        assert_eq!(prediction.label, Label::Class(1));
    }


    #[test]
    fn product_min_and_max() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[0.2, 0.8], &[0.5, 0.5]];
        let x = Instance::new(vec![0.0]);

        let vote = build(CombinationRule::Product, 1, members, &sample).unwrap();
        // [0.1, 0.4] normalized
        assert_close(&vote.distribution(&x).unwrap(), &[0.2, 0.8]);

        let vote = build(CombinationRule::Min, 1, members, &sample).unwrap();
        // [0.2, 0.5] normalized
        assert_close(&vote.distribution(&x).unwrap(), &[0.2 / 0.7, 0.5 / 0.7]);

        let vote = build(CombinationRule::Max, 1, members, &sample).unwrap();
        // [0.5, 0.8] normalized
        assert_close(&vote.distribution(&x).unwrap(), &[0.5 / 1.3, 0.8 / 1.3]);
    }


    #[test]
    fn average_on_a_numeric_target() {
        let sample = numeric();
        let members: &[&[f64]] = &[&[1.0], &[2.0], &[6.0]];
        let vote = build(CombinationRule::Average, 1, members, &sample).unwrap();

        let prediction = vote.predict(&Instance::new(vec![0.0])).unwrap();
        assert_eq!(prediction.label, Label::Value(3.0));
        assert_eq!(prediction.distribution, vec![3.0]);
    }


    #[test]
    fn median_of_predicted_values() {
        let sample = numeric();
        let x = Instance::new(vec![0.0]);

        let odd: &[&[f64]] = &[&[1.0], &[5.0], &[3.0]];
        let vote = build(CombinationRule::Median, 1, odd, &sample).unwrap();
        assert_eq!(vote.classify(&x).unwrap(), Label::Value(3.0));

        let even: &[&[f64]] = &[&[1.0], &[2.0], &[3.0], &[4.0]];
        let vote = build(CombinationRule::Median, 1, even, &sample).unwrap();
        assert_eq!(vote.classify(&x).unwrap(), Label::Value(3.0));

        let one: &[&[f64]] = &[&[-7.5]];
        let vote = build(CombinationRule::Median, 1, one, &sample).unwrap();
        assert_eq!(vote.classify(&x).unwrap(), Label::Value(-7.5));
    }


    #[test]
    fn majority_without_tie_is_deterministic() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[1.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]];
        let x = Instance::new(vec![0.0]);

        for seed in 0..20 {
            let vote = build(CombinationRule::MajorityVote, seed, members, &sample)
                .unwrap();
            let prediction = vote.predict(&x).unwrap();
            assert_eq!(prediction.label, Label::Class(0));
            assert_eq!(prediction.distribution, vec![1.0, 0.0]);
        }
    }


    #[test]
    fn a_member_with_an_internal_tie_votes_twice() {
        let sample = categorical(3);
        let members: &[&[f64]] = &[
            &[0.5, 0.5, 0.0],
            &[0.0, 0.6, 0.4],
            &[0.0, 0.0, 1.0],
            &[0.45, 0.45 + 1e-8, 0.1],
        ];
        let vote = build(CombinationRule::MajorityVote, 1, members, &sample)
            .unwrap();
        // votes: [2, 3, 1]
        let x = Instance::new(vec![0.0]);
        assert_eq!(vote.classify(&x).unwrap(), Label::Class(1));
    }


    #[test]
    fn majority_tie_is_broken_at_random() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[
            &[1.0, 0.0], &[0.9, 0.1], &[0.0, 1.0], &[0.2, 0.8],
        ];
        let x = Instance::new(vec![0.0]);

        let mut n_zero = 0;
        let n_seed = 200;
        for seed in 0..n_seed {
            let vote = build(CombinationRule::MajorityVote, seed, members, &sample)
                .unwrap();
            match vote.classify(&x).unwrap() {
                Label::Class(0) => { n_zero += 1; },
                Label::Class(1) => {},
                other => panic!("unexpected label {other:?}"),
            }
        }
        let freq = n_zero as f64 / n_seed as f64;
        assert!((0.3..=0.7).contains(&freq), "class 0 chosen at rate {freq}");
    }


    #[test]
    fn a_fixed_seed_reproduces_the_choices() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[1.0, 0.0], &[0.0, 1.0]];
        let x = Instance::new(vec![0.0]);

        let draws = |vote: &Vote| {
            (0..16).map(|_| vote.classify(&x).unwrap())
                .collect::<Vec<_>>()
        };

        let a = build(CombinationRule::MajorityVote, 42, members, &sample).unwrap();
        let b = build(CombinationRule::MajorityVote, 42, members, &sample).unwrap();
        let first = draws(&a);
        assert_eq!(first, draws(&b));

        // Rebuilding reseeds the source.
        let a = a.rebuild(&sample).unwrap();
        assert_eq!(first, draws(&a));
    }


    #[test]
    fn zero_distribution_gives_a_missing_label() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[0.0, 0.0], &[0.0, 0.0]];
        let vote = build(CombinationRule::Average, 1, members, &sample).unwrap();

        let prediction = vote.predict(&Instance::new(vec![0.0])).unwrap();
        assert_eq!(prediction.label, Label::Missing);
        assert_eq!(prediction.distribution, vec![0.0, 0.0]);
        assert!(prediction.label.as_f64().is_nan());
    }


    #[test]
    fn categorical_rules_reject_a_numeric_target_before_training() {
        let sample = numeric();
        for rule in [CombinationRule::Product, CombinationRule::MajorityVote] {
            let trained = Arc::new(AtomicBool::new(false));
            let model = Fixed { dist: vec![1.0], trained: trained.clone() };
            let result = VoteBuilder::new()
                .rule(rule)
                .model(model)
                .build(&sample);

            let err = result.unwrap_err();
            assert!(matches!(
                err,
                EnsembleError::DataIncompatibility(
                    DataIncompatibility::Unsupported {
                        capability: Capability::NumericTarget
                    }
                )
            ));
            assert!(!trained.load(Ordering::SeqCst));
        }
    }


    #[test]
    fn median_rejects_a_categorical_target() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[0.5, 0.5]];
        let err = build(CombinationRule::Median, 1, members, &sample)
            .unwrap_err();
        assert!(matches!(
            err,
            EnsembleError::DataIncompatibility(
                DataIncompatibility::Unsupported {
                    capability: Capability::CategoricalTarget
                }
            )
        ));
    }


    #[test]
    fn member_capabilities_are_intersected() {
        let schema = Schema::new(
            vec![Attribute::categorical("color", ["red", "blue"])],
            Attribute::categorical("class", ["a", "b"]),
        );
        let mut sample = Sample::new(schema);
        sample.push(vec![0.0], Some(0.0));
        sample.push(vec![1.0], Some(1.0));

        let err = VoteBuilder::new()
            .model(ZeroR::new())
            .model(DecisionStump::new())
            .build(&sample)
            .unwrap_err();
        assert!(matches!(
            err,
            EnsembleError::DataIncompatibility(
                DataIncompatibility::Unsupported {
                    capability: Capability::CategoricalFeatures
                }
            )
        ));
    }


    #[test]
    fn records_without_a_target_are_ignored() {
        let schema = Schema::new(
            vec![Attribute::numeric("x")],
            Attribute::categorical("class", ["a", "b"]),
        );
        let mut sample = Sample::new(schema);
        sample.push(vec![0.0], Some(0.0));
        sample.push(vec![1.0], None);
        sample.push(vec![2.0], None);
        sample.push(vec![3.0], Some(1.0));
        sample.push(vec![4.0], Some(1.0));

        let vote = VoteBuilder::new().build(&sample).unwrap();
        let dist = vote.distribution(&Instance::new(vec![0.0])).unwrap();
        assert_close(&dist, &[1.0 / 3.0, 2.0 / 3.0]);
        // The caller's sample is untouched.
        assert_eq!(sample.shape(), (5, 1));
    }


    #[test]
    fn wrong_length_is_an_internal_error() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[0.5, 0.5], &[1.0]];
        let vote = build(CombinationRule::Average, 1, members, &sample).unwrap();
        let err = vote.distribution(&Instance::new(vec![0.0])).unwrap_err();
        assert!(matches!(err, EnsembleError::InternalInvariant(_)));
    }


    #[test]
    fn member_failures_propagate_unchanged() {
        let sample = categorical(2);
        let vote = VoteBuilder::new()
            .model(ZeroR::new())
            .boxed_model(Box::new(Broken))
            .build(&sample)
            .unwrap();
        let err = vote.distribution(&Instance::new(vec![0.0])).unwrap_err();
        assert!(matches!(err, EnsembleError::Model(_)));
        assert_eq!(err.to_string(), "the backend is unavailable");
    }


    #[test]
    fn a_training_failure_aborts_the_build() {
        let sample = categorical(2);
        let before = Arc::new(AtomicBool::new(false));
        let after = Arc::new(AtomicBool::new(false));

        let err = VoteBuilder::new()
            .model(Fixed { dist: vec![0.5, 0.5], trained: before.clone() })
            .model(Untrainable)
            .model(Fixed { dist: vec![0.5, 0.5], trained: after.clone() })
            .environment(Environment::empty())
            .build(&sample)
            .unwrap_err();

        assert!(matches!(err, EnsembleError::Model(_)));
        assert_eq!(err.to_string(), "out of memory");
        assert!(before.load(Ordering::SeqCst));
        assert!(!after.load(Ordering::SeqCst));
    }


    #[test]
    fn an_empty_ensemble_is_rejected() {
        let sample = categorical(2);
        let err = VoteBuilder::new()
            .models(Vec::new())
            .build(&sample)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            minivote::ConfigurationError::EmptyEnsemble.to_string()
        );
    }


    #[test]
    fn describes_its_members() {
        let sample = categorical(2);
        let vote = VoteBuilder::new()
            .model(DecisionStump::new().min_leaf(2))
            .model(ZeroR::new())
            .rule(CombinationRule::Max)
            .build(&sample)
            .unwrap();
        assert_eq!(
            vote.to_string(),
            "Vote combines the probability distributions \
            of these base learners:\n\
            \tDecisionStump -M 2\n\
            \tZeroR\n\
            using the 'Maximum Probability' combination rule"
        );

        let vote = VoteBuilder::new().build(&sample).unwrap();
        assert_eq!(vote.n_member(), 1);
        assert!(vote.to_string().contains("\tZeroR\n"));
        assert!(vote.to_string().contains("'Average of Probabilities'"));
    }


    #[test]
    fn vote_is_shareable_across_threads() {
        let sample = categorical(2);
        let members: &[&[f64]] = &[&[1.0, 0.0], &[0.0, 1.0]];
        let vote = Arc::new(
            build(CombinationRule::MajorityVote, 3, members, &sample).unwrap()
        );

        let handles = (0..4).map(|_| {
            let vote = Arc::clone(&vote);
            std::thread::spawn(move || {
                vote.classify(&Instance::new(vec![0.0])).unwrap()
            })
        })
        .collect::<Vec<_>>();
        for handle in handles {
            let label = handle.join().unwrap();
            assert!(matches!(label, Label::Class(0) | Label::Class(1)));
        }
    }
}
