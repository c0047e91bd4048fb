//! Trains a `Vote` ensemble on a CSV file and reports its predictions.
//!
//! ```text
//! vote -t train.csv [-T test.csv] [-c class] [-R AVG] [-S 1]
//!      [-B "DecisionStump -M 2"]... [-P model.json]... [-D]
//! ```
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::env;
use std::process::ExitCode;

use minivote::common::constants::{PRINT_DECIMALS, PRINT_WIDTH};
use minivote::common::format::format_fixed_width;
use minivote::prelude::*;
use minivote::{ConfigurationError, OptionTokens, Result, TargetKind};


const DEFAULT_TARGET: &str = "class";

const USAGE: &str = "\
Usage: vote -t <train.csv> [options]

  -t <file>   CSV file to build the ensemble on (with a header row)
  -T <file>   CSV file to evaluate on (default: the training file)
  -c <name>   name of the target column (default: class)
  -R <rule>   combination rule: AVG|PROD|MAJ|MIN|MAX|MED (default: AVG)
  -S <seed>   seed of the tie-breaking source (default: 1)
  -B <spec>   base model, e.g. \"DecisionStump -M 2\" (repeatable)
  -P <file>   pre-built model file, may contain ${VAR} (repeatable)
  -D          print the ensemble settings
  -h          print this message";


fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".bold().red());
            ExitCode::FAILURE
        },
    }
}


fn run() -> Result<()> {
    let mut tokens = OptionTokens::new(env::args().skip(1));

    if tokens.extract_flag('h')? {
        println!("{USAGE}");
        return Ok(());
    }

    let Some(train) = tokens.extract_value('t')? else {
        eprintln!("{USAGE}\n");
        return Err(ConfigurationError::MissingValue('t').into());
    };
    let test = tokens.extract_value('T')?;
    let target = tokens.extract_value('c')?
        .unwrap_or_else(|| DEFAULT_TARGET.to_string());

    let builder = VoteBuilder::from_options(&mut tokens)?;
    tokens.reject_remaining()?;

    let train = SampleReader::new()
        .file(train)
        .has_header(true)
        .target_feature(target)
        .read()?;
    // The test file shares the encoding of the training file.
    let test = match test {
        Some(file) => {
            SampleReader::<_, &str>::new()
                .file(file)
                .has_header(true)
                .schema(train.schema().clone())
                .read()?
        },
        None => train.clone(),
    };

    let vote = builder.build(&train)?;
    println!("{vote}\n");

    let predictions = vote.predict_all(&test)?;
    match train.target_kind() {
        TargetKind::Categorical { .. } => {
            report_classes(&test, &predictions);
        },
        TargetKind::Numeric => report_values(&test, &predictions),
    }
    Ok(())
}


fn report_classes(test: &Sample, predictions: &[Prediction]) {
    let names = test.schema().target().labels().unwrap_or_default();

    println!("{:>8} {:>12} {:>12} {:>PRINT_WIDTH$}", "inst#", "actual", "predicted", "prob.");
    let mut n_correct = 0_usize;
    let mut n_labeled = 0_usize;
    for (i, (y, p)) in test.target().iter().zip(predictions).enumerate() {
        let actual = if y.is_nan() { "?" } else { names[*y as usize].as_str() };
        let (predicted, prob) = match p.label {
            Label::Class(k) => (names[k].as_str(), p.distribution[k]),
            _ => ("?", 0f64),
        };
        if !y.is_nan() {
            n_labeled += 1;
            if actual == predicted { n_correct += 1; }
        }
        println!(
            "{:>8} {:>12} {:>12} {}",
            i + 1,
            actual,
            predicted,
            format_fixed_width(prob, PRINT_WIDTH, PRINT_DECIMALS),
        );
    }

    let accuracy = if n_labeled == 0 { 0f64 } else {
        n_correct as f64 / n_labeled as f64
    };
    println!(
        "\n{} {}",
        "Accuracy:".bold(),
        format_fixed_width(accuracy, PRINT_WIDTH, PRINT_DECIMALS).as_str().bold().green(),
    );
}


fn report_values(test: &Sample, predictions: &[Prediction]) {
    println!("{:>8} {:>PRINT_WIDTH$} {:>PRINT_WIDTH$}", "inst#", "actual", "predicted");
    let mut sq_error = 0f64;
    let mut n_labeled = 0_usize;
    for (i, (y, p)) in test.target().iter().zip(predictions).enumerate() {
        let predicted = p.label.as_f64();
        if !y.is_nan() {
            n_labeled += 1;
            sq_error += (y - predicted).powi(2);
        }
        println!(
            "{:>8} {} {}",
            i + 1,
            format_fixed_width(*y, PRINT_WIDTH, PRINT_DECIMALS),
            format_fixed_width(predicted, PRINT_WIDTH, PRINT_DECIMALS),
        );
    }

    let rmse = if n_labeled == 0 { 0f64 } else {
        (sq_error / n_labeled as f64).sqrt()
    };
    println!(
        "\n{} {}",
        "RMSE:".bold(),
        format_fixed_width(rmse, PRINT_WIDTH, PRINT_DECIMALS).as_str().bold().green(),
    );
}
