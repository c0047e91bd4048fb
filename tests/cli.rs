use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};


fn dataset(file: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(format!("tests/dataset/{file}"));
    path
}


fn vote(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vote"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}


/// Tests for the `vote` command.
#[cfg(test)]
pub mod cli_tests {
    use super::*;

    #[test]
    fn prints_the_usage_without_a_training_file() {
        let output = vote(&[]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage: vote -t <train.csv>"));
        assert!(stderr.contains("no value given for -t option"));
    }


    #[test]
    fn evaluates_on_a_test_file_with_the_training_codes() {
        let dir = tempfile::tempdir().unwrap();
        let test = dir.path().join("test.csv");
        // `pos` comes first here, unlike in the training file.
        fs::write(&test, "x1,x2,class\n7.0,0.5,pos\n2.0,4.0,neg\n")
            .unwrap();

        let train = dataset("toy.csv");
        let output = vote(&[
            "-t", train.to_str().unwrap(),
            "-T", test.to_str().unwrap(),
            "-B", "DecisionStump",
        ]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let accuracy = stdout.lines()
            .find(|line| line.starts_with("Accuracy:"))
            .and_then(|line| line.split_whitespace().nth(1));
        assert_eq!(accuracy, Some("1"));
    }


    #[test]
    fn rejects_a_test_file_with_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let test = dir.path().join("test.csv");
        fs::write(&test, "x1,x2,class\n7.0,0.5,maybe\n").unwrap();

        let train = dataset("toy.csv");
        let output = vote(&[
            "-t", train.to_str().unwrap(),
            "-T", test.to_str().unwrap(),
        ]);
        assert!(!output.status.success());
    }
}
