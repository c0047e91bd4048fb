use std::env;
use std::io;

use minivote::prelude::*;
use minivote::{AttributeKind, TargetKind};


/// Tests for `SampleReader`.
#[cfg(test)]
pub mod sample_reader_tests {
    use super::*;

    #[test]
    fn toy() {
        let mut path = env::current_dir().unwrap();
        path.push("tests/dataset/toy.csv");

        let sample = SampleReader::new()
            .file(path)
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap();

        assert_eq!(sample.shape(), (9, 2));
        assert_eq!(sample.target_kind(), TargetKind::Categorical { n_class: 2 });
        assert_eq!(
            sample.schema().target().labels().unwrap(),
            &["neg".to_string(), "pos".to_string()]
        );
        assert!(sample.has_missing_values());
        assert!(sample.has_missing_target());
        assert!(sample["x2"][2].is_nan());
        assert_eq!(sample["x1"][8], 4.5);
        assert_eq!(sample.class_counts(), vec![4, 4]);

        let clean = sample.remove_missing_target();
        assert_eq!(clean.shape(), (8, 2));
        assert!(!clean.has_missing_target());
    }


    #[test]
    fn without_header() {
        let csv = "0.5,red,1\n1.5,blue,0\n?,red,1\n";
        let sample = SampleReader::<&str, _>::new()
            .target_feature("Feat. [3]")
            .categorical_target(true)
            .read_from(csv.as_bytes())
            .unwrap();

        let schema = sample.schema();
        assert_eq!(schema.n_feature(), 2);
        assert_eq!(schema.features()[0].name(), "Feat. [1]");
        assert_eq!(schema.features()[0].kind(), &AttributeKind::Numeric);
        assert_eq!(
            schema.features()[1].labels().unwrap(),
            &["red".to_string(), "blue".to_string()]
        );
        // Labels are numbered in order of first appearance.
        assert_eq!(schema.target().index_of("1"), Some(0));
        assert_eq!(sample.target(), &[0.0, 1.0, 0.0]);

        let instance = sample.instance(2);
        assert!(instance.is_missing(0));
        assert_eq!(instance.target(), Some(0.0));
    }


    #[test]
    fn numeric_target_is_inferred() {
        let mut path = env::current_dir().unwrap();
        path.push("tests/dataset/regression.csv");

        let sample = SampleReader::new()
            .file(path)
            .has_header(true)
            .target_feature("y")
            .read()
            .unwrap();
        assert_eq!(sample.target_kind(), TargetKind::Numeric);
        assert_eq!(sample.target()[3], 5.0);
    }


    #[test]
    fn malformed_files_are_rejected() {
        let short_row = "a,b,class\n1,2,x\n3,y\n";
        let err = SampleReader::<&str, _>::new()
            .has_header(true)
            .target_feature("class")
            .read_from(short_row.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let no_target = "a,b\n1,2\n";
        let err = SampleReader::<&str, _>::new()
            .has_header(true)
            .target_feature("class")
            .read_from(no_target.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let text_target = "a,class\n1,x\n";
        let err = SampleReader::<&str, _>::new()
            .has_header(true)
            .target_feature("class")
            .categorical_target(false)
            .read_from(text_target.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }


    #[test]
    fn a_test_file_shares_the_training_codes() {
        let train = "color,size,class\nred,1,a\nblue,2,b\n";
        let train = SampleReader::<&str, _>::new()
            .has_header(true)
            .target_feature("class")
            .read_from(train.as_bytes())
            .unwrap();

        // Columns in another order, labels in another order.
        let test = "class,size,color\nb,3,blue\n?,4,red\na,5,?\n";
        let test = SampleReader::<&str, &str>::new()
            .has_header(true)
            .schema(train.schema().clone())
            .read_from(test.as_bytes())
            .unwrap();

        assert!(test.schema().equal_headers(train.schema()));
        assert_eq!(test.features()[0][0], 1.0);
        assert_eq!(test.features()[0][1], 0.0);
        assert!(test.features()[0][2].is_nan());
        assert_eq!(test.features()[1][2], 5.0);
        assert_eq!(test.target()[0], 1.0);
        assert!(test.target()[1].is_nan());
    }


    #[test]
    fn labels_outside_the_schema_are_rejected() {
        let train = "color,class\nred,a\nblue,b\n";
        let train = SampleReader::<&str, _>::new()
            .has_header(true)
            .target_feature("class")
            .read_from(train.as_bytes())
            .unwrap();

        let unknown = "color,class\ngreen,a\n";
        let err = SampleReader::<&str, &str>::new()
            .has_header(true)
            .schema(train.schema().clone())
            .read_from(unknown.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let no_column = "class\na\n";
        let err = SampleReader::<&str, &str>::new()
            .has_header(true)
            .schema(train.schema().clone())
            .read_from(no_column.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }


    #[test]
    fn missing_file() {
        let err = SampleReader::new()
            .file("tests/dataset/no_such_file.csv")
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
