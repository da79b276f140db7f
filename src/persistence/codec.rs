use crate::classifiers::bayes::{ClassData, ClassifierState, NaiveBayes};
use crate::classifiers::{Class, ClassifierError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct EncodedClassifier {
    classes: Vec<Class>,
    learned: u64,
    seen: u64,
    datas: HashMap<Class, ClassData>,
    tf_idf: bool,
    did_convert: bool,
}

impl EncodedClassifier {
    fn from_state(state: ClassifierState, seen: u64) -> Self {
        Self {
            classes: state.classes,
            learned: state.learned,
            seen,
            datas: state.datas,
            tf_idf: state.tf_idf,
            did_convert: state.did_convert,
        }
    }

    fn into_classifier(self) -> Result<NaiveBayes, ClassifierError> {
        let state = ClassifierState {
            classes: self.classes,
            datas: self.datas,
            learned: self.learned,
            tf_idf: self.tf_idf,
            did_convert: self.did_convert,
        };
        state.validate()?;
        Ok(NaiveBayes::from_state(state, self.seen))
    }
}

/// I/O failures inside serde_json are handed back as the original I/O error.
pub(crate) fn json_error(err: serde_json::Error) -> ClassifierError {
    if err.is_io() {
        ClassifierError::Io(err.into())
    } else {
        ClassifierError::Encoding(err)
    }
}

impl NaiveBayes {
    /// Serializes the whole classifier, counters and mode flags included.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ClassifierError> {
        let (state, seen) = self.snapshot();
        let encoded = EncodedClassifier::from_state(state, seen);
        serde_json::to_writer(writer, &encoded).map_err(json_error)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ClassifierError> {
        let encoded: EncodedClassifier = serde_json::from_reader(reader).map_err(json_error)?;
        encoded.into_classifier()
    }

    /// Writes the classifier to `path`, creating or truncating the file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        debug!("wrote classifier to {}", path.display());
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let nb = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!(
            "read classifier with {} classes from {}",
            nb.classes().len(),
            path.display()
        );
        Ok(nb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{bad, good, good_bad_classifier, good_bad_tf_idf_classifier};
    use std::io::{Cursor, ErrorKind};
    use tempfile::tempdir;

    fn round_trip(nb: &NaiveBayes) -> NaiveBayes {
        let mut buf = Vec::new();
        nb.write_to(&mut buf).unwrap();
        NaiveBayes::from_reader(Cursor::new(buf)).unwrap()
    }

    #[test]
    fn round_trip_keeps_scores_and_counters() {
        let nb = good_bad_classifier();
        nb.observe("tall", 2, &good()).unwrap();
        nb.log_scores(&["warm"]).unwrap();

        let back = round_trip(&nb);
        assert_eq!(back.classes(), nb.classes());
        assert_eq!(back.learned(), 2);
        assert_eq!(back.seen(), 1);
        assert_eq!(back.word_count(), nb.word_count());
        assert_eq!(
            back.words_by_class(&bad()).unwrap(),
            nb.words_by_class(&bad()).unwrap()
        );

        let doc = ["the", "tall", "rich", "poor", "man"];
        assert_eq!(back.log_scores(&doc).unwrap(), nb.log_scores(&doc).unwrap());
        assert_eq!(back.prob_scores(&doc).unwrap(), nb.prob_scores(&doc).unwrap());
        assert_eq!(
            back.safe_prob_scores(&doc).unwrap(),
            nb.safe_prob_scores(&doc).unwrap()
        );
    }

    #[test]
    fn round_trip_keeps_tf_idf_lifecycle() {
        let nb = good_bad_tf_idf_classifier();
        let back = round_trip(&nb);
        assert!(back.is_tf_idf());
        assert!(!back.did_convert());
        assert!(matches!(
            back.log_scores(&["tall"]).unwrap_err(),
            ClassifierError::NotConverted
        ));

        nb.convert_terms_freq_to_tf_idf().unwrap();
        back.convert_terms_freq_to_tf_idf().unwrap();
        let doc = ["tall", "ugly"];
        assert_eq!(back.log_scores(&doc).unwrap(), nb.log_scores(&doc).unwrap());

        let converted = round_trip(&nb);
        assert!(converted.did_convert());
        assert!(matches!(
            converted.convert_terms_freq_to_tf_idf().unwrap_err(),
            ClassifierError::AlreadyConverted
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let nb = good_bad_classifier();
        nb.write_to_file(&path).unwrap();
        // overwrite truncates
        nb.write_to_file(&path).unwrap();

        let back = NaiveBayes::from_file(&path).unwrap();
        let doc = ["tall", "man"];
        assert_eq!(back.log_scores(&doc).unwrap(), nb.log_scores(&doc).unwrap());
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = NaiveBayes::from_file("no/such/model.json").unwrap_err();
        match err {
            ClassifierError::Io(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        let err = NaiveBayes::from_reader(Cursor::new(b"not a classifier".to_vec())).unwrap_err();
        assert!(matches!(err, ClassifierError::Encoding(_)));
    }

    #[test]
    fn decoded_state_is_validated() {
        let raw = r#"{"classes":["a"],"learned":0,"seen":0,
            "datas":{"a":{"freqs":{},"total":0.0}},"tf_idf":false,"did_convert":false}"#;
        let err = NaiveBayes::from_reader(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, ClassifierError::TooFewClasses(1)));

        let raw = r#"{"classes":["a","b"],"learned":0,"seen":0,
            "datas":{"a":{"freqs":{},"total":0.0}},"tf_idf":false,"did_convert":false}"#;
        let err = NaiveBayes::from_reader(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, ClassifierError::Corrupt(_)));
    }
}
