use crate::classifiers::{Class, ClassifierError, bayes::NaiveBayes};
use crate::persistence::json_error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How to build a classifier: its classes in score order and whether words
/// are weighted by tf-idf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub classes: Vec<Class>,
    #[serde(default)]
    pub tf_idf: bool,
}

impl ClassifierConfig {
    pub fn new<I, C>(classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            tf_idf: false,
        }
    }

    pub fn with_tf_idf(mut self, tf_idf: bool) -> Self {
        self.tf_idf = tf_idf;
        self
    }

    /// Reads a JSON config such as `{"classes": ["spam", "ham"], "tf_idf": true}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(json_error)
    }

    pub fn build(&self) -> Result<NaiveBayes, ClassifierError> {
        NaiveBayes::with_mode(self.classes.iter().cloned(), self.tf_idf)
    }
}
