//! A naive Bayes text classifier.
//!
//! Documents are bags of words learned against a fixed set of mutually
//! exclusive classes. Scoring is available in the log domain, the linear
//! probability domain and an underflow-checked hybrid of the two.

pub mod classifiers;
pub mod config;
pub mod persistence;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use classifiers::bayes::{DEFAULT_PROB, NaiveBayes, SafeScores, Scores};
pub use classifiers::{Class, ClassifierError};
pub use config::ClassifierConfig;
