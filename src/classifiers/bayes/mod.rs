mod class_data;
mod naive_bayes;
pub mod priors;
mod scoring;
pub mod tf_idf;

pub use class_data::{ClassData, DEFAULT_PROB};
pub use naive_bayes::NaiveBayes;
pub(crate) use naive_bayes::ClassifierState;
pub use scoring::{SafeScores, Scores, arg_max, normalize_log_scores};
