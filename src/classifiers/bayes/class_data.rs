use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Probability reported for any word of a class that has no statistics yet.
pub const DEFAULT_PROB: f64 = 1e-11;

/// Word statistics of a single class.
///
/// `freqs` holds the accumulated weight of every word. In plain mode that is
/// an occurrence count and `total` is the sum of all of them. After a tf-idf
/// conversion `freqs` holds tf-idf scores while `total` keeps the raw
/// occurrence count it had before the conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassData {
    pub(crate) freqs: HashMap<String, f64>,
    #[serde(default)]
    pub(crate) freq_tfs: HashMap<String, Vec<f64>>,
    pub(crate) total: f64,
}

impl ClassData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freqs(&self) -> &HashMap<String, f64> {
        &self.freqs
    }

    pub fn freq_tfs(&self) -> &HashMap<String, Vec<f64>> {
        &self.freq_tfs
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn vocabulary_size(&self) -> usize {
        self.freqs.len()
    }

    /// P(W|C), Laplace smoothed over the observed vocabulary of the class.
    ///
    /// Within (0, 1] only while `freqs` holds raw counts. After a tf-idf
    /// conversion the weights no longer sum to `total`, so the result stays
    /// positive but may exceed 1.
    pub fn word_probability(&self, word: &str) -> f64 {
        let vocabulary = self.vocabulary_size();
        if self.total == 0.0 || vocabulary == 0 {
            return DEFAULT_PROB;
        }
        let count = self.freqs.get(word).copied().unwrap_or(0.0);
        (count + 1.0) / (self.total + vocabulary as f64)
    }

    #[inline]
    pub(crate) fn add_word(&mut self, word: &str, weight: f64) {
        match self.freqs.get_mut(word) {
            Some(freq) => *freq += weight,
            None => {
                self.freqs.insert(word.to_string(), weight);
            }
        }
        self.total += weight;
    }

    pub(crate) fn learn<S: AsRef<str>>(&mut self, document: &[S]) {
        for word in document {
            self.add_word(word.as_ref(), 1.0);
        }
    }

    pub(crate) fn observe(&mut self, word: &str, count: u64) {
        self.add_word(word, count as f64);
    }

    pub(crate) fn push_tf_sample(&mut self, word: &str, tf: f64) {
        match self.freq_tfs.get_mut(word) {
            Some(samples) => samples.push(tf),
            None => {
                self.freq_tfs.insert(word.to_string(), vec![tf]);
            }
        }
    }
}
