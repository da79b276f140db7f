use crate::classifiers::bayes::class_data::ClassData;
use std::collections::HashMap;

/// Term frequency of every distinct word of a document:
/// occurrences / document length.
pub fn document_term_frequencies<S: AsRef<str>>(document: &[S]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for word in document {
        *counts.entry(word.as_ref()).or_insert(0.0) += 1.0;
    }
    let len = document.len() as f64;
    for count in counts.values_mut() {
        *count /= len;
    }
    counts
}

/// Records the per-document tf samples of `document` into `data`.
pub(crate) fn record_samples<S: AsRef<str>>(data: &mut ClassData, document: &[S]) {
    for (word, tf) in document_term_frequencies(document) {
        data.push_tf_sample(word, tf);
    }
}

/// Smoothed tf-idf weight of a single tf sample.
///
/// The idf part divides the number of learned documents (over all classes)
/// by the raw word total of the class.
#[inline]
pub fn tf_idf_weight(tf: f64, learned: u64, class_total: f64) -> f64 {
    tf.ln_1p() * (learned as f64 / class_total).ln_1p()
}

/// Rewrites every tf sample of `data` into its tf-idf weight and replaces the
/// word's frequency with the sum of the weights. `total` is left untouched.
pub(crate) fn convert(data: &mut ClassData, learned: u64) {
    let class_total = data.total;
    let ClassData {
        freqs, freq_tfs, ..
    } = data;
    for (word, samples) in freq_tfs.iter_mut() {
        let mut weight_sum = 0.0;
        for sample in samples.iter_mut() {
            *sample = tf_idf_weight(*sample, learned, class_total);
            weight_sum += *sample;
        }
        freqs.insert(word.clone(), weight_sum);
    }
}
