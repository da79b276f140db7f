use crate::classifiers::{Class, bayes::NaiveBayes};

pub fn good() -> Class {
    Class::from("good")
}

pub fn bad() -> Class {
    Class::from("bad")
}

/// `good` learned "tall handsome rich", `bad` learned "bald poor ugly".
pub fn good_bad_classifier() -> NaiveBayes {
    let nb = NaiveBayes::new([good(), bad()]).expect("two distinct classes");
    nb.learn(&["tall", "handsome", "rich"], &good())
        .expect("known class");
    nb.learn(&["bald", "poor", "ugly"], &bad())
        .expect("known class");
    nb
}

/// Same documents as [`good_bad_classifier`] in tf-idf mode, not converted yet.
pub fn good_bad_tf_idf_classifier() -> NaiveBayes {
    let nb = NaiveBayes::new_tf_idf([good(), bad()]).expect("two distinct classes");
    nb.learn(&["tall", "handsome", "rich", "tall"], &good())
        .expect("known class");
    nb.learn(&["bald", "poor", "ugly"], &bad())
        .expect("known class");
    nb
}
