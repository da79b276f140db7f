use bayesian::{Class, ClassifierError, NaiveBayes, SafeScores};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use std::thread;

const EPS: f64 = 1e-9;

const VOCABULARY: &[&str] = &[
    "tall", "handsome", "rich", "bald", "poor", "ugly", "the", "man", "girl", "warm", "cold",
    "river", "stone", "quick", "slow",
];

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn good() -> Class {
    Class::from("Good")
}

fn bad() -> Class {
    Class::from("Bad")
}

fn good_bad() -> NaiveBayes {
    let nb = NaiveBayes::new([good(), bad()]).unwrap();
    nb.learn(&["tall", "handsome", "rich"], &good()).unwrap();
    nb.learn(&["bald", "poor", "ugly"], &bad()).unwrap();
    nb
}

fn random_document(rng: &mut StdRng, max_len: usize) -> Vec<&'static str> {
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
        .collect()
}

fn random_classifier(rng: &mut StdRng, classes: usize) -> NaiveBayes {
    let names: Vec<String> = (0..classes).map(|i| format!("c{i}")).collect();
    let nb = NaiveBayes::new(names.iter().map(String::as_str)).unwrap();
    for _ in 0..rng.random_range(0..40) {
        let class = Class::from(names[rng.random_range(0..classes)].as_str());
        let doc = random_document(rng, 12);
        nb.learn(&doc, &class).unwrap();
    }
    nb
}

#[test]
fn good_bad_scenario() {
    let nb = good_bad();

    let s = nb.log_scores(&["the", "tall", "man"]).unwrap();
    assert!(s.scores[0] > s.scores[1]);
    assert_eq!((s.likely, s.strict), (0, true));

    let s = nb.log_scores(&["the", "bad", "man"]).unwrap();
    assert_eq!(s.scores[0], s.scores[1]);
    assert_eq!((s.likely, s.strict), (0, false));
}

#[test]
fn long_unknown_document_underflows_safely() {
    let nb = NaiveBayes::new([good(), bad()]).unwrap();
    let doc = vec!["zyzzyva"; 1000];

    let safe = nb.safe_prob_scores(&doc).unwrap();
    assert!(
        matches!(safe, SafeScores::Underflow(_)),
        "expected underflow, got {safe:?}"
    );
    let scores = safe.into_scores();
    assert!(approx_eq(scores.scores.iter().sum(), 1.0, EPS));
    assert!(scores.scores.iter().all(|p| p.is_finite() && *p >= 0.0));

    let prob = nb.prob_scores(&doc).unwrap();
    assert!(prob.scores.iter().all(|p| approx_eq(*p, 0.5, EPS)));
    assert!(!prob.strict);
}

#[test]
fn scorers_agree_on_random_documents() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let classes = rng.random_range(2..5);
        let nb = random_classifier(&mut rng, classes);
        let doc = random_document(&mut rng, 30);

        let log = nb.log_scores(&doc).unwrap();
        let prob = nb.prob_scores(&doc).unwrap();
        let safe = nb.safe_prob_scores(&doc).unwrap();

        let safe_scores = safe.scores();
        assert!(approx_eq(safe_scores.scores.iter().sum(), 1.0, 1e-6));
        assert_eq!(safe_scores.likely, log.likely);
        assert_eq!(safe_scores.strict, log.strict);

        if !safe.is_underflow() {
            assert_eq!(prob.likely, log.likely);
            assert!(approx_eq(prob.scores.iter().sum(), 1.0, 1e-6));
        }
    }
}

#[test]
fn word_probabilities_stay_positive() {
    let mut rng = StdRng::seed_from_u64(7);
    let nb = random_classifier(&mut rng, 3);
    let mut words: Vec<&str> = VOCABULARY.to_vec();
    words.push("never-seen");
    for row in nb.word_frequencies(&words) {
        for p in row {
            assert!(p > 0.0 && p <= 1.0, "p = {p}");
        }
    }
}

#[test]
fn converted_weights_stay_positive_but_may_exceed_one() {
    let nb = NaiveBayes::new_tf_idf([good(), bad()]).unwrap();
    for _ in 0..10 {
        nb.learn(&["bald"], &bad()).unwrap();
    }
    nb.learn(&["w"], &good()).unwrap();
    nb.convert_terms_freq_to_tf_idf().unwrap();

    // weight = ln 2 * ln 12 over a total of 1 and a vocabulary of 1
    let expected = (2f64.ln() * 12f64.ln() + 1.0) / 2.0;
    let p = nb.word_frequencies(&["w"])[0][0];
    assert!(approx_eq(p, expected, 1e-12), "p = {p}");
    assert!(p > 1.0);
    for row in nb.word_frequencies(&["w", "bald", "never-seen"]) {
        assert!(row.iter().all(|p| *p > 0.0));
    }
}

#[test]
fn serialized_classifier_scores_identically() {
    let mut rng = StdRng::seed_from_u64(99);
    let nb = random_classifier(&mut rng, 4);
    let mut buf = Vec::new();
    nb.write_to(&mut buf).unwrap();
    let back = NaiveBayes::from_reader(Cursor::new(buf)).unwrap();

    for _ in 0..10 {
        let doc = random_document(&mut rng, 20);
        assert_eq!(back.log_scores(&doc).unwrap(), nb.log_scores(&doc).unwrap());
        assert_eq!(back.prob_scores(&doc).unwrap(), nb.prob_scores(&doc).unwrap());
    }
}

#[test]
fn tf_idf_conversion_formula() {
    let nb = NaiveBayes::new_tf_idf([good(), bad()]).unwrap();
    nb.learn(&["w", "x", "y", "z"], &good()).unwrap();
    nb.learn(&["w", "w", "x"], &good()).unwrap();
    nb.learn(&["w"], &good()).unwrap();
    nb.learn(&["x", "y"], &bad()).unwrap();

    let total = nb.word_count()[0];
    let learned = nb.learned();
    assert_eq!(learned, 4);
    nb.convert_terms_freq_to_tf_idf().unwrap();

    let idf = (learned as f64 / total).ln_1p();
    let expected: f64 = [0.25f64, 2.0 / 3.0, 1.0]
        .iter()
        .map(|tf| tf.ln_1p() * idf)
        .sum();
    let freqs = nb.words_by_class(&good()).unwrap();
    assert!(approx_eq(freqs["w"], expected, 1e-12));

    assert!(matches!(
        nb.convert_terms_freq_to_tf_idf(),
        Err(ClassifierError::AlreadyConverted)
    ));
}

#[test]
fn unconverted_tf_idf_classifier_refuses_to_score() {
    let nb = NaiveBayes::new_tf_idf([good(), bad()]).unwrap();
    nb.learn(&["tall"], &good()).unwrap();
    let err = nb.prob_scores(&["tall"]).unwrap_err();
    assert!(err.is_sequencing());
    assert!(matches!(err, ClassifierError::NotConverted));
}

#[test]
fn concurrent_learning_and_scoring() {
    let nb = good_bad();
    let writers = 4;
    let readers = 4;
    let rounds = 200;

    thread::scope(|s| {
        for w in 0..writers {
            let nb = &nb;
            s.spawn(move || {
                let class = if w % 2 == 0 { good() } else { bad() };
                for _ in 0..rounds {
                    nb.learn(&["quick", "river"], &class).unwrap();
                }
            });
        }
        for _ in 0..readers {
            let nb = &nb;
            s.spawn(move || {
                for _ in 0..rounds {
                    let safe = nb.safe_prob_scores(&["quick", "tall"]).unwrap();
                    assert!(approx_eq(safe.scores().scores.iter().sum(), 1.0, 1e-6));
                    let _ = nb.seen();
                }
            });
        }
    });

    assert_eq!(nb.learned(), 2 + (writers * rounds) as u64);
    assert_eq!(nb.seen(), (readers * rounds) as u64);
    let counts = nb.word_count();
    let expected = 3.0 + 2.0 * (writers / 2 * rounds) as f64;
    assert_eq!(counts, vec![expected, expected]);
}
