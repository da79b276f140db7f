use crate::classifiers::bayes::class_data::ClassData;

/// Per-class scores of a document, indexed in class order, together with the
/// most likely class.
///
/// `strict` is false when another class reached the same maximum score; the
/// reported `likely` is then the lowest index among the tied classes.
#[derive(Clone, Debug, PartialEq)]
pub struct Scores {
    pub scores: Vec<f64>,
    pub likely: usize,
    pub strict: bool,
}

impl Scores {
    fn from_scores(scores: Vec<f64>) -> Self {
        let (likely, strict) = arg_max(&scores);
        Self {
            scores,
            likely,
            strict,
        }
    }
}

/// Outcome of underflow-checked scoring.
///
/// Both variants carry probabilities summing to 1 and a class taken from the
/// log domain. `Underflow` means the linear-domain product lost precision, so
/// the probabilities were rebuilt from the log scores and their magnitudes
/// should not be trusted as much.
#[derive(Clone, Debug, PartialEq)]
pub enum SafeScores {
    Exact(Scores),
    Underflow(Scores),
}

impl SafeScores {
    pub fn scores(&self) -> &Scores {
        match self {
            SafeScores::Exact(s) | SafeScores::Underflow(s) => s,
        }
    }

    pub fn into_scores(self) -> Scores {
        match self {
            SafeScores::Exact(s) | SafeScores::Underflow(s) => s,
        }
    }

    pub fn is_underflow(&self) -> bool {
        matches!(self, SafeScores::Underflow(_))
    }
}

/// Index of the largest score and whether it is unique.
pub fn arg_max(scores: &[f64]) -> (usize, bool) {
    let mut likely = 0;
    let mut strict = true;
    for i in 1..scores.len() {
        if scores[likely] < scores[i] {
            likely = i;
            strict = true;
        } else if scores[likely] == scores[i] {
            strict = false;
        }
    }
    (likely, strict)
}

pub(crate) fn log_scores<S: AsRef<str>>(
    priors: &[f64],
    datas: &[&ClassData],
    document: &[S],
) -> Scores {
    let scores = datas
        .iter()
        .zip(priors)
        .map(|(data, prior)| {
            document
                .iter()
                .fold(prior.ln(), |acc, w| acc + data.word_probability(w.as_ref()).ln())
        })
        .collect();
    Scores::from_scores(scores)
}

pub(crate) fn prob_scores<S: AsRef<str>>(
    priors: &[f64],
    datas: &[&ClassData],
    document: &[S],
) -> Scores {
    let raw: Vec<f64> = datas
        .iter()
        .zip(priors)
        .map(|(data, prior)| {
            document
                .iter()
                .fold(*prior, |acc, w| acc * data.word_probability(w.as_ref()))
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    if sum == 0.0 {
        let n = raw.len();
        return Scores {
            scores: vec![1.0 / n as f64; n],
            likely: 0,
            strict: false,
        };
    }
    Scores::from_scores(raw.into_iter().map(|s| s / sum).collect())
}

pub(crate) fn safe_prob_scores<S: AsRef<str>>(
    priors: &[f64],
    datas: &[&ClassData],
    document: &[S],
) -> SafeScores {
    let n = datas.len();
    let mut linear = Vec::with_capacity(n);
    let mut logs = Vec::with_capacity(n);
    for (data, prior) in datas.iter().zip(priors) {
        let mut score = *prior;
        let mut log_score = prior.ln();
        for word in document {
            let p = data.word_probability(word.as_ref());
            score *= p;
            log_score += p.ln();
        }
        linear.push(score);
        logs.push(log_score);
    }

    let (log_likely, log_strict) = arg_max(&logs);
    let sum: f64 = linear.iter().sum();
    if sum != 0.0 {
        for score in linear.iter_mut() {
            *score /= sum;
        }
        let (likely, strict) = arg_max(&linear);
        if likely == log_likely && strict == log_strict {
            return SafeScores::Exact(Scores {
                scores: linear,
                likely,
                strict,
            });
        }
    }

    SafeScores::Underflow(Scores {
        scores: normalize_log_scores(&logs),
        likely: log_likely,
        strict: log_strict,
    })
}

/// Turns log scores into probabilities summing to 1, shifting by the maximum
/// before exponentiating so the largest term is exactly 1.
pub fn normalize_log_scores(logs: &[f64]) -> Vec<f64> {
    let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logs.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
