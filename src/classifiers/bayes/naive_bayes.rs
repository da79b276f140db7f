use crate::classifiers::bayes::class_data::ClassData;
use crate::classifiers::bayes::scoring::{self, SafeScores, Scores};
use crate::classifiers::bayes::{priors, tf_idf};
use crate::classifiers::{Class, ClassifierError};
use log::{debug, trace, warn};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything guarded by the classifier lock.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ClassifierState {
    pub(crate) classes: Vec<Class>,
    pub(crate) datas: HashMap<Class, ClassData>,
    pub(crate) learned: u64,
    pub(crate) tf_idf: bool,
    pub(crate) did_convert: bool,
}

impl ClassifierState {
    fn new(classes: Vec<Class>, tf_idf: bool) -> Result<Self, ClassifierError> {
        validate_classes(&classes)?;
        let datas = classes
            .iter()
            .map(|c| (c.clone(), ClassData::new()))
            .collect();
        Ok(Self {
            classes,
            datas,
            learned: 0,
            tf_idf,
            did_convert: false,
        })
    }

    /// Checks a state that did not come out of `new`, e.g. a decoded one.
    pub(crate) fn validate(&self) -> Result<(), ClassifierError> {
        validate_classes(&self.classes)?;
        if let Some(missing) = self.classes.iter().find(|c| !self.datas.contains_key(*c)) {
            return Err(ClassifierError::Corrupt(format!(
                "no statistics for class '{missing}'"
            )));
        }
        if self.datas.len() != self.classes.len() {
            return Err(ClassifierError::Corrupt(
                "statistics present for classes outside the class list".into(),
            ));
        }
        if self.did_convert && !self.tf_idf {
            return Err(ClassifierError::Corrupt(
                "converted flag set on a classifier without tf-idf".into(),
            ));
        }
        Ok(())
    }

    /// Class data in class order.
    fn ordered(&self) -> Vec<&ClassData> {
        self.classes
            .iter()
            .filter_map(|c| self.datas.get(c))
            .collect()
    }

    fn data(&self, class: &Class) -> Result<&ClassData, ClassifierError> {
        self.datas
            .get(class)
            .ok_or_else(|| ClassifierError::UnknownClass(class.clone()))
    }

    fn data_mut(&mut self, class: &Class) -> Result<&mut ClassData, ClassifierError> {
        self.datas
            .get_mut(class)
            .ok_or_else(|| ClassifierError::UnknownClass(class.clone()))
    }

    fn ensure_learnable(&self) -> Result<(), ClassifierError> {
        if self.tf_idf && self.did_convert {
            return Err(ClassifierError::AlreadyConverted);
        }
        Ok(())
    }

    fn ensure_scorable(&self) -> Result<(), ClassifierError> {
        if self.tf_idf && !self.did_convert {
            return Err(ClassifierError::NotConverted);
        }
        Ok(())
    }
}

fn validate_classes(classes: &[Class]) -> Result<(), ClassifierError> {
    if classes.len() < 2 {
        return Err(ClassifierError::TooFewClasses(classes.len()));
    }
    let mut seen = HashSet::with_capacity(classes.len());
    for class in classes {
        if !seen.insert(class) {
            return Err(ClassifierError::DuplicateClass(class.clone()));
        }
    }
    Ok(())
}

/// A naive Bayes classifier that can be shared between threads.
///
/// Learning and other mutations take the write lock; scoring and
/// introspection take the read lock. The number of scoring calls is kept in an
/// atomic outside the lock so it can be read at any time.
#[derive(Debug)]
pub struct NaiveBayes {
    state: RwLock<ClassifierState>,
    seen: AtomicU64,
}

impl NaiveBayes {
    /// A classifier over `classes`, in that order. Needs at least two
    /// distinct classes.
    pub fn new<I, C>(classes: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        Self::with_mode(classes, false)
    }

    /// Like [`NaiveBayes::new`], but words are weighted by tf-idf. Such a
    /// classifier must be converted with
    /// [`NaiveBayes::convert_terms_freq_to_tf_idf`] once learning is done
    /// and before it can score anything.
    pub fn new_tf_idf<I, C>(classes: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        Self::with_mode(classes, true)
    }

    pub fn with_mode<I, C>(classes: I, tf_idf: bool) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        let classes: Vec<Class> = classes.into_iter().map(Into::into).collect();
        let state = ClassifierState::new(classes, tf_idf)?;
        debug!(
            "created classifier with {} classes (tf-idf: {tf_idf})",
            state.classes.len()
        );
        Ok(Self::from_state(state, 0))
    }

    pub(crate) fn from_state(state: ClassifierState, seen: u64) -> Self {
        Self {
            state: RwLock::new(state),
            seen: AtomicU64::new(seen),
        }
    }

    /// A consistent copy of the guarded state and the seen counter.
    pub(crate) fn snapshot(&self) -> (ClassifierState, u64) {
        let state = self.state.read();
        (state.clone(), self.seen())
    }

    pub(crate) fn class_data(&self, class: &Class) -> Result<ClassData, ClassifierError> {
        self.state.read().data(class).cloned()
    }

    /// Replaces the statistics of `class`, counting the merge as one learned
    /// document.
    pub(crate) fn replace_class_data(
        &self,
        class: &Class,
        data: ClassData,
    ) -> Result<(), ClassifierError> {
        let mut state = self.state.write();
        *state.data_mut(class)? = data;
        state.learned += 1;
        Ok(())
    }

    pub fn add_class(&self, class: impl Into<Class>) -> Result<(), ClassifierError> {
        let class = class.into();
        let mut state = self.state.write();
        if state.did_convert {
            return Err(ClassifierError::AlreadyConverted);
        }
        if state.datas.contains_key(&class) {
            return Err(ClassifierError::ClassExists(class));
        }
        debug!("adding class '{class}'");
        state.datas.insert(class.clone(), ClassData::new());
        state.classes.push(class);
        Ok(())
    }

    /// Learns one document of `class`. Every occurrence counts, so repeated
    /// words add up.
    pub fn learn<S: AsRef<str>>(
        &self,
        document: &[S],
        class: &Class,
    ) -> Result<(), ClassifierError> {
        let mut state = self.state.write();
        state.ensure_learnable()?;
        let weighted = state.tf_idf;
        let data = state.data_mut(class)?;
        if weighted {
            tf_idf::record_samples(data, document);
        }
        data.learn(document);
        state.learned += 1;
        trace!("learned {} words for '{class}'", document.len());
        Ok(())
    }

    /// Adds `count` occurrences of `word` to `class` without counting a
    /// learned document and without tf samples.
    pub fn observe(&self, word: &str, count: u64, class: &Class) -> Result<(), ClassifierError> {
        let mut state = self.state.write();
        state.ensure_learnable()?;
        state.data_mut(class)?.observe(word, count);
        trace!("observed '{word}' x{count} for '{class}'");
        Ok(())
    }

    /// Replaces every word frequency with its tf-idf score. Can only run once
    /// per learning cycle; see [`NaiveBayes::reset`].
    pub fn convert_terms_freq_to_tf_idf(&self) -> Result<(), ClassifierError> {
        let mut state = self.state.write();
        if !state.tf_idf {
            return Err(ClassifierError::NotTfIdf);
        }
        if state.did_convert {
            return Err(ClassifierError::AlreadyConverted);
        }
        let learned = state.learned;
        for data in state.datas.values_mut() {
            tf_idf::convert(data, learned);
        }
        state.did_convert = true;
        debug!("converted term frequencies to tf-idf over {learned} documents");
        Ok(())
    }

    /// Forgets all learned statistics, keeping the classes and the mode.
    pub fn reset(&self) {
        let mut state = self.state.write();
        for data in state.datas.values_mut() {
            *data = ClassData::new();
        }
        state.learned = 0;
        state.did_convert = false;
        debug!("reset classifier statistics");
    }

    pub fn priors(&self) -> Vec<f64> {
        let state = self.state.read();
        priors::priors(state.ordered())
    }

    /// Log-domain scores: log P(C_j) + sum log P(W_i|C_j). Not probabilities,
    /// but never underflow.
    pub fn log_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores, ClassifierError> {
        self.score_with(document, scoring::log_scores)
    }

    /// Normalized probabilities. Falls back to a uniform, non-strict result
    /// when every class underflows to zero.
    pub fn prob_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores, ClassifierError> {
        self.score_with(document, scoring::prob_scores)
    }

    /// Probabilities checked against the log domain. See [`SafeScores`].
    pub fn safe_prob_scores<S: AsRef<str>>(
        &self,
        document: &[S],
    ) -> Result<SafeScores, ClassifierError> {
        let outcome = self.score_with(document, scoring::safe_prob_scores)?;
        if outcome.is_underflow() {
            warn!(
                "probability underflow while scoring a {} word document",
                document.len()
            );
        }
        Ok(outcome)
    }

    fn score_with<S, T, F>(&self, document: &[S], score: F) -> Result<T, ClassifierError>
    where
        S: AsRef<str>,
        F: FnOnce(&[f64], &[&ClassData], &[S]) -> T,
    {
        let state = self.state.read();
        state.ensure_scorable()?;
        let datas = state.ordered();
        let priors = priors::priors(datas.iter().copied());
        let out = score(&priors, &datas, document);
        self.seen.fetch_add(1, Ordering::Relaxed);
        Ok(out)
    }

    /// `[class][word]` matrix of P(W|C).
    pub fn word_frequencies<S: AsRef<str>>(&self, words: &[S]) -> Vec<Vec<f64>> {
        let state = self.state.read();
        state
            .ordered()
            .into_iter()
            .map(|data| {
                words
                    .iter()
                    .map(|w| data.word_probability(w.as_ref()))
                    .collect()
            })
            .collect()
    }

    pub fn words_by_class(&self, class: &Class) -> Result<HashMap<String, f64>, ClassifierError> {
        Ok(self.state.read().data(class)?.freqs().clone())
    }

    /// Raw word total of every class, in class order.
    pub fn word_count(&self) -> Vec<f64> {
        let state = self.state.read();
        state.ordered().into_iter().map(ClassData::total).collect()
    }

    pub fn classes(&self) -> Vec<Class> {
        self.state.read().classes.clone()
    }

    /// Number of documents learned over the classifier's lifetime.
    pub fn learned(&self) -> u64 {
        self.state.read().learned
    }

    /// Number of scoring calls over the classifier's lifetime.
    pub fn seen(&self) -> u64 {
        self.seen.load(Ordering::Relaxed)
    }

    pub fn is_tf_idf(&self) -> bool {
        self.state.read().tf_idf
    }

    pub fn did_convert(&self) -> bool {
        self.state.read().did_convert
    }
}
