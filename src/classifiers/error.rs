use crate::classifiers::Class;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("provide at least two classes, got {0}")]
    TooFewClasses(usize),

    #[error("class '{0}' is listed more than once")]
    DuplicateClass(Class),

    #[error("class '{0}' already exists")]
    ClassExists(Class),

    #[error("unknown class '{0}'")]
    UnknownClass(Class),

    #[error("term frequencies were already converted to tf-idf; reset and relearn to convert again")]
    AlreadyConverted,

    #[error("tf-idf classifier must be converted with convert_terms_freq_to_tf_idf before scoring")]
    NotConverted,

    #[error("classifier was not built in tf-idf mode")]
    NotTfIdf,

    #[error("corrupt classifier data: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode classifier data: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ClassifierError {
    /// Mode-sequencing violations of the tf-idf lifecycle.
    pub fn is_sequencing(&self) -> bool {
        matches!(
            self,
            ClassifierError::AlreadyConverted
                | ClassifierError::NotConverted
                | ClassifierError::NotTfIdf
        )
    }
}
