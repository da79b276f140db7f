use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A class label. Two classes are the same class when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Class(String);

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(&self.0)
    }
}

impl From<&str> for Class {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Class {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Class {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Class {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
