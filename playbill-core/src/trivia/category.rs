//! Trivia categories and the string-typed key questions refer to them by

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A trivia category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A category reference as clients send it: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Number(i64),
    Text(String),
}

/// Category id in the textual form stored on each question.
///
/// Questions keep their category as text, so every comparison against a
/// category goes through this key rather than the integer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "CategoryRef")]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_owned())
    }

    /// Key exactly as a stored row holds it, surrounding whitespace included.
    pub fn stored(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<i64> for CategoryKey {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<CategoryRef> for CategoryKey {
    fn from(r: CategoryRef) -> Self {
        match r {
            CategoryRef::Number(id) => Self::from(id),
            CategoryRef::Text(text) => Self::new(text),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
