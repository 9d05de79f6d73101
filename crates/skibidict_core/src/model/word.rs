//! Word aggregate model.
//!
//! # Responsibility
//! - Define the materialized `Word` read model and the `WordInput` write
//!   payload used by create and full-replace update.
//! - Validate payloads at the boundary.
//!
//! # Invariants
//! - A word with no spellings and no definitions is valid.
//! - `spellings`, `definitions` and each definition's `tags` keep caller
//!   order; persistence stores and returns them in that order.
//! - Spellings and tags must not be blank. Descriptions may be empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated surrogate key of a word.
pub type WordId = i64;

/// One meaning of a word, with its ordered tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Definition {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tags: Vec::new(),
        }
    }

    /// Builder-style helper that appends tags in order.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// Fully materialized word aggregate as returned by every read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub spellings: Vec<String>,
    pub definitions: Vec<Definition>,
}

/// Complete desired state of a word's children.
///
/// Update is a destructive replace, so callers always send the whole
/// subtree. Missing lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInput {
    #[serde(default)]
    pub spellings: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl WordInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spelling(mut self, text: impl Into<String>) -> Self {
        self.spellings.push(text.into());
        self
    }

    pub fn definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Checks payload rules without touching storage.
    ///
    /// # Errors
    /// - `BlankSpelling` when a spelling is empty or whitespace-only.
    /// - `BlankTag` when a tag is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), WordValidationError> {
        for (index, spelling) in self.spellings.iter().enumerate() {
            if spelling.trim().is_empty() {
                return Err(WordValidationError::BlankSpelling { index });
            }
        }

        for (definition, item) in self.definitions.iter().enumerate() {
            for (index, tag) in item.tags.iter().enumerate() {
                if tag.trim().is_empty() {
                    return Err(WordValidationError::BlankTag { definition, index });
                }
            }
        }

        Ok(())
    }
}

impl From<Word> for WordInput {
    fn from(value: Word) -> Self {
        Self {
            spellings: value.spellings,
            definitions: value.definitions,
        }
    }
}

/// Validation failures for word payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordValidationError {
    BlankSpelling { index: usize },
    BlankTag { definition: usize, index: usize },
}

impl Display for WordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSpelling { index } => {
                write!(f, "spellings[{index}] must not be blank")
            }
            Self::BlankTag { definition, index } => {
                write!(f, "definitions[{definition}].tags[{index}] must not be blank")
            }
        }
    }
}

impl Error for WordValidationError {}
