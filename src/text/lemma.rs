// Lemmatizer trait: the linguistic collaborator behind optional lemmatization.
//
// The normalizer only decides which lemmas to keep; producing them is up to
// whatever linguistic model sits behind this trait.

use std::collections::HashMap;

use crate::error::Result;

/// Trait for reducing the words of a cleaned sentence to their base forms.
pub trait Lemmatizer: Send + Sync {
    /// Return one base form per whitespace-separated word, in order.
    fn lemmatize(&self, sentence: &str) -> Result<Vec<String>>;
}

/// Lemmatizer backed by a word -> lemma table. Words missing from the table
/// are returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct LookupLemmatizer {
    table: HashMap<String, String>,
}

impl LookupLemmatizer {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            table: pairs
                .into_iter()
                .map(|(word, lemma)| (word.to_string(), lemma.to_string()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Lemmatizer for LookupLemmatizer {
    fn lemmatize(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(sentence
            .split_whitespace()
            .map(|word| self.table.get(word).cloned().unwrap_or_else(|| word.to_string()))
            .collect())
    }
}
