// Text normalization: raw documents into cleaned text and a token stream.
//
// Each document goes through the same fixed sequence: lower-case, strip
// diacritics, expand English contractions, drop everything that is not a
// letter or whitespace, collapse whitespace, remove stop words, optionally
// lemmatize, then tokenize. Diacritics are always stripped before
// lemmatization so the lemmatizer sees the same text the stop-word filter saw.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};
use tokenizers::normalizers::{StripAccents, NFD};
use tokenizers::{NormalizedString, Normalizer as _};
use tracing::{debug, info};

use super::lemma::Lemmatizer;
use crate::error::{AnalysisError, Result};

/// Words (and lemmas) of this many characters or fewer are dropped.
const MIN_TOKEN_CHARS: usize = 2;

/// Languages with a stop-word list and contraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    English,
}

impl Language {
    pub const SUPPORTED: [&'static str; 2] = ["spanish", "english"];

    fn stop_word_set(self) -> Result<HashSet<String>> {
        let words: Vec<String> = match self {
            Language::Spanish => get(LANGUAGE::Spanish),
            Language::English => get(LANGUAGE::English),
        };
        // Cleaned text has no diacritics, so the list must not either
        words
            .iter()
            .map(|w| strip_diacritics(&w.to_lowercase()))
            .collect()
    }
}

impl FromStr for Language {
    type Err = AnalysisError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "spanish" => Ok(Language::Spanish),
            "english" => Ok(Language::English),
            other => Err(AnalysisError::invalid_input(format!(
                "unsupported language '{other}'; available: {}",
                Language::SUPPORTED.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Spanish => write!(f, "spanish"),
            Language::English => write!(f, "english"),
        }
    }
}

/// One document after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    pub cleaned: String,
    pub tokens: Vec<String>,
}

/// All documents after normalization, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCorpus {
    pub documents: Vec<NormalizedDocument>,
}

impl NormalizedCorpus {
    pub fn cleaned_texts(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.cleaned.clone()).collect()
    }

    /// Tokens of every document concatenated in document order.
    pub fn token_stream(&self) -> Vec<String> {
        self.documents
            .iter()
            .flat_map(|d| d.tokens.iter().cloned())
            .collect()
    }
}

/// Strip diacritics: canonical decomposition, then drop nonspacing marks
/// in any script.
///
/// Idempotent: decomposed text without marks decomposes to itself.
pub fn strip_diacritics(text: &str) -> Result<String> {
    let mut normalized = NormalizedString::from(text);
    NFD.normalize(&mut normalized)
        .and_then(|()| StripAccents.normalize(&mut normalized))
        .map_err(|e| AnalysisError::invalid_input(format!("cannot strip diacritics: {e}")))?;
    Ok(normalized.get().to_string())
}

pub struct Normalizer {
    language: Language,
    lemmatize: bool,
    lemmatizer: Option<Box<dyn Lemmatizer>>,
    stop_words: HashSet<String>,
    contractions: Vec<(Regex, &'static str)>,
    symbols: Regex,
}

impl Normalizer {
    /// Build a normalizer for a language tag such as "spanish" or "english".
    pub fn new(language_tag: &str, lemmatize: bool) -> Result<Self> {
        let language: Language = language_tag.parse()?;
        Self::for_language(language, lemmatize)
    }

    pub fn for_language(language: Language, lemmatize: bool) -> Result<Self> {
        let contractions = [
            (r"n['’]t\b", " not"),
            (r"['’]re\b", " are"),
            (r"['’]m\b", " am"),
            (r"['’]ll\b", " will"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("contraction pattern is valid"),
                replacement,
            )
        })
        .collect();

        Ok(Self {
            language,
            lemmatize,
            lemmatizer: None,
            stop_words: language.stop_word_set()?,
            contractions,
            symbols: Regex::new(r"[^a-zñáéíóúü\s]").expect("symbol pattern is valid"),
        })
    }

    /// Attach the linguistic collaborator used when lemmatization is on.
    pub fn with_lemmatizer(mut self, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Normalize every document and return the cleaned texts with their tokens.
    pub fn normalize(&self, texts: &[String]) -> Result<NormalizedCorpus> {
        if texts.is_empty() {
            return Err(AnalysisError::invalid_input("document list is empty"));
        }
        let lemmatizer = match (self.lemmatize, &self.lemmatizer) {
            (true, None) => {
                return Err(AnalysisError::upstream_unavailable(
                    "lemmatization requested but no lemmatizer is loaded",
                ))
            }
            (true, Some(l)) => Some(&**l),
            (false, _) => None,
        };

        let documents = texts
            .iter()
            .map(|text| self.normalize_one(text, lemmatizer))
            .collect::<Result<Vec<_>>>()?;

        let corpus = NormalizedCorpus { documents };
        info!(
            documents = corpus.documents.len(),
            tokens = corpus.documents.iter().map(|d| d.tokens.len()).sum::<usize>(),
            language = %self.language,
            lemmatize = self.lemmatize,
            "Normalized corpus"
        );
        Ok(corpus)
    }

    fn normalize_one(
        &self,
        text: &str,
        lemmatizer: Option<&dyn Lemmatizer>,
    ) -> Result<NormalizedDocument> {
        let cleaned = self.clean(text)?;
        let mut words = self.remove_stop_words(&cleaned);

        if let Some(lemmatizer) = lemmatizer {
            words = lemmatize_words(lemmatizer, &words)?;
        }

        let cleaned = words.join(" ");
        let tokens = tokenize(&cleaned);
        debug!(words = words.len(), tokens = tokens.len(), "Normalized document");

        Ok(NormalizedDocument { cleaned, tokens })
    }

    /// Steps before stop-word removal: case, diacritics, contractions,
    /// symbols and whitespace.
    pub fn clean(&self, text: &str) -> Result<String> {
        let mut t = strip_diacritics(&text.to_lowercase())?;

        if self.language == Language::English {
            for (pattern, replacement) in &self.contractions {
                t = pattern.replace_all(&t, *replacement).into_owned();
            }
        }

        let t = self.symbols.replace_all(&t, " ");
        Ok(t.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn remove_stop_words(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .split_whitespace()
            .filter(|w| !self.stop_words.contains(*w))
            .map(str::to_string)
            .collect()
    }
}

fn lemmatize_words(lemmatizer: &dyn Lemmatizer, words: &[String]) -> Result<Vec<String>> {
    if words.is_empty() {
        return Ok(Vec::new());
    }
    let lemmas = lemmatizer.lemmatize(&words.join(" "))?;
    Ok(lemmas
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| l.chars().count() > MIN_TOKEN_CHARS)
        .collect())
}

/// Split on whitespace, discarding tokens of two characters or fewer.
pub fn tokenize(cleaned: &str) -> Vec<String> {
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
