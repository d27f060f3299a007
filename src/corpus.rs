// Document model shared by the pipeline stages.
//
// A Document is created once per corpus row. The normalizer fills in the
// cleaned text and tokens; the topic id comes from the external topic model.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::text::normalize::NormalizedCorpus;

/// Topic id reserved for documents the topic model could not place.
pub const OUTLIER_TOPIC: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: usize,
    pub raw_text: String,
    /// None until the normalizer has run; Some("") when every word was
    /// filtered out
    #[serde(default)]
    pub cleaned_text: Option<String>,
    #[serde(default)]
    pub tokens: Vec<String>,
    /// None until the topic model has assigned the document
    #[serde(default)]
    pub topic_id: Option<i64>,
}

impl Document {
    pub fn new(id: usize, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
            cleaned_text: None,
            tokens: Vec::new(),
            topic_id: None,
        }
    }

    pub fn with_topic(mut self, topic_id: i64) -> Self {
        self.topic_id = Some(topic_id);
        self
    }

    pub fn is_outlier(&self) -> bool {
        self.topic_id == Some(OUTLIER_TOPIC)
    }

    /// The text the topic model was fit on: the cleaned text once the
    /// normalizer has run (even when it came out empty), the raw text
    /// before that.
    pub fn model_text(&self) -> &str {
        self.cleaned_text.as_deref().unwrap_or(&self.raw_text)
    }

    /// Whitespace-split word count of the model text.
    pub fn word_count(&self) -> usize {
        self.model_text().split_whitespace().count()
    }
}

/// Build the document set from raw texts, their normalized form and the
/// topic model's assignment table (one entry per text, in row order).
pub fn build_documents(
    raw_texts: &[String],
    normalized: &NormalizedCorpus,
    assignments: &[i64],
) -> Result<Vec<Document>> {
    if raw_texts.len() != normalized.documents.len() {
        return Err(AnalysisError::invalid_input(format!(
            "{} raw texts but {} normalized documents",
            raw_texts.len(),
            normalized.documents.len()
        )));
    }
    if raw_texts.len() != assignments.len() {
        return Err(AnalysisError::invalid_input(format!(
            "{} documents but {} topic assignments",
            raw_texts.len(),
            assignments.len()
        )));
    }

    Ok(raw_texts
        .iter()
        .zip(&normalized.documents)
        .zip(assignments)
        .enumerate()
        .map(|(id, ((raw, norm), &topic))| Document {
            id,
            raw_text: raw.clone(),
            cleaned_text: Some(norm.cleaned.clone()),
            tokens: norm.tokens.clone(),
            topic_id: Some(topic),
        })
        .collect())
}
