// Outlier profiling: what the documents in topic -1 look like.
//
// Outliers are the documents the topic model could not place in any
// coherent cluster. The profile reports how many there are, how long they
// are compared to the thematic documents, and passes through the model's own
// keywords and representative examples for the outlier topic.

use serde::Serialize;
use tracing::info;

use super::traits::TopicModel;
use crate::corpus::{Document, OUTLIER_TOPIC};
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub total: usize,
    /// Fraction of all documents, 0.0 to 1.0
    pub proportion: f64,
    /// Mean word count of outlier documents (0 when there are none)
    pub avg_outlier_len: f64,
    /// Mean word count of thematic documents (0 when there are none)
    pub avg_thematic_len: f64,
    pub top_keywords: Vec<(String, f64)>,
    pub examples: Vec<String>,
}

impl OutlierReport {
    pub fn proportion_percent(&self) -> f64 {
        self.proportion * 100.0
    }
}

/// How much of the model's outlier keywords/examples to keep.
#[derive(Debug, Clone, Copy)]
pub struct OutlierLimits {
    pub keywords: usize,
    pub examples: usize,
}

impl Default for OutlierLimits {
    fn default() -> Self {
        Self {
            keywords: 10,
            examples: 5,
        }
    }
}

/// Profile the outlier documents against the thematic ones.
///
/// Every document must carry a topic assignment.
pub fn profile(
    documents: &[Document],
    model: &dyn TopicModel,
    limits: OutlierLimits,
) -> Result<OutlierReport> {
    if let Some(doc) = documents.iter().find(|d| d.topic_id.is_none()) {
        return Err(AnalysisError::invalid_input(format!(
            "document {} has no topic assignment",
            doc.id
        )));
    }

    let (outliers, thematic): (Vec<&Document>, Vec<&Document>) =
        documents.iter().partition(|d| d.is_outlier());

    let total = outliers.len();
    let proportion = if documents.is_empty() {
        0.0
    } else {
        total as f64 / documents.len() as f64
    };

    let top_keywords = model
        .topic_keywords(OUTLIER_TOPIC)
        .unwrap_or_default()
        .into_iter()
        .take(limits.keywords)
        .collect();
    let examples = model
        .representative_docs(OUTLIER_TOPIC)
        .unwrap_or_default()
        .into_iter()
        .take(limits.examples)
        .collect();

    let report = OutlierReport {
        total,
        proportion,
        avg_outlier_len: mean_word_count(&outliers),
        avg_thematic_len: mean_word_count(&thematic),
        top_keywords,
        examples,
    };

    info!(
        outliers = report.total,
        proportion = report.proportion,
        avg_outlier_len = report.avg_outlier_len,
        avg_thematic_len = report.avg_thematic_len,
        "Profiled outlier topic"
    );
    Ok(report)
}

fn mean_word_count(docs: &[&Document]) -> f64 {
    if docs.is_empty() {
        return 0.0;
    }
    let words: usize = docs.iter().map(|d| d.word_count()).sum();
    words as f64 / docs.len() as f64
}
