// ModelSnapshot: a trained topic model's output, frozen to JSON.
//
// The embedding/clustering stack runs elsewhere and exports everything the
// analytics need: the documents it was fit on, their topic assignments, the
// topic table, keyword weights, representative documents and, optionally,
// the embeddings with precomputed 3D projections.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::traits::{TopicModel, TopicSummary};
use crate::corpus::OUTLIER_TOPIC;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Raw document texts, in corpus row order
    pub documents: Vec<String>,
    /// Topic id per document, same order as `documents`
    pub assignments: Vec<i64>,
    pub topics: Vec<TopicSummary>,
    #[serde(default)]
    pub keywords: BTreeMap<i64, Vec<(String, f64)>>,
    #[serde(default)]
    pub representative_docs: BTreeMap<i64, Vec<String>>,
    /// Embedding matrix, one row per document
    #[serde(default)]
    pub embeddings: Option<Vec<Vec<f32>>>,
    /// Precomputed 3D coordinates keyed by projection family ("umap", "tsne")
    #[serde(default)]
    pub projections: BTreeMap<String, Vec<[f64; 3]>>,
    /// Optional word -> lemma table for the lookup lemmatizer
    #[serde(default)]
    pub lemmas: HashMap<String, String>,
}

impl ModelSnapshot {
    /// Read and validate a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model snapshot {}", path.display()))?;
        let snapshot: ModelSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed model snapshot {}", path.display()))?;
        snapshot.validate()?;

        info!(
            documents = snapshot.documents.len(),
            topics = snapshot.topics.len(),
            thematic_topics = snapshot.thematic_topic_ids().len(),
            projections = snapshot.projections.len(),
            "Loaded model snapshot"
        );
        Ok(snapshot)
    }

    /// Check the snapshot is internally consistent.
    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        if self.documents.is_empty() {
            return Err(AnalysisError::invalid_input("snapshot has no documents"));
        }
        if self.topics.is_empty() {
            return Err(AnalysisError::upstream_unavailable(
                "snapshot has no topic table; was the topic model trained?",
            ));
        }
        if self.assignments.len() != self.documents.len() {
            return Err(AnalysisError::invalid_input(format!(
                "{} documents but {} topic assignments",
                self.documents.len(),
                self.assignments.len()
            )));
        }
        if !self.projections.is_empty() {
            match &self.embeddings {
                None => {
                    return Err(AnalysisError::invalid_input(
                        "snapshot has projections but no embeddings",
                    ))
                }
                Some(rows) if rows.len() != self.documents.len() => {
                    return Err(AnalysisError::invalid_input(format!(
                        "{} documents but {} embedding rows",
                        self.documents.len(),
                        rows.len()
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Topic ids other than the outlier topic, in table order.
    pub fn thematic_topic_ids(&self) -> Vec<i64> {
        self.topics
            .iter()
            .map(|t| t.topic_id)
            .filter(|&id| id != OUTLIER_TOPIC)
            .collect()
    }
}

impl TopicModel for ModelSnapshot {
    fn topic_info(&self) -> Vec<TopicSummary> {
        self.topics.clone()
    }

    fn topic_keywords(&self, topic_id: i64) -> Option<Vec<(String, f64)>> {
        self.keywords.get(&topic_id).cloned()
    }

    fn representative_docs(&self, topic_id: i64) -> Option<Vec<String>> {
        self.representative_docs.get(&topic_id).cloned()
    }

    fn assignments(&self) -> Vec<i64> {
        self.assignments.clone()
    }
}
