// Topic ablation: strip keywords shared between topics.
//
// A keyword is a duplicate when it shows up in the lists of two or more
// distinct topics. Each topic's exclusive list is its original list minus
// the duplicates, in the original order. What remains is the vocabulary that
// tells one topic apart from the others.
//
// Built in one pass over a word -> topic-id-set map, so the cost is linear in
// the total number of keywords.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::info;

use super::traits::TopicModel;
use crate::corpus::OUTLIER_TOPIC;

/// Per-topic keywords, the global duplicate set and what survives ablation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AblationResult {
    pub per_topic: BTreeMap<i64, Vec<String>>,
    pub duplicates: BTreeSet<String>,
    pub exclusive: BTreeMap<i64, Vec<String>>,
}

/// Keyword lists for every non-outlier topic, weights stripped.
///
/// `top_n` keeps only the most relevant keywords of each topic; None keeps
/// all of them. Topics the model has no keywords for get an empty list.
pub fn collect_topic_words(model: &dyn TopicModel, top_n: Option<usize>) -> BTreeMap<i64, Vec<String>> {
    model
        .topic_info()
        .into_iter()
        .filter(|t| t.topic_id != OUTLIER_TOPIC)
        .map(|t| {
            let words: Vec<String> = model
                .topic_keywords(t.topic_id)
                .unwrap_or_default()
                .into_iter()
                .take(top_n.unwrap_or(usize::MAX))
                .map(|(word, _weight)| word)
                .collect();
            (t.topic_id, words)
        })
        .collect()
}

/// Compute duplicates and exclusive keyword lists.
pub fn ablate(per_topic: &BTreeMap<i64, Vec<String>>) -> AblationResult {
    let mut topics_by_word: HashMap<&str, BTreeSet<i64>> = HashMap::new();
    for (&topic_id, words) in per_topic {
        for word in words {
            topics_by_word.entry(word.as_str()).or_default().insert(topic_id);
        }
    }

    let duplicates: BTreeSet<String> = topics_by_word
        .into_iter()
        .filter(|(_, topics)| topics.len() >= 2)
        .map(|(word, _)| word.to_string())
        .collect();

    let exclusive: BTreeMap<i64, Vec<String>> = per_topic
        .iter()
        .map(|(&topic_id, words)| {
            let kept = words
                .iter()
                .filter(|w| !duplicates.contains(*w))
                .cloned()
                .collect();
            (topic_id, kept)
        })
        .collect();

    info!(
        topics = per_topic.len(),
        duplicates = duplicates.len(),
        empty_after_ablation = exclusive.values().filter(|w| w.is_empty()).count(),
        "Ablated topic keywords"
    );

    AblationResult {
        per_topic: per_topic.clone(),
        duplicates,
        exclusive,
    }
}

/// Collect keywords from the model and ablate them in one step.
pub fn ablate_model(model: &dyn TopicModel, top_n: Option<usize>) -> AblationResult {
    ablate(&collect_topic_words(model, top_n))
}
