// Topic model trait: the read-only view of the external topic model.
//
// The analytics only ever need four things from a trained model: the topic
// table, keyword weights per topic, representative documents per topic and
// the document -> topic assignments. Keeping the seam this narrow lets tests
// substitute a stub for the embedding/clustering stack.

use serde::{Deserialize, Serialize};

/// One row of the topic table. Ids are >= 0, plus -1 for the outlier topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic_id: i64,
    pub size: usize,
    /// Label the model gave the topic, if any
    #[serde(default)]
    pub name: Option<String>,
}

/// Read-only access to a trained topic model, valid for one run.
pub trait TopicModel {
    /// Topic table, including the outlier row when the model produced one.
    fn topic_info(&self) -> Vec<TopicSummary>;

    /// (keyword, weight) pairs for a topic, most relevant first.
    /// None when the model has no keywords for the id.
    fn topic_keywords(&self, topic_id: i64) -> Option<Vec<(String, f64)>>;

    /// Representative documents for a topic, most representative first.
    fn representative_docs(&self, topic_id: i64) -> Option<Vec<String>>;

    /// One topic id per input document, in input order.
    fn assignments(&self) -> Vec<i64>;
}
