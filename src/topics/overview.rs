// Topic overview tables for the report.
//
// Turns the topic table, the ablation result and the outlier profile into
// plain string tables. Nothing here computes statistics; it only lays out
// what the other stages produced.

use super::ablation::AblationResult;
use super::outliers::OutlierReport;
use super::traits::TopicModel;
use crate::corpus::OUTLIER_TOPIC;
use crate::output::truncate_chars;
use crate::report::Table;

/// Representative documents are cut to this many characters in tables.
const DOC_PREVIEW_CHARS: usize = 200;

/// Topic table with each topic's top keywords as the model ranked them.
pub fn topic_summary_table(model: &dyn TopicModel, keywords_per_topic: usize) -> Table {
    let mut table = Table::new(["Topic", "Size", "Name", "Keywords"]);
    for topic in model.topic_info() {
        let keywords: Vec<String> = model
            .topic_keywords(topic.topic_id)
            .unwrap_or_default()
            .into_iter()
            .take(keywords_per_topic)
            .map(|(word, _)| word)
            .collect();
        table.push_row([
            topic.topic_id.to_string(),
            topic.size.to_string(),
            topic.name.unwrap_or_default(),
            keywords.join(", "),
        ]);
    }
    table
}

/// Topic table with exclusive keywords as the representation and the most
/// representative document of each topic. The outlier row has no
/// representative document.
pub fn ablated_topic_table(model: &dyn TopicModel, ablation: &AblationResult) -> Table {
    let mut table = Table::new(["Topic", "Size", "Name", "Representation", "Representative document"]);
    for topic in model.topic_info() {
        let representation = if topic.topic_id == OUTLIER_TOPIC {
            "(outlier)".to_string()
        } else {
            ablation
                .exclusive
                .get(&topic.topic_id)
                .map(|words| words.join(", "))
                .unwrap_or_default()
        };
        let representative = if topic.topic_id == OUTLIER_TOPIC {
            String::new()
        } else {
            model
                .representative_docs(topic.topic_id)
                .and_then(|docs| docs.into_iter().next())
                .map(|doc| truncate_chars(&doc, DOC_PREVIEW_CHARS))
                .unwrap_or_default()
        };
        table.push_row([
            topic.topic_id.to_string(),
            topic.size.to_string(),
            topic.name.unwrap_or_default(),
            representation,
            representative,
        ]);
    }
    table
}

/// Every duplicate keyword with the topics it was shared between.
pub fn duplicates_table(ablation: &AblationResult) -> Table {
    let mut table = Table::new(["Keyword", "Topics"]);
    for word in &ablation.duplicates {
        let topics: Vec<String> = ablation
            .per_topic
            .iter()
            .filter(|(_, words)| words.contains(word))
            .map(|(id, _)| id.to_string())
            .collect();
        table.push_row([word.clone(), topics.join(", ")]);
    }
    table
}

/// Metric/value table summarizing the outlier profile.
pub fn outlier_table(report: &OutlierReport) -> Table {
    let top_keywords: Vec<&str> = report
        .top_keywords
        .iter()
        .take(3)
        .map(|(word, _)| word.as_str())
        .collect();
    let example = report
        .examples
        .first()
        .map(|doc| truncate_chars(doc, DOC_PREVIEW_CHARS))
        .unwrap_or_else(|| "N/A".to_string());

    Table::new(["Metric", "Value"])
        .with_row(["Total outliers (topic -1)".to_string(), report.total.to_string()])
        .with_row(["Proportion (%)".to_string(), format!("{:.2}%", report.proportion_percent())])
        .with_row([
            "Average length (outliers)".to_string(),
            format!("{:.2} words", report.avg_outlier_len),
        ])
        .with_row([
            "Average length (thematic)".to_string(),
            format!("{:.2} words", report.avg_thematic_len),
        ])
        .with_row(["Keywords (top 3)".to_string(), top_keywords.join(", ")])
        .with_row(["Representative document".to_string(), example])
}
