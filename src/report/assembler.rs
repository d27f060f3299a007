// Report assembly: an insertion-ordered list of typed sections.
//
// The add_* operations only slugify and append; they never fail. Rendering
// happens once, at finalize, and is the only step that touches the
// filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::charts;
use super::html;
use super::section::{ImageArtifact, PlotFigure, ReportSection, SectionPayload, Table};
use crate::text::ngrams::NgramRecord;

const WORD_CLOUD_TITLE: &str = "Word cloud";

#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_image(&mut self, title: impl Into<String>, image: ImageArtifact) -> &ReportSection {
        self.push(title, SectionPayload::Image(image))
    }

    pub fn add_table(&mut self, title: impl Into<String>, table: Table) -> &ReportSection {
        self.push(title, SectionPayload::Table(table))
    }

    pub fn add_interactive_plot(&mut self, title: impl Into<String>, figure: PlotFigure) -> &ReportSection {
        self.push(title, SectionPayload::InteractivePlot(figure))
    }

    pub fn add_raw_section(&mut self, title: impl Into<String>, html: impl Into<String>) -> &ReportSection {
        self.push(title, SectionPayload::RawHtml(html.into()))
    }

    /// Bar chart of an n-gram ranking, titled "Top {k} {kind}".
    pub fn add_ngram_chart(&mut self, record: &NgramRecord) -> &ReportSection {
        let title = format!("Top {} {}", record.k, record.kind_name());
        let image = charts::bar_chart_image(&title, &record.labels(), &record.counts());
        self.add_image(title, image)
    }

    /// Word cloud of the most frequent unigrams.
    pub fn add_word_cloud(&mut self, unigrams: &NgramRecord) -> &ReportSection {
        let words: Vec<(String, usize)> = unigrams.labels().into_iter().zip(unigrams.counts()).collect();
        let image = charts::word_cloud_image(WORD_CLOUD_TITLE, &words);
        self.add_image(WORD_CLOUD_TITLE, image)
    }

    fn push(&mut self, title: impl Into<String>, payload: SectionPayload) -> &ReportSection {
        let section = ReportSection::new(title, payload);
        self.sections.push(section);
        &self.sections[self.sections.len() - 1]
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// (id, title) per section, in the order the navigation bar shows them.
    pub fn navigation(&self) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .map(|s| (s.id.as_str(), s.title.as_str()))
            .collect()
    }

    /// Render the page without writing it anywhere.
    pub fn render(&self) -> String {
        html::render(&self.title, &self.sections)
    }

    /// Render the page to `path` and return the path written.
    pub fn finalize(&self, path: &Path) -> Result<PathBuf> {
        let page = self.render();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, page)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        info!(
            path = %path.display(),
            sections = self.sections.len(),
            "Report written"
        );
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_keep_insertion_order() {
        let mut report = Report::new("Corpus");
        report.add_raw_section("Top 10 bigrams", "<p>a</p>");
        report.add_raw_section("Résumé: Étude", "<p>b</p>");

        let nav = report.navigation();
        assert_eq!(nav, vec![("top-10-bigrams", "Top 10 bigrams"), ("resume-etude", "Résumé: Étude")]);

        let page = report.render();
        let first = page.find(r#"<section id="top-10-bigrams""#).unwrap();
        let second = page.find(r#"<section id="resume-etude""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_duplicate_titles_are_kept() {
        let mut report = Report::new("Corpus");
        report.add_raw_section("Same", "one");
        report.add_raw_section("Same", "two");
        assert_eq!(report.len(), 2);
        assert_eq!(report.sections()[0].id, report.sections()[1].id);
    }

    #[test]
    fn test_word_cloud_section() {
        let record = NgramRecord {
            n: 1,
            k: 100,
            ranked: vec![(vec!["lava".to_string()], 3), (vec!["ceniza".to_string()], 1)],
        };
        let mut report = Report::new("Corpus");
        let section = report.add_word_cloud(&record);
        assert_eq!(section.id, "word-cloud");
        assert_eq!(section.kind(), crate::report::SectionKind::Image);
    }

    #[test]
    fn test_ngram_chart_title() {
        let record = NgramRecord {
            n: 2,
            k: 10,
            ranked: vec![(vec!["a".to_string(), "b".to_string()], 2)],
        };
        let mut report = Report::new("Corpus");
        let section = report.add_ngram_chart(&record);
        assert_eq!(section.id, "top-10-bigrams");
    }
}
