// Analysis pipeline: normalize -> n-grams -> ablation -> outliers ->
// projections -> report.
//
// Stages run strictly in sequence and each one consumes the full output of
// the one before. A failure anywhere aborts the run; there is no partial
// report.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::corpus::{build_documents, Document};
use crate::error::AnalysisError;
use crate::projection::params::ProjectionFamily;
use crate::projection::traits::Projector;
use crate::projection::{self, Projection};
use crate::report::charts::scatter_3d_figure;
use crate::report::html::escape;
use crate::report::Report;
use crate::text::lemma::Lemmatizer;
use crate::text::ngrams::{rank_ngrams, NgramAnalyzer, NgramRecord};
use crate::text::normalize::{Language, NormalizedCorpus, Normalizer};
use crate::topics::ablation::{self, AblationResult};
use crate::topics::outliers::{self, OutlierLimits, OutlierReport};
use crate::topics::overview;
use crate::topics::traits::TopicModel;

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub title: String,
    pub language: Language,
    pub lemmatize: bool,
    /// Which n to compute n-gram charts for
    pub ngram_sizes: Vec<usize>,
    pub ngram_top_k: usize,
    /// Most frequent words drawn in the word cloud
    pub word_cloud_words: usize,
    /// Keywords per topic fed into ablation; None keeps all of them
    pub ablation_top_n: Option<usize>,
    pub outlier_limits: OutlierLimits,
    /// Keywords shown per topic in the summary table
    pub summary_keywords: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            title: "Topic analysis report".to_string(),
            language: Language::Spanish,
            lemmatize: false,
            ngram_sizes: vec![2, 3],
            ngram_top_k: 10,
            word_cloud_words: 100,
            ablation_top_n: None,
            outlier_limits: OutlierLimits {
                keywords: 15,
                examples: 3,
            },
            summary_keywords: 10,
        }
    }
}

/// What the pipeline reads: the corpus and the external collaborators.
pub struct AnalysisInput<'a> {
    /// Raw texts, in the row order the topic model saw them
    pub texts: &'a [String],
    pub model: &'a dyn TopicModel,
    /// Embedding rows for the projections; None skips them
    pub embeddings: Option<&'a [Vec<f32>]>,
    pub projector: Option<&'a dyn Projector>,
    pub lemmatizer: Option<Box<dyn Lemmatizer>>,
}

/// Everything a run produced, including the assembled report.
pub struct AnalysisRun {
    pub corpus: NormalizedCorpus,
    pub documents: Vec<Document>,
    /// Unigram frequencies behind the word cloud
    pub word_frequencies: NgramRecord,
    pub ngrams: BTreeMap<usize, NgramRecord>,
    pub ablation: AblationResult,
    pub outliers: OutlierReport,
    pub projections: Vec<Projection>,
    pub report: Report,
}

const STAGES: u64 = 6;

/// Run every stage and assemble the report.
pub fn run(input: AnalysisInput<'_>, options: &AnalysisOptions, progress: &ProgressBar) -> Result<AnalysisRun> {
    progress.set_length(STAGES);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    // Stage 1: normalization
    progress.set_message("normalizing text");
    let mut normalizer =
        Normalizer::for_language(options.language, options.lemmatize).context("Text normalization failed")?;
    if let Some(lemmatizer) = input.lemmatizer {
        normalizer = normalizer.with_lemmatizer(lemmatizer);
    }
    let corpus = normalizer.normalize(input.texts).context("Text normalization failed")?;
    let documents = build_documents(input.texts, &corpus, &input.model.assignments())
        .context("Topic assignments do not match the corpus")?;
    progress.inc(1);

    // Stage 2: n-grams
    progress.set_message("counting n-grams");
    let tokens = corpus.token_stream();
    let analyzer = NgramAnalyzer::new(&tokens, options.ngram_top_k).context("N-gram analysis failed")?;
    let ngrams = analyzer
        .compute_many(&options.ngram_sizes)
        .context("N-gram analysis failed")?;
    let word_frequencies =
        rank_ngrams(&tokens, 1, options.word_cloud_words).context("N-gram analysis failed")?;
    progress.inc(1);

    // Stage 3: ablation
    progress.set_message("ablating topic keywords");
    let ablation = ablation::ablate_model(input.model, options.ablation_top_n);
    progress.inc(1);

    // Stage 4: outliers
    progress.set_message("profiling outliers");
    let outliers = outliers::profile(&documents, input.model, options.outlier_limits)
        .context("Outlier profiling failed")?;
    progress.inc(1);

    // Stage 5: projections
    progress.set_message("projecting embeddings");
    let projections = match (input.embeddings, input.projector) {
        (Some(embeddings), Some(_)) if embeddings.len() != documents.len() => {
            return Err(AnalysisError::invalid_input(format!(
                "{} documents but {} embedding rows",
                documents.len(),
                embeddings.len()
            ))
            .into());
        }
        (Some(embeddings), Some(projector)) => ProjectionFamily::ALL
            .into_iter()
            .map(|family| {
                projection::project(projector, family, embeddings)
                    .with_context(|| format!("{family} projection failed"))
            })
            .collect::<Result<Vec<_>>>()?,
        _ => {
            warn!("No embeddings or projector supplied, skipping 3D projections");
            Vec::new()
        }
    };
    progress.inc(1);

    // Stage 6: report
    progress.set_message("assembling report");
    let report = assemble_report(
        options,
        input.model,
        &documents,
        &word_frequencies,
        &ngrams,
        &ablation,
        &outliers,
        &projections,
    );
    progress.inc(1);
    progress.finish_with_message("analysis complete");

    info!(
        documents = documents.len(),
        tokens = tokens.len(),
        sections = report.len(),
        "Analysis pipeline finished"
    );

    Ok(AnalysisRun {
        corpus,
        documents,
        word_frequencies,
        ngrams,
        ablation,
        outliers,
        projections,
        report,
    })
}

#[allow(clippy::too_many_arguments)]
fn assemble_report(
    options: &AnalysisOptions,
    model: &dyn TopicModel,
    documents: &[Document],
    word_frequencies: &NgramRecord,
    ngrams: &BTreeMap<usize, NgramRecord>,
    ablation: &AblationResult,
    outliers: &OutlierReport,
    projections: &[Projection],
) -> Report {
    let mut report = Report::new(options.title.clone());
    report.add_word_cloud(word_frequencies);

    // Charts follow the configured order, not the map's key order
    for n in &options.ngram_sizes {
        if let Some(record) = ngrams.get(n) {
            report.add_ngram_chart(record);
        }
    }

    report.add_table("Topic summary", overview::topic_summary_table(model, options.summary_keywords));
    report.add_table("Topics after ablation", overview::ablated_topic_table(model, ablation));
    report.add_table("Duplicate keywords", overview::duplicates_table(ablation));

    let topic_ids: Vec<i64> = documents.iter().map(|d| d.topic_id.unwrap_or_default()).collect();
    for projection in projections {
        let title = format!("{} 3D of topics", projection.params.family);
        let figure = scatter_3d_figure(&title, &projection.points, &topic_ids);
        report.add_interactive_plot(title, figure);
    }

    report.add_table("Outlier analysis", overview::outlier_table(outliers));
    report.add_raw_section("Run details", run_details_html(options, documents, ablation));

    report
}

fn run_details_html(options: &AnalysisOptions, documents: &[Document], ablation: &AblationResult) -> String {
    let ngram_sizes: Vec<String> = options.ngram_sizes.iter().map(|n| n.to_string()).collect();
    format!(
        "<ul class=\"list-unstyled mb-0\">\
         <li><strong>Documents:</strong> {}</li>\
         <li><strong>Topics (excluding outliers):</strong> {}</li>\
         <li><strong>Language:</strong> {}</li>\
         <li><strong>Lemmatization:</strong> {}</li>\
         <li><strong>N-gram sizes:</strong> {}</li>\
         <li><strong>Generated:</strong> {}</li>\
         </ul>",
        documents.len(),
        ablation.per_topic.len(),
        escape(&options.language.to_string()),
        if options.lemmatize { "on" } else { "off" },
        escape(&ngram_sizes.join(", ")),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
