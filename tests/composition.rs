// End-to-end tests: the full pipeline over a small corpus with a stub topic
// model and precomputed projections, from raw text to rendered report.

use std::collections::BTreeMap;

use indicatif::ProgressBar;

use topicscope::pipeline::{run, AnalysisInput, AnalysisOptions};
use topicscope::projection::traits::PrecomputedProjector;
use topicscope::report::{SectionKind, SectionPayload};
use topicscope::text::lemma::LookupLemmatizer;
use topicscope::text::normalize::Language;
use topicscope::topics::traits::{TopicModel, TopicSummary};
use topicscope::AnalysisError;

struct StubModel {
    assignments: Vec<i64>,
}

impl TopicModel for StubModel {
    fn topic_info(&self) -> Vec<TopicSummary> {
        vec![
            TopicSummary {
                topic_id: -1,
                size: 2,
                name: Some("-1_basalt_magma".to_string()),
            },
            TopicSummary {
                topic_id: 0,
                size: 2,
                name: Some("0_quantum_lattice".to_string()),
            },
            TopicSummary {
                topic_id: 1,
                size: 2,
                name: Some("1_telescope_nebula".to_string()),
            },
        ]
    }

    fn topic_keywords(&self, topic_id: i64) -> Option<Vec<(String, f64)>> {
        let words: &[&str] = match topic_id {
            -1 => &["basalt", "magma", "eruption"],
            0 => &["quantum", "lattice", "physics"],
            1 => &["telescope", "nebula", "physics"],
            _ => return None,
        };
        Some(words.iter().map(|w| (w.to_string(), 0.5)).collect())
    }

    fn representative_docs(&self, topic_id: i64) -> Option<Vec<String>> {
        match topic_id {
            -1 => Some(vec!["Basalt magma eruption".to_string()]),
            0 => Some(vec!["Quantum chromodynamics lattice simulations".to_string()]),
            _ => None,
        }
    }

    fn assignments(&self) -> Vec<i64> {
        self.assignments.clone()
    }
}

fn corpus() -> Vec<String> {
    [
        "Quantum chromodynamics lattice simulations",
        "Lattice simulations of quantum chromodynamics",
        "Telescope spectroscopy of the nebula",
        "Nebula spectroscopy with the telescope!",
        "Basalt magma eruption",
        "zzz ???",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn model() -> StubModel {
    StubModel {
        assignments: vec![0, 0, 1, 1, -1, -1],
    }
}

fn options() -> AnalysisOptions {
    AnalysisOptions {
        title: "Physics abstracts".to_string(),
        language: Language::English,
        ..AnalysisOptions::default()
    }
}

fn projector(rows: usize) -> PrecomputedProjector {
    let points: Vec<[f64; 3]> = (0..rows).map(|i| [i as f64, (i * 2) as f64, 0.5]).collect();
    PrecomputedProjector::from_keyed(&BTreeMap::from([
        ("umap".to_string(), points.clone()),
        ("tsne".to_string(), points),
    ]))
}

// ============================================================
// Full run
// ============================================================

#[test]
fn full_run_produces_every_section_in_order() {
    let texts = corpus();
    let model = model();
    let embeddings = vec![vec![0.1f32; 16]; texts.len()];
    let projector = projector(texts.len());

    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: Some(&embeddings),
        projector: Some(&projector),
        lemmatizer: None,
    };
    let result = run(input, &options(), &ProgressBar::hidden()).unwrap();

    assert_eq!(result.documents.len(), 6);
    assert_eq!(result.corpus.documents.len(), 6);

    // N-grams over the global token stream
    let bigrams = &result.ngrams[&2];
    assert_eq!(
        bigrams.ranked[0],
        (vec!["quantum".to_string(), "chromodynamics".to_string()], 2)
    );
    assert_eq!(
        bigrams.ranked[1],
        (vec!["lattice".to_string(), "simulations".to_string()], 2)
    );
    assert!(result.ngrams.contains_key(&3));

    // Ablation drops the keyword both topics share
    assert_eq!(
        result.ablation.duplicates.iter().collect::<Vec<_>>(),
        vec!["physics"]
    );
    assert_eq!(result.ablation.exclusive[&0], vec!["quantum", "lattice"]);

    // Two of six documents are outliers
    assert_eq!(result.outliers.total, 2);
    assert!((result.outliers.proportion - 2.0 / 6.0).abs() < 1e-12);
    assert_eq!(result.outliers.examples, vec!["Basalt magma eruption"]);

    // Word cloud frequencies come from the same token stream
    assert_eq!(result.word_frequencies.n, 1);
    assert_eq!(result.word_frequencies.ranked[0], (vec!["quantum".to_string()], 2));

    // One projection per family, six points each
    assert_eq!(result.projections.len(), 2);
    assert!(result.projections.iter().all(|p| p.points.len() == 6));
    assert_eq!(result.projections[0].params.neighbor_or_perplexity, 5);

    let ids: Vec<&str> = result.report.navigation().iter().map(|(id, _)| *id).collect();
    assert_eq!(
        ids,
        vec![
            "word-cloud",
            "top-10-bigrams",
            "top-10-trigrams",
            "topic-summary",
            "topics-after-ablation",
            "duplicate-keywords",
            "umap-3d-of-topics",
            "t-sne-3d-of-topics",
            "outlier-analysis",
            "run-details",
        ]
    );

    let page = result.report.render();
    assert!(page.contains("<title>Physics abstracts</title>"));
    assert!(page.contains(r#"Plotly.newPlot("plot-6""#));
    assert!(page.contains("(outlier)"));
    assert!(page.contains("33.33%"));
}

#[test]
fn charts_follow_configured_size_order() {
    let texts = corpus();
    let model = model();
    let options = AnalysisOptions {
        ngram_sizes: vec![3, 1],
        ngram_top_k: 5,
        ..options()
    };
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let result = run(input, &options, &ProgressBar::hidden()).unwrap();
    let titles: Vec<&str> = result.report.navigation().iter().map(|(_, t)| *t).collect();
    assert_eq!(titles[0], "Word cloud");
    assert_eq!(titles[1], "Top 5 trigrams");
    assert_eq!(titles[2], "Top 5 unigrams");
}

#[test]
fn run_without_embeddings_skips_plots() {
    let texts = corpus();
    let model = model();
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let result = run(input, &options(), &ProgressBar::hidden()).unwrap();

    assert!(result.projections.is_empty());
    assert_eq!(result.report.len(), 8);
    assert!(result
        .report
        .sections()
        .iter()
        .all(|s| s.kind() != SectionKind::InteractivePlot));
    assert!(!result.report.render().contains("Plotly.newPlot"));
}

#[test]
fn lemmatized_run_uses_the_lemma_table() {
    let texts = corpus();
    let model = model();
    let lemmatizer = LookupLemmatizer::from_pairs([("simulations", "simulation")]);
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: Some(Box::new(lemmatizer)),
    };
    let options = AnalysisOptions {
        lemmatize: true,
        ..options()
    };
    let result = run(input, &options, &ProgressBar::hidden()).unwrap();

    let tokens = result.corpus.token_stream();
    assert!(tokens.contains(&"simulation".to_string()));
    assert!(!tokens.contains(&"simulations".to_string()));

    let details = result.report.sections().last().unwrap();
    match &details.payload {
        SectionPayload::RawHtml(html) => {
            assert!(html.contains("<strong>Lemmatization:</strong> on"));
            assert!(html.contains("<strong>Language:</strong> english"));
        }
        other => panic!("expected raw html, got {other:?}"),
    }
}

#[test]
fn word_cloud_opens_the_report() {
    let texts = corpus();
    let model = model();
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let result = run(input, &options(), &ProgressBar::hidden()).unwrap();

    let first = &result.report.sections()[0];
    assert_eq!(first.id, "word-cloud");
    match &first.payload {
        SectionPayload::Image(image) => assert_eq!(image.media_type, "image/svg+xml"),
        other => panic!("expected an image, got {other:?}"),
    }
    let kinds: Vec<SectionKind> = result.report.sections().iter().take(3).map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![SectionKind::Image; 3]);
}

#[test]
fn documents_emptied_by_stop_words_count_zero_words() {
    let texts = vec!["the and of it".to_string(), "elephant giraffe".to_string()];
    let model = StubModel {
        assignments: vec![-1, 0],
    };
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let result = run(input, &options(), &ProgressBar::hidden()).unwrap();

    assert_eq!(result.documents[0].cleaned_text.as_deref(), Some(""));
    assert_eq!(result.outliers.total, 1);
    assert_eq!(result.outliers.avg_outlier_len, 0.0);
    assert_eq!(result.outliers.avg_thematic_len, 2.0);
}

// ============================================================
// Failures
// ============================================================

#[test]
fn lemmatize_without_lemmatizer_is_upstream_unavailable() {
    let texts = corpus();
    let model = model();
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let options = AnalysisOptions {
        lemmatize: true,
        ..options()
    };
    let err = run(input, &options, &ProgressBar::hidden()).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::UpstreamUnavailable { .. })
    ));
}

#[test]
fn assignment_count_mismatch_is_rejected() {
    let texts = corpus();
    let model = StubModel {
        assignments: vec![0, 1],
    };
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let err = run(input, &options(), &ProgressBar::hidden()).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn embedding_row_mismatch_is_rejected() {
    let texts = corpus();
    let model = model();
    let embeddings = vec![vec![0.0f32; 4]; 4];
    let projector = projector(4);
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: Some(&embeddings),
        projector: Some(&projector),
        lemmatizer: None,
    };
    let err = run(input, &options(), &ProgressBar::hidden()).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn empty_corpus_is_invalid_input() {
    let texts: Vec<String> = Vec::new();
    let model = StubModel {
        assignments: Vec::new(),
    };
    let input = AnalysisInput {
        texts: &texts,
        model: &model,
        embeddings: None,
        projector: None,
        lemmatizer: None,
    };
    let err = run(input, &options(), &ProgressBar::hidden()).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InvalidInput { .. })
    ));
}
