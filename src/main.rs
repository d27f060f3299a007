use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use tracing::info;

use topicscope::config::{self, Config};
use topicscope::output::terminal;
use topicscope::pipeline::{self, AnalysisInput};
use topicscope::projection::params::{self, ProjectionFamily};
use topicscope::projection::traits::{PrecomputedProjector, Projector};
use topicscope::text::lemma::{Lemmatizer, LookupLemmatizer};
use topicscope::text::ngrams::NgramAnalyzer;
use topicscope::text::normalize::{Language, Normalizer};
use topicscope::topics::snapshot::ModelSnapshot;

/// topicscope: characterize a topic-modeled corpus and render the findings
/// as a static interactive HTML report.
#[derive(Parser)]
#[command(name = "topicscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and write the HTML report
    Report {
        /// Topic model snapshot (JSON) exported by the clustering step
        snapshot: PathBuf,

        /// Where to write the report (default: TOPICSCOPE_OUTPUT or report.html)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Report title
        #[arg(long, short)]
        title: Option<String>,

        /// Corpus language (spanish or english)
        #[arg(long, short)]
        language: Option<String>,

        /// Lemmatize with the snapshot's lemma table
        #[arg(long)]
        lemmatize: bool,

        /// Comma-separated n-gram sizes, e.g. "2,3"
        #[arg(long)]
        ngrams: Option<String>,

        /// How many n-grams to keep per size
        #[arg(long)]
        top_k: Option<usize>,

        /// Keywords per topic to consider during ablation (default: all)
        #[arg(long)]
        ablation_top_n: Option<usize>,
    },

    /// Print the most frequent n-grams of a snapshot's documents
    Ngrams {
        /// Topic model snapshot (JSON)
        snapshot: PathBuf,

        /// N-gram size
        #[arg(long, short, default_value = "2")]
        n: usize,

        /// How many n-grams to show
        #[arg(long, default_value = "10")]
        top_k: usize,

        /// Corpus language (spanish or english)
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Show the projection parameters chosen for a sample count
    Params {
        /// Number of samples (embedding rows)
        samples: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topicscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            snapshot,
            output,
            title,
            language,
            lemmatize,
            ngrams,
            top_k,
            ablation_top_n,
        } => {
            let mut config = Config::load()?;
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(title) = title {
                config.title = title;
            }
            if let Some(language) = language {
                config.language = language.parse::<Language>()?;
            }
            if lemmatize {
                config.lemmatize = true;
            }
            if let Some(ngrams) = ngrams {
                config.ngram_sizes = config::parse_ngram_sizes(&ngrams)?;
            }
            if let Some(top_k) = top_k {
                config.ngram_top_k = top_k;
            }
            if ablation_top_n.is_some() {
                config.ablation_top_n = ablation_top_n;
            }
            config.validate()?;

            println!("Loading model snapshot from {}...", snapshot.display());
            let model = ModelSnapshot::load(&snapshot)?;

            let lemmatizer: Option<Box<dyn Lemmatizer>> = if config.lemmatize {
                let lookup = LookupLemmatizer::new(model.lemmas.clone());
                if lookup.is_empty() {
                    anyhow::bail!(
                        "Lemmatization requested but the snapshot carries no lemma table.\n\
                         Export one with the topic model or drop --lemmatize."
                    );
                }
                Some(Box::new(lookup))
            } else {
                None
            };

            let projector = PrecomputedProjector::from_keyed(&model.projections);
            let has_projections = !projector.families().is_empty();

            let input = AnalysisInput {
                texts: &model.documents,
                model: &model,
                embeddings: model.embeddings.as_deref().filter(|_| has_projections),
                projector: has_projections.then_some(&projector as &dyn Projector),
                lemmatizer,
            };

            let progress = ProgressBar::new(0);
            let run = pipeline::run(input, &config.analysis_options(), &progress)?;
            progress.finish_and_clear();

            terminal::display_run_summary(&run);

            let path = run.report.finalize(&config.output_path)?;
            println!(
                "\n{} {}",
                "Report written to".bold(),
                path.display().to_string().bright_green()
            );
        }

        Commands::Ngrams {
            snapshot,
            n,
            top_k,
            language,
        } => {
            let config = Config::load()?;
            let language = match language {
                Some(tag) => tag.parse::<Language>()?,
                None => config.language,
            };

            let model = ModelSnapshot::load(&snapshot)?;
            let corpus = Normalizer::for_language(language, false)?.normalize(&model.documents)?;
            let tokens = corpus.token_stream();
            info!(tokens = tokens.len(), "Token stream ready");

            let record = NgramAnalyzer::new(&tokens, top_k)?.compute(n)?;
            terminal::display_ngrams(&record);
        }

        Commands::Params { samples } => {
            let selected = ProjectionFamily::ALL
                .into_iter()
                .map(|family| params::select(family, samples))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            terminal::display_params(samples, &selected);
        }
    }

    Ok(())
}
