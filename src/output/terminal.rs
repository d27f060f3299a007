// Colored terminal output for n-gram rankings, projection parameters and
// the end-of-run summary.
//
// The main.rs commands delegate here; nothing in this module computes
// anything.

use colored::Colorize;

use crate::pipeline::AnalysisRun;
use crate::projection::params::{ProjectionFamily, ReductionParams};
use crate::text::ngrams::NgramRecord;

/// Display a ranked n-gram table with proportional bars.
pub fn display_ngrams(record: &NgramRecord) {
    println!(
        "\n{}",
        format!("=== Top {} {} ===", record.k, record.kind_name()).bold()
    );
    println!();

    if record.ranked.is_empty() {
        println!("  No {} in the token stream.", record.kind_name());
        return;
    }

    let max = record.ranked[0].1.max(1);
    let bar_width: usize = 20;

    for (i, (gram, count)) in record.ranked.iter().enumerate() {
        let filled = (*count * bar_width).div_ceil(max);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width.saturating_sub(filled)));
        println!(
            "  {:>2}. {:<40} {} {}",
            i + 1,
            super::truncate_chars(&gram.join(" "), 40).bold(),
            bar.bright_blue(),
            count
        );
    }
}

/// Display the projection parameters chosen for a sample count.
pub fn display_params(samples: usize, params: &[ReductionParams]) {
    println!(
        "\n{}",
        format!("=== Projection parameters for {samples} samples ===").bold()
    );
    for p in params {
        let neighborhood = match p.family {
            ProjectionFamily::Umap => "n_neighbors",
            ProjectionFamily::Tsne => "perplexity",
        };
        println!("\n  {}", p.family.to_string().bright_green());
        println!("    {neighborhood}: {}", p.neighbor_or_perplexity);
        if let Some(iterations) = p.iterations {
            println!("    iterations: {iterations}");
        }
        if let Some(min_dist) = p.min_dist {
            println!("    min_dist: {min_dist}");
        }
        println!("    metric: {}  seed: {}  components: {}", p.metric, p.seed, p.n_components);
    }
}

/// Display the end-of-run summary.
pub fn display_run_summary(run: &AnalysisRun) {
    println!("\n{}", "=== Analysis summary ===".bold());
    println!("  Documents: {}", run.documents.len());
    println!("  Tokens: {}", run.corpus.token_stream().len());
    println!("  Topics (excluding outliers): {}", run.ablation.per_topic.len());

    let outlier_line = format!(
        "{} ({:.2}%)",
        run.outliers.total,
        run.outliers.proportion_percent()
    );
    let colored_outliers = if run.outliers.proportion >= 0.30 {
        outlier_line.red()
    } else if run.outliers.proportion >= 0.10 {
        outlier_line.yellow()
    } else {
        outlier_line.green()
    };
    println!("  Outliers: {colored_outliers}");

    if !run.ablation.duplicates.is_empty() {
        let shared: Vec<&str> = run.ablation.duplicates.iter().map(String::as_str).collect();
        println!(
            "  Shared keywords removed: {}",
            super::truncate_chars(&shared.join(", "), 100).dimmed()
        );
    }

    let emptied: Vec<String> = run
        .ablation
        .exclusive
        .iter()
        .filter(|(_, words)| words.is_empty())
        .map(|(id, _)| id.to_string())
        .collect();
    if !emptied.is_empty() {
        println!(
            "  {} topics with no exclusive keywords: {}",
            "!".yellow(),
            emptied.join(", ")
        );
    }

    for record in run.ngrams.values() {
        if let Some((gram, count)) = record.ranked.first() {
            println!("  Top {}: {} ({count})", record.kind_name(), gram.join(" ").bold());
        }
    }

    if run.projections.is_empty() {
        println!("  Projections: {}", "skipped (no embeddings)".dimmed());
    } else {
        let names: Vec<String> = run.projections.iter().map(|p| p.params.family.to_string()).collect();
        println!("  Projections: {}", names.join(", "));
    }
    println!("  Report sections: {}", run.report.len());
}
