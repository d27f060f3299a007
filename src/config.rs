use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pipeline::AnalysisOptions;
use crate::text::normalize::Language;
use crate::topics::outliers::OutlierLimits;

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so a bare `topicscope report snapshot.json`
/// works. The .env file is loaded automatically at startup via dotenvy, and
/// CLI flags override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub language: Language,
    pub lemmatize: bool,
    pub ngram_sizes: Vec<usize>,
    pub ngram_top_k: usize,
    pub word_cloud_words: usize,
    /// Keywords per topic fed into ablation (unset means all of them)
    pub ablation_top_n: Option<usize>,
    pub outlier_keywords: usize,
    pub outlier_examples: usize,
    pub summary_keywords: usize,
    pub output_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let language = env::var("TOPICSCOPE_LANGUAGE")
            .unwrap_or_else(|_| "spanish".to_string())
            .parse::<Language>()
            .context("TOPICSCOPE_LANGUAGE is not a supported language")?;

        let lemmatize = matches!(
            env::var("TOPICSCOPE_LEMMATIZE").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        let ngram_sizes = match env::var("TOPICSCOPE_NGRAM_SIZES") {
            Ok(raw) => parse_ngram_sizes(&raw)?,
            Err(_) => vec![2, 3],
        };

        let ablation_top_n = match env::var("TOPICSCOPE_ABLATION_TOP_N") {
            Ok(raw) => Some(parse_count("TOPICSCOPE_ABLATION_TOP_N", &raw)?),
            Err(_) => None,
        };

        let config = Self {
            title: env::var("TOPICSCOPE_TITLE").unwrap_or_else(|_| "Topic analysis report".to_string()),
            language,
            lemmatize,
            ngram_sizes,
            ngram_top_k: count_var("TOPICSCOPE_NGRAM_TOP_K", 10)?,
            word_cloud_words: count_var("TOPICSCOPE_WORD_CLOUD_WORDS", 100)?,
            ablation_top_n,
            outlier_keywords: count_var("TOPICSCOPE_OUTLIER_KEYWORDS", 15)?,
            outlier_examples: count_var("TOPICSCOPE_OUTLIER_EXAMPLES", 3)?,
            summary_keywords: count_var("TOPICSCOPE_SUMMARY_KEYWORDS", 10)?,
            output_path: env::var("TOPICSCOPE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("report.html")),
        };
        Ok(config)
    }

    /// Check the values the pipeline cannot run without.
    /// Call this after CLI overrides have been applied.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            anyhow::bail!("Report title is empty. Set TOPICSCOPE_TITLE or pass --title.");
        }
        if self.ngram_top_k == 0 {
            anyhow::bail!("TOPICSCOPE_NGRAM_TOP_K must be at least 1.");
        }
        if self.word_cloud_words == 0 {
            anyhow::bail!("TOPICSCOPE_WORD_CLOUD_WORDS must be at least 1.");
        }
        if self.ngram_sizes.is_empty() {
            anyhow::bail!("No n-gram sizes configured. Set TOPICSCOPE_NGRAM_SIZES, e.g. \"2,3\".");
        }
        Ok(())
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            title: self.title.clone(),
            language: self.language,
            lemmatize: self.lemmatize,
            ngram_sizes: self.ngram_sizes.clone(),
            ngram_top_k: self.ngram_top_k,
            word_cloud_words: self.word_cloud_words,
            ablation_top_n: self.ablation_top_n,
            outlier_limits: OutlierLimits {
                keywords: self.outlier_keywords,
                examples: self.outlier_examples,
            },
            summary_keywords: self.summary_keywords,
        }
    }
}

/// Parse a comma-separated list of n-gram sizes such as "1,2,3".
pub fn parse_ngram_sizes(raw: &str) -> Result<Vec<usize>> {
    let mut sizes = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n: usize = part
            .parse()
            .with_context(|| format!("Invalid n-gram size '{part}'"))?;
        if n == 0 {
            anyhow::bail!("N-gram sizes must be at least 1, got 0");
        }
        if !sizes.contains(&n) {
            sizes.push(n);
        }
    }
    Ok(sizes)
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("{name} must be a non-negative integer, got '{raw}'"))
}

fn count_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => parse_count(name, &raw),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ngram_sizes() {
        assert_eq!(parse_ngram_sizes("2,3").unwrap(), vec![2, 3]);
        assert_eq!(parse_ngram_sizes(" 1 , 2,2 ,").unwrap(), vec![1, 2]);
        assert!(parse_ngram_sizes("0").is_err());
        assert!(parse_ngram_sizes("two").is_err());
        assert!(parse_ngram_sizes("").unwrap().is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let config = Config {
            title: "  ".to_string(),
            language: Language::English,
            lemmatize: false,
            ngram_sizes: vec![2],
            ngram_top_k: 10,
            word_cloud_words: 100,
            ablation_top_n: None,
            outlier_keywords: 15,
            outlier_examples: 3,
            summary_keywords: 10,
            output_path: PathBuf::from("report.html"),
        };
        assert!(config.validate().is_err());

        let config = Config {
            title: "Corpus".to_string(),
            ..config
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis_options().outlier_limits.examples, 3);
    }

    #[test]
    fn test_validate_rejects_empty_word_cloud() {
        let config = Config {
            title: "Corpus".to_string(),
            language: Language::Spanish,
            lemmatize: false,
            ngram_sizes: vec![2, 3],
            ngram_top_k: 10,
            word_cloud_words: 0,
            ablation_top_n: None,
            outlier_keywords: 15,
            outlier_examples: 3,
            summary_keywords: 10,
            output_path: PathBuf::from("report.html"),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TOPICSCOPE_WORD_CLOUD_WORDS"));
    }
}
