// N-gram frequency extraction over the global token stream.
//
// Windows are counted in a map local to each call, so computations for
// different n never share state and can run in parallel. Ranking is by
// descending count; ties keep the order in which the n-gram first appeared.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::{AnalysisError, Result};

/// Ranked n-gram counts for one value of n.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NgramRecord {
    pub n: usize,
    pub k: usize,
    /// At most k entries, most frequent first
    pub ranked: Vec<(Vec<String>, usize)>,
}

impl NgramRecord {
    /// N-grams joined with spaces, for chart and table labels.
    pub fn labels(&self) -> Vec<String> {
        self.ranked.iter().map(|(gram, _)| gram.join(" ")).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.ranked.iter().map(|(_, count)| *count).collect()
    }

    /// "unigrams", "bigrams", "trigrams", otherwise "{n}-grams".
    pub fn kind_name(&self) -> String {
        match self.n {
            1 => "unigrams".to_string(),
            2 => "bigrams".to_string(),
            3 => "trigrams".to_string(),
            n => format!("{n}-grams"),
        }
    }
}

pub struct NgramAnalyzer<'a> {
    tokens: &'a [String],
    top_k: usize,
}

impl<'a> NgramAnalyzer<'a> {
    pub fn new(tokens: &'a [String], top_k: usize) -> Result<Self> {
        if tokens.is_empty() {
            return Err(AnalysisError::invalid_input("token stream is empty"));
        }
        Ok(Self { tokens, top_k })
    }

    /// Top-k most frequent contiguous n-token windows.
    pub fn compute(&self, n: usize) -> Result<NgramRecord> {
        let record = rank_ngrams(self.tokens, n, self.top_k)?;
        info!(
            n,
            distinct_top = record.ranked.len(),
            top_count = record.ranked.first().map(|(_, c)| *c).unwrap_or(0),
            "Computed n-grams"
        );
        Ok(record)
    }

    /// Compute several n at once. Each n is independent, so they run on the
    /// rayon pool; the result is identical to calling `compute` per n.
    pub fn compute_many(&self, ns: &[usize]) -> Result<BTreeMap<usize, NgramRecord>> {
        ns.par_iter()
            .map(|&n| self.compute(n).map(|record| (n, record)))
            .collect()
    }
}

/// Count every window of length `n` and return the `k` most frequent.
pub fn rank_ngrams(tokens: &[String], n: usize, k: usize) -> Result<NgramRecord> {
    if n < 1 {
        return Err(AnalysisError::invalid_input("n must be >= 1"));
    }
    if tokens.is_empty() {
        return Err(AnalysisError::invalid_input("token stream is empty"));
    }

    // window -> (count, index of first occurrence)
    let mut counts: HashMap<&[String], (usize, usize)> = HashMap::new();
    for (start, window) in tokens.windows(n).enumerate() {
        counts.entry(window).or_insert((0, start)).0 += 1;
    }

    let mut entries: Vec<(&[String], usize, usize)> = counts
        .into_iter()
        .map(|(window, (count, first))| (window, count, first))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let ranked = entries
        .into_iter()
        .take(k)
        .map(|(window, count, _)| (window.to_vec(), count))
        .collect();

    Ok(NgramRecord { n, k, ranked })
}
