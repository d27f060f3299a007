// Adaptive parameters for the 3D projections.
//
// Both families scale their neighborhood with sqrt(N), bounded to [5, 50]
// and always below the sample count. The selector only computes numbers; the
// projection itself is run by whatever sits behind the Projector trait.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Fewest samples a 3D projection can be computed from.
pub const MIN_SAMPLES: usize = 3;

pub const N_COMPONENTS: usize = 3;
pub const METRIC: &str = "cosine";
pub const SEED: u64 = 42;

const MIN_NEIGHBORHOOD: usize = 5;
const MAX_NEIGHBORHOOD: usize = 50;
const MIN_ITERATIONS: usize = 750;
const ITERATIONS_PER_SQRT_SAMPLE: f64 = 250.0;
const UMAP_MIN_DIST: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionFamily {
    /// Neighbor-graph projection (UMAP)
    Umap,
    /// Perplexity-based projection (t-SNE)
    Tsne,
}

impl ProjectionFamily {
    pub const ALL: [ProjectionFamily; 2] = [ProjectionFamily::Umap, ProjectionFamily::Tsne];

    pub fn key(self) -> &'static str {
        match self {
            ProjectionFamily::Umap => "umap",
            ProjectionFamily::Tsne => "tsne",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProjectionFamily::Umap => "UMAP",
            ProjectionFamily::Tsne => "t-SNE",
        }
    }
}

impl fmt::Display for ProjectionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionParams {
    pub family: ProjectionFamily,
    pub n_components: usize,
    /// n_neighbors for UMAP, perplexity for t-SNE
    pub neighbor_or_perplexity: usize,
    /// Optimization budget; only t-SNE takes one
    pub iterations: Option<usize>,
    /// UMAP only
    pub min_dist: Option<f64>,
    pub metric: String,
    pub seed: u64,
}

fn check_samples(n: usize) -> Result<()> {
    if n < MIN_SAMPLES {
        return Err(AnalysisError::insufficient_samples(MIN_SAMPLES, n));
    }
    Ok(())
}

fn sqrt_rounded(n: usize) -> usize {
    (n as f64).sqrt().round() as usize
}

/// Clamp to [lo, hi]; when the bounds cross, the upper bound wins.
fn clamp_upper_wins(value: usize, lo: usize, hi: usize) -> usize {
    value.max(lo).min(hi)
}

/// UMAP n_neighbors: round(sqrt N) clamped to [5, min(50, N-1)].
pub fn neighbor_count(n: usize) -> Result<usize> {
    check_samples(n)?;
    Ok(clamp_upper_wins(
        sqrt_rounded(n),
        MIN_NEIGHBORHOOD,
        MAX_NEIGHBORHOOD.min(n - 1),
    ))
}

/// t-SNE perplexity: round(sqrt N) clamped to [5, min(50, max(2, N-1))].
/// Always strictly below N.
pub fn perplexity(n: usize) -> Result<usize> {
    check_samples(n)?;
    Ok(clamp_upper_wins(
        sqrt_rounded(n),
        MIN_NEIGHBORHOOD,
        MAX_NEIGHBORHOOD.min((n - 1).max(2)),
    ))
}

/// t-SNE iterations: max(750, round(250 * sqrt N)).
pub fn iteration_budget(n: usize) -> Result<usize> {
    check_samples(n)?;
    let scaled = (ITERATIONS_PER_SQRT_SAMPLE * (n as f64).sqrt()).round() as usize;
    Ok(scaled.max(MIN_ITERATIONS))
}

/// Full parameter set for one family and sample count.
pub fn select(family: ProjectionFamily, n: usize) -> Result<ReductionParams> {
    let params = match family {
        ProjectionFamily::Umap => ReductionParams {
            family,
            n_components: N_COMPONENTS,
            neighbor_or_perplexity: neighbor_count(n)?,
            iterations: None,
            min_dist: Some(UMAP_MIN_DIST),
            metric: METRIC.to_string(),
            seed: SEED,
        },
        ProjectionFamily::Tsne => ReductionParams {
            family,
            n_components: N_COMPONENTS,
            neighbor_or_perplexity: perplexity(n)?,
            iterations: Some(iteration_budget(n)?),
            min_dist: None,
            metric: METRIC.to_string(),
            seed: SEED,
        },
    };
    debug!(
        family = %family,
        samples = n,
        neighborhood = params.neighbor_or_perplexity,
        iterations = ?params.iterations,
        "Selected projection parameters"
    );
    Ok(params)
}
