// Projection: parameter selection and the external reduction seam.

pub mod params;
pub mod traits;

use tracing::info;

use crate::error::{AnalysisError, Result};
use params::{ProjectionFamily, ReductionParams};
use traits::Projector;

/// Coordinates produced for one projection family.
#[derive(Debug, Clone)]
pub struct Projection {
    pub params: ReductionParams,
    pub points: Vec<[f64; 3]>,
}

/// Select parameters for `family` from the row count, run the projector and
/// check it returned one point per row.
pub fn project(
    projector: &dyn Projector,
    family: ProjectionFamily,
    embeddings: &[Vec<f32>],
) -> Result<Projection> {
    let params = params::select(family, embeddings.len())?;
    let points = projector.project(&params, embeddings)?;
    if points.len() != embeddings.len() {
        return Err(AnalysisError::upstream_unavailable(format!(
            "{family} returned {} points for {} rows",
            points.len(),
            embeddings.len()
        )));
    }
    info!(
        family = %family,
        rows = points.len(),
        neighborhood = params.neighbor_or_perplexity,
        "Projected embeddings to 3D"
    );
    Ok(Projection { params, points })
}
