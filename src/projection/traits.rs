// Projector trait: the external dimensionality-reduction step.
//
// Implementations take the parameters chosen by the selector and return one
// 3D point per embedding row, in row order.

use std::collections::BTreeMap;

use super::params::{ProjectionFamily, ReductionParams};
use crate::error::{AnalysisError, Result};

pub trait Projector {
    fn project(&self, params: &ReductionParams, embeddings: &[Vec<f32>]) -> Result<Vec<[f64; 3]>>;
}

/// Serves coordinates that were computed ahead of time, keyed by family.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedProjector {
    coordinates: BTreeMap<ProjectionFamily, Vec<[f64; 3]>>,
}

impl PrecomputedProjector {
    pub fn new(coordinates: BTreeMap<ProjectionFamily, Vec<[f64; 3]>>) -> Self {
        Self { coordinates }
    }

    /// Build from string family keys ("umap", "tsne"); unknown keys are
    /// ignored.
    pub fn from_keyed(keyed: &BTreeMap<String, Vec<[f64; 3]>>) -> Self {
        let coordinates = ProjectionFamily::ALL
            .into_iter()
            .filter_map(|family| keyed.get(family.key()).map(|pts| (family, pts.clone())))
            .collect();
        Self { coordinates }
    }

    pub fn families(&self) -> Vec<ProjectionFamily> {
        self.coordinates.keys().copied().collect()
    }
}

impl Projector for PrecomputedProjector {
    fn project(&self, params: &ReductionParams, embeddings: &[Vec<f32>]) -> Result<Vec<[f64; 3]>> {
        let points = self.coordinates.get(&params.family).ok_or_else(|| {
            AnalysisError::upstream_unavailable(format!("no {} coordinates were computed", params.family))
        })?;
        if points.len() != embeddings.len() {
            return Err(AnalysisError::upstream_unavailable(format!(
                "{} coordinates cover {} rows, expected {}",
                params.family,
                points.len(),
                embeddings.len()
            )));
        }
        Ok(points.clone())
    }
}
