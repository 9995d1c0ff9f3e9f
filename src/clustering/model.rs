use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clustering::kprototypes::Prototype;
use crate::clustering::region::RegionDiscretizer;
use crate::clustering::scaler::StandardScaler;

/// Bumped whenever the persisted layout changes shape. `load` rejects a file
/// whose version doesn't match, rather than guessing at a migration.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The complete fitted state needed to score and predict, persisted as one
/// unit: the scaler, the region discretizer, the cluster prototypes, and the
/// metadata a caller needs to judge freshness. Grounded in
/// `training_service.py`'s saved model bundle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusterModel {
    pub schema_version: u32,
    pub k: usize,
    pub gamma: f64,
    pub scaler: StandardScaler,
    pub region_discretizer: Option<RegionDiscretizer>,
    pub prototypes: Vec<Prototype>,
    pub silhouette_score: f64,
    pub n_samples: usize,
    pub fitted_at: DateTime<Utc>,
}

impl ClusterModel {
    pub fn new(
        k: usize,
        gamma: f64,
        scaler: StandardScaler,
        region_discretizer: Option<RegionDiscretizer>,
        prototypes: Vec<Prototype>,
        silhouette_score: f64,
        n_samples: usize,
        fitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            k,
            gamma,
            scaler,
            region_discretizer,
            prototypes,
            silhouette_score,
            n_samples,
            fitted_at,
        }
    }
}
