use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;
use rand::Rng;

use crate::clustering::features::{extract_user_features, FeaturePipeline};
use crate::clustering::kprototypes::MixedTypeClusterer;
use crate::clustering::kselector::{select_k, KSelectionMethod};
use crate::clustering::model::ClusterModel;
use crate::clustering::persistence;
use crate::clustering::provider::{TrainingHistoryEntry, UserGardenProvider};
use crate::clustering::silhouette::silhouette_score;
use crate::error::DomainError;
use crate::optimizer::CancellationToken;

const MINIMUM_USERS_FOR_TRAINING: usize = 10;
const FINAL_FIT_N_INIT: usize = 10;

/// Fixed sweep bounds and method, mirroring the bounds `find_optimal_k`
/// sweeps in the original service.
#[derive(Clone, Copy, Debug)]
pub struct TrainingSettings {
    pub k_min: usize,
    pub k_max: usize,
    pub k_selection_method: KSelectionMethod,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            k_min: 3,
            k_max: 15,
            k_selection_method: KSelectionMethod::Silhouette,
        }
    }
}

/// The full retraining unit: load users and gardens, extract and fit
/// features, sweep for `k`, fit the final clusterer, persist the model
/// atomically, write cluster labels back, and append a training-history
/// row. Mirrors `train_clustering_model` end to end.
pub struct TrainingPipeline<P: UserGardenProvider> {
    provider: Arc<P>,
    model_path: PathBuf,
    settings: TrainingSettings,
}

#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub k: usize,
    pub n_samples: usize,
    pub silhouette_score: f64,
}

impl<P: UserGardenProvider> TrainingPipeline<P> {
    pub fn new(provider: Arc<P>, model_path: PathBuf, settings: TrainingSettings) -> Self {
        Self {
            provider,
            model_path,
            settings,
        }
    }

    /// Runs the full retraining unit, honoring cooperative cancellation at
    /// generation/iteration boundaries the way `GeneticOptimizer::run` does
    /// for the layout optimizer (§5): checked between k-sweep candidates and
    /// once more before the final fit, since neither phase has a meaningful
    /// partial result to publish.
    pub fn run<R: Rng>(
        &self,
        live_model: &ArcSwap<ClusterModel>,
        rng: &mut R,
        cancellation: &CancellationToken,
    ) -> Result<TrainingReport, DomainError> {
        let users = self.provider.list_users()?;
        if users.len() < MINIMUM_USERS_FOR_TRAINING {
            return Err(DomainError::InsufficientData {
                found: users.len(),
                required: MINIMUM_USERS_FOR_TRAINING,
            });
        }

        let mut raw_features = Vec::with_capacity(users.len());
        for user in &users {
            let gardens = self.provider.gardens_by_owner(&user.id)?;
            raw_features.push(extract_user_features(user, &gardens));
        }

        let mut pipeline = FeaturePipeline::new();
        let points = pipeline.fit_transform(&raw_features);
        let gamma = pipeline.scaler().mean_scale();

        let (k, _candidates) = select_k(
            &points,
            self.settings.k_min,
            self.settings.k_max,
            self.settings.k_selection_method,
            gamma,
            rng,
            cancellation,
        );

        if cancellation.is_cancelled() {
            log::info!("training cancelled before the final fit");
            return Err(DomainError::Cancelled {
                reason: "cancelled before the final clusterer fit".to_string(),
            });
        }

        let mut clusterer = MixedTypeClusterer::new(k, gamma, FINAL_FIT_N_INIT);
        let outcome = clusterer.fit(&points, rng);
        let silhouette = silhouette_score(&points, &outcome.labels);
        let fitted_at = Utc::now();

        let model = ClusterModel::new(
            k,
            gamma,
            pipeline.scaler().clone(),
            pipeline.region_discretizer().cloned(),
            clusterer.prototypes().to_vec(),
            silhouette,
            points.len(),
            fitted_at,
        );

        persistence::save(&model, &self.model_path)?;
        live_model.store(Arc::new(model));

        for (user, &label) in users.iter().zip(outcome.labels.iter()) {
            self.provider.update_cluster_label(&user.id, label)?;
        }

        let mut cluster_sizes = vec![0usize; k];
        for &label in &outcome.labels {
            cluster_sizes[label as usize] += 1;
        }
        self.provider.append_training_history(TrainingHistoryEntry {
            trained_at: fitted_at,
            k,
            n_samples: points.len(),
            silhouette_score: silhouette,
            cluster_sizes,
        })?;

        Ok(TrainingReport {
            k,
            n_samples: points.len(),
            silhouette_score: silhouette,
        })
    }
}
