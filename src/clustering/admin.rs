//! The clustering admin surface described in the external-interfaces design:
//! `train` (trigger a full retrain), `status` (last training summary),
//! `clusters` (sizes and centroids), and the `notify cluster <id>` broadcast
//! that ranks and pushes recommendations to one cluster's users. Grounded in
//! `training_service.py`'s admin endpoints and `recommendation_service.py`'s
//! per-user notification loop, collapsed into one collaborator so a binary
//! wiring the HTTP edge only needs to hold one handle.
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::json;

use crate::clustering::features::{extract_user_features, transform_one};
use crate::clustering::kprototypes::Prototype;
use crate::clustering::model::ClusterModel;
use crate::clustering::provider::{TrainingHistoryEntry, UserGardenProvider};
use crate::clustering::recommend::RecommendationScorer;
use crate::clustering::training::{TrainingPipeline, TrainingReport};
use crate::error::DomainError;
use crate::layout::GardenObjective;
use crate::notifications::PushNotifier;
use crate::optimizer::CancellationToken;

/// The `status` response: the live model's fit-time metadata plus the most
/// recent training-history row, when one has been recorded.
#[derive(Clone, Debug)]
pub struct TrainingStatusSummary {
    pub k: usize,
    pub silhouette_score: f64,
    pub n_samples: usize,
    pub fitted_at: DateTime<Utc>,
    pub last_training: Option<TrainingHistoryEntry>,
}

/// One row of the `clusters` response: a cluster's population size (from the
/// last training run) alongside its fitted prototype.
#[derive(Clone, Debug)]
pub struct ClusterSummary {
    pub cluster_id: u32,
    pub size: usize,
    pub numeric_centroid: Vec<f64>,
    pub objective_mode: GardenObjective,
    pub region_mode: u32,
}

/// How many pushes a `notify_cluster` call delivered, and how many it
/// skipped because the candidate pool for that user was empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub notified: usize,
    pub skipped_no_candidates: usize,
}

/// The admin-facing wrapper around the training pipeline, the live model,
/// and the push notifier. Not itself a network handler — a caller at the
/// HTTP edge maps these methods onto `train`/`status`/`clusters`/`notify`.
pub struct ClusterAdmin<P: UserGardenProvider> {
    provider: Arc<P>,
    live_model: Arc<ArcSwap<ClusterModel>>,
    notifier: Arc<dyn PushNotifier>,
    training: TrainingPipeline<P>,
}

impl<P: UserGardenProvider + 'static> ClusterAdmin<P> {
    pub fn new(
        provider: Arc<P>,
        live_model: Arc<ArcSwap<ClusterModel>>,
        notifier: Arc<dyn PushNotifier>,
        training: TrainingPipeline<P>,
    ) -> Self {
        Self {
            provider,
            live_model,
            notifier,
            training,
        }
    }

    /// Triggers a full retrain. On success the live model has already been
    /// hot-swapped by the time this returns; on failure the previous model
    /// remains active (§7, PersistenceFailure/InsufficientData semantics).
    pub fn train<R: Rng>(
        &self,
        rng: &mut R,
        cancellation: &CancellationToken,
    ) -> Result<TrainingReport, DomainError> {
        self.training.run(&self.live_model, rng, cancellation)
    }

    pub fn status(&self) -> Result<TrainingStatusSummary, DomainError> {
        let model = self.live_model.load();
        let last_training = self.provider.latest_training_history()?;
        Ok(TrainingStatusSummary {
            k: model.k,
            silhouette_score: model.silhouette_score,
            n_samples: model.n_samples,
            fitted_at: model.fitted_at,
            last_training,
        })
    }

    pub fn clusters(&self) -> Result<Vec<ClusterSummary>, DomainError> {
        let model = self.live_model.load();
        let sizes = self
            .provider
            .latest_training_history()?
            .map(|entry| entry.cluster_sizes)
            .unwrap_or_default();
        Ok(model
            .prototypes
            .iter()
            .enumerate()
            .map(|(id, proto)| cluster_summary(id as u32, proto, &sizes))
            .collect())
    }

    /// Iterates every user with a push token in `cluster_id`, ranks that
    /// user's candidate gardens (other active gardens in the same cluster)
    /// with the recommendation scorer, and pushes the top result. A user
    /// with no candidates is skipped, not treated as an error.
    pub fn notify_cluster(&self, cluster_id: u32) -> Result<BroadcastReport, DomainError> {
        let model = self.live_model.load();
        notify_cluster(&*self.provider, &model, &*self.notifier, cluster_id)
    }
}

/// The free-standing form of [`ClusterAdmin::notify_cluster`], usable by a
/// caller (the periodic scheduler) that already holds a provider/model/
/// notifier triple without constructing a whole `ClusterAdmin`.
pub fn notify_cluster<P: UserGardenProvider + ?Sized>(
    provider: &P,
    model: &ClusterModel,
    notifier: &dyn PushNotifier,
    cluster_id: u32,
) -> Result<BroadcastReport, DomainError> {
    let scorer = RecommendationScorer::new();
    let recipients = provider.users_with_push_token_in_cluster(cluster_id)?;

    let mut report = BroadcastReport::default();
    for user in &recipients {
        let owned = provider.gardens_by_owner(&user.id)?;
        let target_raw = extract_user_features(user, &owned);
        let target = transform_one(&target_raw, &model.scaler, model.region_discretizer.as_ref());

        let candidate_gardens = provider.active_gardens_in_cluster(cluster_id, &user.id)?;
        if candidate_gardens.is_empty() {
            report.skipped_no_candidates += 1;
            continue;
        }

        let mut scored_candidates = Vec::with_capacity(candidate_gardens.len());
        for garden in candidate_gardens {
            let Some(owner) = provider.user_by_id(&garden.owner_id)? else {
                continue;
            };
            let owner_gardens = provider.gardens_by_owner(&owner.id)?;
            let owner_raw = extract_user_features(&owner, &owner_gardens);
            let owner_features = transform_one(&owner_raw, &model.scaler, model.region_discretizer.as_ref());
            scored_candidates.push((owner_features, garden));
        }
        if scored_candidates.is_empty() {
            report.skipped_no_candidates += 1;
            continue;
        }

        let ranked = scorer.rank(&target, &scored_candidates);
        let Some((top_garden, score)) = ranked.first() else {
            report.skipped_no_candidates += 1;
            continue;
        };

        let data = json!({ "garden_id": top_garden.id, "score": score });
        notifier.send_to_user(
            &user.id,
            "A garden you might like",
            &format!("{} is a close match for your cluster", top_garden.name),
            &data,
        )?;
        report.notified += 1;
    }

    Ok(report)
}

fn cluster_summary(cluster_id: u32, prototype: &Prototype, sizes: &[usize]) -> ClusterSummary {
    ClusterSummary {
        cluster_id,
        size: sizes.get(cluster_id as usize).copied().unwrap_or(0),
        numeric_centroid: prototype.numeric_centroid.to_vec(),
        objective_mode: prototype.objective_mode,
        region_mode: prototype.region_mode,
    }
}
