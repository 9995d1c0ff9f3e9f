use rand::Rng;

use crate::clustering::features::UserFeatureVector;
use crate::clustering::kprototypes::MixedTypeClusterer;
use crate::clustering::silhouette::silhouette_score;
use crate::optimizer::CancellationToken;

/// Which scoring rule picks `k` out of the swept range, per the original
/// `clustering_service.py::find_optimal_k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KSelectionMethod {
    Silhouette,
    Elbow,
}

const K_SWEEP_N_INIT: usize = 5;

/// One candidate `k`'s fit, kept for diagnostics and for the elbow method's
/// need to see the whole cost curve.
#[derive(Clone, Debug)]
pub struct KCandidate {
    pub k: usize,
    pub cost: f64,
    pub silhouette: f64,
}

/// Sweeps `k` across `[k_min, min(k_max, n_samples / 10)]` and returns the
/// chosen `k` plus the full sweep, so a caller can log or persist it. If the
/// effective upper bound is below `k_min`, returns `k_min` without sweeping.
/// Honors cooperative cancellation between candidates (§5): once
/// `cancellation` trips, the sweep stops and selection proceeds over
/// whatever candidates were already evaluated.
pub fn select_k<R: Rng>(
    points: &[UserFeatureVector],
    k_min: usize,
    k_max: usize,
    method: KSelectionMethod,
    gamma: f64,
    rng: &mut R,
    cancellation: &CancellationToken,
) -> (usize, Vec<KCandidate>) {
    let effective_max = k_max.min((points.len() / 10).max(1));
    if effective_max < k_min {
        return (k_min, Vec::new());
    }

    let mut candidates = Vec::new();
    for k in k_min..=effective_max {
        if cancellation.is_cancelled() {
            log::debug!("k-sweep cancelled after {} candidate(s)", candidates.len());
            break;
        }
        let mut clusterer = MixedTypeClusterer::new(k, gamma, K_SWEEP_N_INIT);
        let outcome = clusterer.fit(points, rng);
        let silhouette = silhouette_score(points, &outcome.labels);
        candidates.push(KCandidate {
            k,
            cost: outcome.cost,
            silhouette,
        });
    }
    if candidates.is_empty() {
        return (k_min, candidates);
    }

    let chosen = match method {
        KSelectionMethod::Silhouette => candidates
            .iter()
            .max_by(|a, b| a.silhouette.total_cmp(&b.silhouette))
            .map(|c| c.k)
            .unwrap_or(k_min),
        KSelectionMethod::Elbow => elbow_k(&candidates),
    };

    (chosen, candidates)
}

/// The `k` with the largest absolute first difference in cost relative to
/// its predecessor — the point where adding another cluster stops helping
/// much. Falls back to the smallest swept `k` when fewer than two candidates
/// were evaluated.
fn elbow_k(candidates: &[KCandidate]) -> usize {
    if candidates.len() < 2 {
        return candidates.first().map(|c| c.k).unwrap_or(1);
    }
    candidates
        .windows(2)
        .map(|pair| (pair[0].k, (pair[0].cost - pair[1].cost).abs()))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(k, _)| k)
        .unwrap_or(candidates[0].k)
}
