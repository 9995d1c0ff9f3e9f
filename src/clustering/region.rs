use serde::{Deserialize, Serialize};

const MAX_ITERATIONS: usize = 100;
const CONVERGENCE_EPSILON: f64 = 1e-6;

/// Discretizes `(latitude, longitude)` pairs into a small number of region
/// ids via plain k-means. Neither the teacher nor the rest of the pack
/// depends on a k-means crate, so this is grounded directly in the original
/// pipeline's use of `sklearn.cluster.KMeans` over the two location columns
/// — reimplemented from scratch in the idiom the catalog's clusterer uses
/// elsewhere in this crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionDiscretizer {
    k: usize,
    centroids: Vec<(f64, f64)>,
}

impl RegionDiscretizer {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            k: n_clusters.max(1),
            centroids: Vec::new(),
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Fits centroids via Lloyd's algorithm seeded from evenly spaced
    /// points along the input, then returns each point's assigned region id.
    pub fn fit(&mut self, points: &[(f64, f64)]) -> Vec<u32> {
        let k = self.k.min(points.len().max(1));
        if points.is_empty() {
            self.centroids = vec![(0.0, 0.0); k];
            return Vec::new();
        }

        let stride = (points.len() / k).max(1);
        let mut centroids: Vec<(f64, f64)> =
            (0..k).map(|i| points[(i * stride).min(points.len() - 1)]).collect();

        let mut assignments = vec![0u32; points.len()];
        for _ in 0..MAX_ITERATIONS {
            let mut changed = false;
            for (index, point) in points.iter().enumerate() {
                let nearest = nearest_centroid(*point, &centroids);
                if assignments[index] != nearest as u32 {
                    assignments[index] = nearest as u32;
                    changed = true;
                }
            }

            let mut sums = vec![(0.0, 0.0); k];
            let mut counts = vec![0usize; k];
            for (point, &cluster) in points.iter().zip(assignments.iter()) {
                let cluster = cluster as usize;
                sums[cluster].0 += point.0;
                sums[cluster].1 += point.1;
                counts[cluster] += 1;
            }

            let mut max_shift: f64 = 0.0;
            for cluster in 0..k {
                if counts[cluster] == 0 {
                    continue;
                }
                let new_centroid = (
                    sums[cluster].0 / counts[cluster] as f64,
                    sums[cluster].1 / counts[cluster] as f64,
                );
                let shift = distance_squared(new_centroid, centroids[cluster]).sqrt();
                max_shift = max_shift.max(shift);
                centroids[cluster] = new_centroid;
            }

            if !changed || max_shift < CONVERGENCE_EPSILON {
                break;
            }
        }

        self.centroids = centroids;
        assignments
    }

    pub fn predict(&self, point: (f64, f64)) -> u32 {
        nearest_centroid(point, &self.centroids) as u32
    }
}

fn nearest_centroid(point: (f64, f64), centroids: &[(f64, f64)]) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance_squared(point, **a).total_cmp(&distance_squared(point, **b))
        })
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn distance_squared(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}
