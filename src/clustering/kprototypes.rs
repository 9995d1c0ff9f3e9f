use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clustering::features::{UserFeatureVector, NUMERIC_FEATURE_COUNT};
use crate::layout::GardenObjective;

const MAX_ITERATIONS: usize = 100;

/// One cluster's prototype: a numeric centroid (arithmetic mean) plus the
/// mode of its categorical columns (objective and region), per the mixed-type
/// K-Prototypes formulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prototype {
    pub numeric_centroid: [f64; NUMERIC_FEATURE_COUNT],
    pub objective_mode: GardenObjective,
    pub region_mode: u32,
}

/// Mixed-type K-Prototypes clustering: squared Euclidean distance over the
/// scaled numeric columns, plus `gamma` per categorical mismatch. Grounded in
/// `clustering_service.py`'s `KPrototypesClusterer`, minus its Python-object
/// plumbing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MixedTypeClusterer {
    pub k: usize,
    pub gamma: f64,
    pub n_init: usize,
    prototypes: Vec<Prototype>,
}

#[derive(Clone, Debug)]
pub struct FitOutcome {
    pub labels: Vec<u32>,
    pub cost: f64,
}

impl MixedTypeClusterer {
    pub fn new(k: usize, gamma: f64, n_init: usize) -> Self {
        Self {
            k,
            gamma,
            n_init: n_init.max(1),
            prototypes: Vec::new(),
        }
    }

    pub fn prototypes(&self) -> &[Prototype] {
        &self.prototypes
    }

    /// Runs `n_init` independent Huang-style initializations and keeps the
    /// lowest-cost result, mirroring scikit-learn-style K-means/K-prototypes
    /// restart behavior.
    pub fn fit<R: Rng>(&mut self, points: &[UserFeatureVector], rng: &mut R) -> FitOutcome {
        assert!(!points.is_empty(), "cannot fit a clusterer on zero points");
        let k = self.k.min(points.len());

        let mut best: Option<(Vec<Prototype>, Vec<u32>, f64)> = None;
        for _ in 0..self.n_init {
            let prototypes = huang_init(points, k, rng);
            let (prototypes, labels, cost) = lloyd(points, prototypes, self.gamma);
            if best.as_ref().map(|(_, _, c)| cost < *c).unwrap_or(true) {
                best = Some((prototypes, labels, cost));
            }
        }

        let (prototypes, labels, cost) = best.expect("n_init is at least one");
        self.prototypes = prototypes;
        FitOutcome { labels, cost }
    }

    pub fn predict(&self, point: &UserFeatureVector) -> u32 {
        nearest_prototype(point, &self.prototypes, self.gamma) as u32
    }

    pub fn cost(&self, points: &[UserFeatureVector]) -> f64 {
        points
            .iter()
            .map(|p| distance(p, &self.prototypes[nearest_prototype(p, &self.prototypes, self.gamma)], self.gamma))
            .sum()
    }
}

/// Huang's initialization: the first prototype is a uniformly random point;
/// each subsequent one is chosen with probability proportional to its
/// squared distance from the nearest prototype already picked (k-means++ in
/// spirit, adapted to the mixed distance).
fn huang_init<R: Rng>(points: &[UserFeatureVector], k: usize, rng: &mut R) -> Vec<Prototype> {
    let mut prototypes = Vec::with_capacity(k);
    let first = rng.gen_range(0..points.len());
    prototypes.push(prototype_from_point(&points[first]));

    while prototypes.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                prototypes
                    .iter()
                    .map(|proto| distance_to_prototype(p, proto, 1.0))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            let fallback = rng.gen_range(0..points.len());
            prototypes.push(prototype_from_point(&points[fallback]));
            continue;
        }
        let mut roll = rng.gen::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (index, weight) in weights.iter().enumerate() {
            if roll <= *weight {
                chosen = index;
                break;
            }
            roll -= weight;
        }
        prototypes.push(prototype_from_point(&points[chosen]));
    }
    prototypes
}

fn prototype_from_point(point: &UserFeatureVector) -> Prototype {
    Prototype {
        numeric_centroid: point.numeric,
        objective_mode: point.objective,
        region_mode: point.region_id,
    }
}

fn lloyd(points: &[UserFeatureVector], mut prototypes: Vec<Prototype>, gamma: f64) -> (Vec<Prototype>, Vec<u32>, f64) {
    let k = prototypes.len();
    let mut labels = vec![0u32; points.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (index, point) in points.iter().enumerate() {
            let nearest = nearest_prototype(point, &prototypes, gamma) as u32;
            if labels[index] != nearest {
                labels[index] = nearest;
                changed = true;
            }
        }

        for cluster in 0..k {
            let members: Vec<&UserFeatureVector> = points
                .iter()
                .zip(labels.iter())
                .filter(|(_, &label)| label as usize == cluster)
                .map(|(p, _)| p)
                .collect();
            if members.is_empty() {
                continue;
            }
            prototypes[cluster] = Prototype {
                numeric_centroid: numeric_mean(&members),
                objective_mode: mode_of(members.iter().map(|p| p.objective)),
                region_mode: mode_of(members.iter().map(|p| p.region_id)),
            };
        }

        if !changed {
            break;
        }
    }

    let cost = points
        .iter()
        .zip(labels.iter())
        .map(|(p, &label)| distance_to_prototype(p, &prototypes[label as usize], gamma))
        .sum();

    (prototypes, labels, cost)
}

fn numeric_mean(members: &[&UserFeatureVector]) -> [f64; NUMERIC_FEATURE_COUNT] {
    let mut sums = [0.0; NUMERIC_FEATURE_COUNT];
    for member in members {
        for (column, value) in member.numeric.iter().enumerate() {
            sums[column] += value;
        }
    }
    let n = members.len() as f64;
    sums.map(|sum| sum / n)
}

fn mode_of<T: Eq + std::hash::Hash + Copy>(values: impl Iterator<Item = T>) -> T {
    let mut counts = std::collections::HashMap::new();
    let mut order = Vec::new();
    for value in values {
        if !counts.contains_key(&value) {
            order.push(value);
        }
        *counts.entry(value).or_insert(0usize) += 1;
    }
    order
        .into_iter()
        .max_by_key(|value| counts[value])
        .expect("mode_of called on a non-empty iterator")
}

fn nearest_prototype(point: &UserFeatureVector, prototypes: &[Prototype], gamma: f64) -> usize {
    prototypes
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance_to_prototype(point, a, gamma).total_cmp(&distance_to_prototype(point, b, gamma))
        })
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn distance(point: &UserFeatureVector, prototype: &Prototype, gamma: f64) -> f64 {
    distance_to_prototype(point, prototype, gamma)
}

fn distance_to_prototype(point: &UserFeatureVector, prototype: &Prototype, gamma: f64) -> f64 {
    let numeric: f64 = point
        .numeric
        .iter()
        .zip(prototype.numeric_centroid.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    let mut mismatches = 0.0;
    if point.objective != prototype.objective_mode {
        mismatches += 1.0;
    }
    if point.region_id != prototype.region_mode {
        mismatches += 1.0;
    }
    numeric + gamma * mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn point(value: f64, objective: GardenObjective, region_id: u32) -> UserFeatureVector {
        UserFeatureVector {
            numeric: [value; NUMERIC_FEATURE_COUNT],
            objective,
            region_id,
        }
    }

    #[test]
    fn fit_separates_two_obviously_distinct_groups() {
        let mut points = Vec::new();
        for _ in 0..10 {
            points.push(point(-5.0, GardenObjective::Alimenticio, 0));
        }
        for _ in 0..10 {
            points.push(point(5.0, GardenObjective::Ornamental, 1));
        }
        let mut clusterer = MixedTypeClusterer::new(2, 1.0, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = clusterer.fit(&points, &mut rng);
        assert_eq!(outcome.labels[0], outcome.labels[5]);
        assert_eq!(outcome.labels[10], outcome.labels[15]);
        assert_ne!(outcome.labels[0], outcome.labels[10]);
    }

    #[test]
    fn predict_matches_one_of_the_fitted_labels() {
        let points = vec![
            point(-5.0, GardenObjective::Alimenticio, 0),
            point(-4.9, GardenObjective::Alimenticio, 0),
            point(5.0, GardenObjective::Ornamental, 1),
            point(5.1, GardenObjective::Ornamental, 1),
        ];
        let mut clusterer = MixedTypeClusterer::new(2, 1.0, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = clusterer.fit(&points, &mut rng);
        let predicted = clusterer.predict(&points[0]);
        assert_eq!(predicted, outcome.labels[0]);
    }

    #[test]
    fn mode_of_breaks_ties_deterministically_by_first_occurrence() {
        let values = vec![1u32, 2, 1, 2];
        assert_eq!(mode_of(values.into_iter()), 1);
    }
}
