use crate::clustering::features::UserFeatureVector;

/// Mean silhouette score over the numeric feature space only, matching
/// `sklearn.metrics.silhouette_score`'s default Euclidean behavior. Returns
/// `0.0` when fewer than two clusters are populated, since silhouette is
/// undefined there.
pub fn silhouette_score(points: &[UserFeatureVector], labels: &[u32]) -> f64 {
    let distinct: std::collections::HashSet<u32> = labels.iter().copied().collect();
    if distinct.len() < 2 || points.len() < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for (index, point) in points.iter().enumerate() {
        let own_label = labels[index];

        let own_cluster_distances: Vec<f64> = points
            .iter()
            .enumerate()
            .filter(|(other_index, _)| *other_index != index && labels[*other_index] == own_label)
            .map(|(_, other)| euclidean(point, other))
            .collect();

        if own_cluster_distances.is_empty() {
            continue;
        }
        let a = own_cluster_distances.iter().sum::<f64>() / own_cluster_distances.len() as f64;

        let b = distinct
            .iter()
            .filter(|&&label| label != own_label)
            .map(|&label| {
                let distances: Vec<f64> = points
                    .iter()
                    .enumerate()
                    .filter(|(other_index, _)| labels[*other_index] == label)
                    .map(|(_, other)| euclidean(point, other))
                    .collect();
                distances.iter().sum::<f64>() / distances.len() as f64
            })
            .fold(f64::INFINITY, f64::min);

        let denominator = a.max(b);
        let silhouette = if denominator > 0.0 { (b - a) / denominator } else { 0.0 };
        total += silhouette;
    }

    total / points.len() as f64
}

fn euclidean(a: &UserFeatureVector, b: &UserFeatureVector) -> f64 {
    a.numeric
        .iter()
        .zip(b.numeric.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
