use crate::clustering::features::UserFeatureVector;
use crate::clustering::provider::GardenRecord;

/// Ranks candidate gardens against a target user's feature vector by cosine
/// similarity over the shared numeric feature space, breaking ties by garden
/// id for determinism. Grounded in `recommendation_service.py`'s import of
/// `sklearn.metrics.pairwise.cosine_similarity` — the function the original
/// imported but never actually called, falling back to `np.random.random()`
/// instead (see the design notes' resolution of the recommendation-scoring
/// open question).
#[derive(Clone, Copy, Debug, Default)]
pub struct RecommendationScorer;

impl RecommendationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores and sorts `candidates` by descending similarity to `target`,
    /// each paired with its garden record.
    pub fn rank<'a>(
        &self,
        target: &UserFeatureVector,
        candidates: &'a [(UserFeatureVector, GardenRecord)],
    ) -> Vec<(&'a GardenRecord, f64)> {
        let mut scored: Vec<(&GardenRecord, f64)> = candidates
            .iter()
            .map(|(features, garden)| (garden, cosine_similarity(&target.numeric, &features.numeric)))
            .collect();
        scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            std::cmp::Ordering::Equal => a.0.id.cmp(&b.0.id),
            other => other,
        });
        scored
    }
}

fn cosine_similarity<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a <= 0.0 || norm_b <= 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::features::NUMERIC_FEATURE_COUNT;
    use crate::clustering::provider::CategoryBreakdown;
    use crate::layout::GardenObjective;

    fn feature(value: f64) -> UserFeatureVector {
        UserFeatureVector {
            numeric: [value; NUMERIC_FEATURE_COUNT],
            objective: GardenObjective::Alimenticio,
            region_id: 0,
        }
    }

    fn garden(id: &str) -> GardenRecord {
        GardenRecord {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            name: "garden".to_string(),
            description: String::new(),
            active: true,
            area: 1.0,
            weekly_water_liters: 10.0,
            maintenance_minutes: 30.0,
            plant_count: 4,
            time_of_life_days: 10,
            streak_days: 3,
            plant_types_present: vec![],
            category_breakdown: CategoryBreakdown::default(),
            objective: None,
            location: None,
        }
    }

    #[test]
    fn identical_vectors_score_highest() {
        let scorer = RecommendationScorer::new();
        let target = feature(1.0);
        let candidates = vec![(feature(1.0), garden("a")), (feature(-1.0), garden("b"))];
        let ranked = scorer.rank(&target, &candidates);
        assert_eq!(ranked[0].0.id, "a");
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn ties_break_by_garden_id() {
        let scorer = RecommendationScorer::new();
        let target = feature(1.0);
        let candidates = vec![(feature(2.0), garden("z")), (feature(2.0), garden("a"))];
        let ranked = scorer.rank(&target, &candidates);
        assert_eq!(ranked[0].0.id, "a");
    }
}
