use crate::clustering::provider::{GardenRecord, UserRecord};
use crate::clustering::region::RegionDiscretizer;
use crate::clustering::scaler::StandardScaler;
use crate::error::DomainError;
use crate::layout::GardenObjective;

/// The 16 numeric scalars extracted per user, in the fixed order the scaler
/// and the clusterer both expect. Matches `numeric_cols` in the original
/// feature pipeline exactly.
pub const NUMERIC_FEATURE_NAMES: [&str; 16] = [
    "experience_level",
    "count_gardens",
    "has_push_token",
    "profile_image_present",
    "account_age_days",
    "avg_garden_area",
    "sum_weekly_water_liters",
    "avg_maintenance_minutes",
    "avg_count_plants",
    "avg_time_of_life",
    "avg_streak",
    "avg_plant_diversity",
    "pct_vegetable",
    "pct_medicinal",
    "pct_ornamental",
    "pct_aromatic",
]; // avg_time_of_life/avg_streak track engagement: days gardens have existed /
   // consecutive days of activity, per the source's `timeOfLife`/`streakOfDays`.

pub const NUMERIC_FEATURE_COUNT: usize = NUMERIC_FEATURE_NAMES.len();

const DEFAULT_LATITUDE: f64 = 16.75;
const DEFAULT_LONGITUDE: f64 = -93.11;

/// One user's features before scaling or region discretization: the direct
/// analogue of `extract_user_features`'s returned dict.
#[derive(Clone, Debug)]
pub struct RawUserFeatures {
    pub numeric: [f64; NUMERIC_FEATURE_COUNT],
    pub objective: GardenObjective,
    pub latitude: f64,
    pub longitude: f64,
}

/// One user's features after scaling and region discretization — what the
/// clusterer actually consumes.
#[derive(Clone, Debug)]
pub struct UserFeatureVector {
    pub numeric: [f64; NUMERIC_FEATURE_COUNT],
    pub objective: GardenObjective,
    pub region_id: u32,
}

/// Extracts one user's raw features from their record and the gardens they
/// own. Missing aggregate values default to zero; missing location defaults
/// to the catalog's home region.
pub fn extract_user_features(user: &UserRecord, gardens: &[GardenRecord]) -> RawUserFeatures {
    let mut numeric = [0.0; NUMERIC_FEATURE_COUNT];
    numeric[0] = user.experience_level as f64;
    numeric[1] = gardens.len() as f64;
    numeric[2] = if user.has_push_token { 1.0 } else { 0.0 };
    numeric[3] = if user.profile_image_present { 1.0 } else { 0.0 };
    numeric[4] = user.account_age_days as f64;

    if gardens.is_empty() {
        return RawUserFeatures {
            numeric,
            objective: GardenObjective::default(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        };
    }

    let n = gardens.len() as f64;
    numeric[5] = gardens.iter().map(|g| g.area).sum::<f64>() / n;
    numeric[6] = gardens.iter().map(|g| g.weekly_water_liters).sum::<f64>();
    numeric[7] = gardens.iter().map(|g| g.maintenance_minutes).sum::<f64>() / n;
    numeric[8] = gardens.iter().map(|g| g.plant_count as f64).sum::<f64>() / n;
    numeric[9] = gardens.iter().map(|g| g.time_of_life_days as f64).sum::<f64>() / n;
    numeric[10] = gardens.iter().map(|g| g.streak_days as f64).sum::<f64>() / n;

    let mut distinct_types = std::collections::HashSet::new();
    for garden in gardens {
        for t in &garden.plant_types_present {
            distinct_types.insert(*t);
        }
    }
    numeric[11] = distinct_types.len() as f64;

    let breakdowns: Vec<_> = gardens.iter().map(|g| g.category_breakdown()).collect();
    numeric[12] = breakdowns.iter().map(|b| b.vegetable).sum::<f64>() / n;
    numeric[13] = breakdowns.iter().map(|b| b.medicinal).sum::<f64>() / n;
    numeric[14] = breakdowns.iter().map(|b| b.ornamental).sum::<f64>() / n;
    numeric[15] = breakdowns.iter().map(|b| b.aromatic).sum::<f64>() / n;

    let mut objective_counts: std::collections::HashMap<GardenObjective, usize> =
        std::collections::HashMap::new();
    for garden in gardens {
        if let Some(objective) = garden.objective() {
            *objective_counts.entry(objective).or_insert(0) += 1;
        }
    }
    let objective = objective_counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(objective, _)| objective)
        .unwrap_or_default();

    let (latitude, longitude) = gardens
        .iter()
        .find_map(|g| g.location)
        .unwrap_or((DEFAULT_LATITUDE, DEFAULT_LONGITUDE));

    RawUserFeatures {
        numeric,
        objective,
        latitude,
        longitude,
    }
}

/// Ties the scaler and the region discretizer together behind the fit/transform
/// split the original pipeline exposes, so a caller fits once at training time
/// and transforms repeatedly at prediction time with the same parameters.
#[derive(Clone, Debug, Default)]
pub struct FeaturePipeline {
    scaler: StandardScaler,
    region_discretizer: Option<RegionDiscretizer>,
    fitted: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn region_discretizer(&self) -> Option<&RegionDiscretizer> {
        self.region_discretizer.as_ref()
    }

    pub fn fit_transform(&mut self, raw: &[RawUserFeatures]) -> Vec<UserFeatureVector> {
        self.scaler.fit(raw.iter().map(|r| &r.numeric));

        let locations: Vec<(f64, f64)> = raw.iter().map(|r| (r.latitude, r.longitude)).collect();
        let n_clusters = (10usize).min(raw.len() / 10);
        let region_ids = if n_clusters >= 2 {
            let mut discretizer = RegionDiscretizer::new(n_clusters);
            let ids = discretizer.fit(&locations);
            self.region_discretizer = Some(discretizer);
            ids
        } else {
            self.region_discretizer = None;
            vec![0; raw.len()]
        };

        self.fitted = true;
        raw.iter()
            .zip(region_ids)
            .map(|(r, region_id)| UserFeatureVector {
                numeric: self.scaler.transform(&r.numeric),
                objective: r.objective,
                region_id,
            })
            .collect()
    }

    pub fn transform(&self, raw: &[RawUserFeatures]) -> Result<Vec<UserFeatureVector>, DomainError> {
        if !self.fitted {
            return Err(DomainError::invalid(
                "feature_pipeline",
                "transform called before fit_transform",
            ));
        }
        Ok(raw.iter().map(|r| transform_one(r, &self.scaler, self.region_discretizer.as_ref())).collect())
    }
}

/// Transforms a single raw feature vector against an already-fitted scaler
/// and (optional) region discretizer, without needing a whole
/// [`FeaturePipeline`] wrapper — the shape a caller holding a persisted
/// [`crate::clustering::model::ClusterModel`] needs for scoring one user at a
/// time (e.g. the recommendation and broadcast paths).
pub fn transform_one(
    raw: &RawUserFeatures,
    scaler: &StandardScaler,
    region_discretizer: Option<&RegionDiscretizer>,
) -> UserFeatureVector {
    let region_id = region_discretizer
        .map(|d| d.predict((raw.latitude, raw.longitude)))
        .unwrap_or(0);
    UserFeatureVector {
        numeric: scaler.transform(&raw.numeric),
        objective: raw.objective,
        region_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::provider::UserRecord;

    #[test]
    fn extract_with_no_gardens_uses_documented_defaults() {
        let user = UserRecord {
            id: "u1".to_string(),
            experience_level: 2,
            has_push_token: false,
            profile_image_present: false,
            account_age_days: 10,
        };
        let raw = extract_user_features(&user, &[]);
        assert_eq!(raw.objective, GardenObjective::Alimenticio);
        assert_eq!(raw.latitude, DEFAULT_LATITUDE);
        assert_eq!(raw.longitude, DEFAULT_LONGITUDE);
        assert_eq!(raw.numeric[5], 0.0);
    }

    #[test]
    fn round_trip_transform_matches_fit_transform_on_identical_input() {
        let user = UserRecord {
            id: "u1".to_string(),
            experience_level: 3,
            has_push_token: true,
            profile_image_present: true,
            account_age_days: 100,
        };
        let raw = vec![extract_user_features(&user, &[]); 25];
        let mut pipeline = FeaturePipeline::new();
        let fitted = pipeline.fit_transform(&raw);
        let transformed = pipeline.transform(&raw).unwrap();
        for (a, b) in fitted.iter().zip(transformed.iter()) {
            for (x, y) in a.numeric.iter().zip(b.numeric.iter()) {
                assert!((x - y).abs() < 1e-9);
            }
            assert_eq!(a.region_id, b.region_id);
        }
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let pipeline = FeaturePipeline::new();
        let user = UserRecord {
            id: "u1".to_string(),
            experience_level: 1,
            has_push_token: false,
            profile_image_present: false,
            account_age_days: 1,
        };
        let raw = vec![extract_user_features(&user, &[])];
        assert!(pipeline.transform(&raw).is_err());
    }
}
