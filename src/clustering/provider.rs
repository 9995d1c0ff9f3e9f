use chrono::{DateTime, Utc};

use crate::catalog::PlantType;
use crate::error::DomainError;
use crate::layout::GardenObjective;

/// A user document's known fields. Source stores are opaque maps; this
/// collaborator is where schema-specific extraction with defaults happens,
/// so the feature pipeline itself never sees a raw document.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    pub experience_level: u8,
    pub has_push_token: bool,
    pub profile_image_present: bool,
    pub account_age_days: u32,
}

/// Per-category share of a garden's planted area, in `[0,1]` each.
#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryBreakdown {
    pub vegetable: f64,
    pub medicinal: f64,
    pub ornamental: f64,
    pub aromatic: f64,
}

/// A garden document's known fields, already normalized to one canonical
/// schema (see the design notes on the category-distribution schema
/// collapse): whichever of `layout.categoryBreakdown` or
/// `metadata.inputParameters.categoryDistribution` the store used, the
/// provider maps it into `category_breakdown()` before this type is built.
#[derive(Clone, Debug)]
pub struct GardenRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub area: f64,
    pub weekly_water_liters: f64,
    pub maintenance_minutes: f64,
    pub plant_count: u32,
    pub time_of_life_days: u32,
    pub streak_days: u32,
    pub plant_types_present: Vec<PlantType>,
    pub category_breakdown: CategoryBreakdown,
    pub objective: Option<GardenObjective>,
    pub location: Option<(f64, f64)>,
}

impl GardenRecord {
    pub fn category_breakdown(&self) -> CategoryBreakdown {
        self.category_breakdown
    }

    pub fn objective(&self) -> Option<GardenObjective> {
        self.objective
    }
}

/// One row of the persisted training history: "training history entry".
#[derive(Clone, Debug)]
pub struct TrainingHistoryEntry {
    pub trained_at: DateTime<Utc>,
    pub k: usize,
    pub n_samples: usize,
    pub silhouette_score: f64,
    pub cluster_sizes: Vec<usize>,
}

/// Read/write access to users and gardens, and the training history log.
/// Implementations are store-specific (database, in-memory, etc); the
/// clustering core only ever sees this trait.
pub trait UserGardenProvider: Send + Sync {
    fn list_users(&self) -> Result<Vec<UserRecord>, DomainError>;
    fn gardens_by_owner(&self, owner_id: &str) -> Result<Vec<GardenRecord>, DomainError>;
    fn user_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, DomainError>;
    fn update_cluster_label(&self, user_id: &str, cluster_label: u32) -> Result<(), DomainError>;
    fn append_training_history(&self, entry: TrainingHistoryEntry) -> Result<(), DomainError>;
    /// The most recently appended training-history row, if any — the
    /// "last training summary" the admin `status` operation surfaces.
    fn latest_training_history(&self) -> Result<Option<TrainingHistoryEntry>, DomainError>;
    /// All active gardens owned by users carrying the given cluster label,
    /// excluding `exclude_owner_id` — the candidate pool for §4.7.
    fn active_gardens_in_cluster(
        &self,
        cluster_label: u32,
        exclude_owner_id: &str,
    ) -> Result<Vec<GardenRecord>, DomainError>;
    /// Users with a push token, scoped to one cluster — the weekly broadcast
    /// audience for §4.8.
    fn users_with_push_token_in_cluster(
        &self,
        cluster_label: u32,
    ) -> Result<Vec<UserRecord>, DomainError>;
}

/// An in-memory provider backed by plain vectors and a label map, for tests
/// and the demo binary.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserGardenProvider {
    pub users: Vec<UserRecord>,
    pub gardens: Vec<GardenRecord>,
    pub cluster_labels: std::sync::Mutex<std::collections::HashMap<String, u32>>,
    pub training_history: std::sync::Mutex<Vec<TrainingHistoryEntry>>,
}

impl InMemoryUserGardenProvider {
    pub fn new(users: Vec<UserRecord>, gardens: Vec<GardenRecord>) -> Self {
        Self {
            users,
            gardens,
            cluster_labels: std::sync::Mutex::new(std::collections::HashMap::new()),
            training_history: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl UserGardenProvider for InMemoryUserGardenProvider {
    fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.users.clone())
    }

    fn gardens_by_owner(&self, owner_id: &str) -> Result<Vec<GardenRecord>, DomainError> {
        Ok(self
            .gardens
            .iter()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn user_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn update_cluster_label(&self, user_id: &str, cluster_label: u32) -> Result<(), DomainError> {
        self.cluster_labels
            .lock()
            .expect("cluster label map mutex poisoned")
            .insert(user_id.to_string(), cluster_label);
        Ok(())
    }

    fn append_training_history(&self, entry: TrainingHistoryEntry) -> Result<(), DomainError> {
        self.training_history
            .lock()
            .expect("training history mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn latest_training_history(&self) -> Result<Option<TrainingHistoryEntry>, DomainError> {
        Ok(self
            .training_history
            .lock()
            .expect("training history mutex poisoned")
            .last()
            .cloned())
    }

    fn active_gardens_in_cluster(
        &self,
        cluster_label: u32,
        exclude_owner_id: &str,
    ) -> Result<Vec<GardenRecord>, DomainError> {
        let labels = self
            .cluster_labels
            .lock()
            .expect("cluster label map mutex poisoned");
        Ok(self
            .gardens
            .iter()
            .filter(|g| {
                g.active
                    && g.owner_id != exclude_owner_id
                    && labels.get(&g.owner_id) == Some(&cluster_label)
            })
            .cloned()
            .collect())
    }

    fn users_with_push_token_in_cluster(
        &self,
        cluster_label: u32,
    ) -> Result<Vec<UserRecord>, DomainError> {
        let labels = self
            .cluster_labels
            .lock()
            .expect("cluster label map mutex poisoned");
        Ok(self
            .users
            .iter()
            .filter(|u| u.has_push_token && labels.get(&u.id) == Some(&cluster_label))
            .cloned()
            .collect())
    }
}
