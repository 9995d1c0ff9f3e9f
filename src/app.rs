//! Explicit application context: the handful of shared collaborators both
//! cores need, wired together once at startup and passed by reference
//! everywhere else. No global state, no service locator — callers that want
//! a different catalog or provider for a test construct their own context.
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;

use crate::catalog::{CatalogProvider, CompatibilityTable, Plant};
use crate::clustering::admin::ClusterAdmin;
use crate::clustering::model::ClusterModel;
use crate::clustering::provider::UserGardenProvider;
use crate::clustering::training::TrainingPipeline;
use crate::config::AppConfig;
use crate::error::DomainError;
use crate::notifications::PushNotifier;

/// The shared state a running service needs: the read-only catalog, the
/// user/garden store, the push notifier, the hot-swappable live cluster
/// model, and the resolved configuration triple.
pub struct AppContext<C: CatalogProvider, U: UserGardenProvider> {
    pub catalog: Arc<C>,
    pub user_gardens: Arc<U>,
    pub notifier: Arc<dyn PushNotifier>,
    pub live_model: Arc<ArcSwap<ClusterModel>>,
    pub config: AppConfig,
}

impl<C: CatalogProvider, U: UserGardenProvider + 'static> AppContext<C, U> {
    /// Builds a context with an empty placeholder model (`k=0`, no
    /// prototypes) — callers should run a `TrainingPipeline` before serving
    /// recommendations, or load a persisted model from disk.
    pub fn new(catalog: Arc<C>, user_gardens: Arc<U>, notifier: Arc<dyn PushNotifier>, config: AppConfig) -> Self {
        let placeholder = ClusterModel::new(0, 1.0, Default::default(), None, Vec::new(), 0.0, 0, Utc::now());
        Self {
            catalog,
            user_gardens,
            notifier,
            live_model: Arc::new(ArcSwap::from_pointee(placeholder)),
            config,
        }
    }

    /// Loads the persisted model at the configured path into the live slot,
    /// if one exists. Leaves the placeholder in place otherwise.
    pub fn load_persisted_model(&self) -> Result<(), DomainError> {
        let path = self.config.model_storage.model_path();
        if !path.exists() {
            return Ok(());
        }
        let model = crate::clustering::persistence::load(&path)?;
        self.live_model.store(Arc::new(model));
        Ok(())
    }

    pub fn training_pipeline(&self) -> TrainingPipeline<U> {
        TrainingPipeline::new(
            self.user_gardens.clone(),
            self.config.model_storage.model_path(),
            self.config.training,
        )
    }

    /// The `train`/`status`/`clusters`/`notify cluster <id>` admin surface
    /// (§6), wired to this context's shared provider, live model and
    /// notifier.
    pub fn cluster_admin(&self) -> ClusterAdmin<U> {
        ClusterAdmin::new(
            self.user_gardens.clone(),
            self.live_model.clone(),
            self.notifier.clone(),
            self.training_pipeline(),
        )
    }

    pub fn catalog_snapshot(&self) -> Result<(Vec<Plant>, CompatibilityTable), DomainError> {
        let plants = self.catalog.list_plants()?;
        let pairs = self.catalog.list_compatibility_pairs()?;
        Ok((plants, CompatibilityTable::build(&pairs)))
    }
}
