//! The explicit, constructible configuration layer tying together the three
//! config structs each core already exposes (`GeneticConfig`,
//! `TrainingSettings`/`ScheduleSettings`), plus the handful of settings that
//! don't belong to either core. Grounded in the original service's
//! `app/core/config.py::Settings`, minus the fields this crate has no use
//! for (Mongo URI, JWT, HTTP host/port) — those belong to whatever binary
//! embeds this crate, not to the crate itself.
use std::env;
use std::path::PathBuf;

use crate::clustering::kselector::KSelectionMethod;
use crate::clustering::scheduler::ScheduleSettings;
use crate::clustering::training::TrainingSettings;
use crate::optimizer::config::GeneticConfig;

/// Where fitted cluster models are persisted. Matches
/// `MODEL_STORAGE_PATH`/`MODEL_VERSION` in the original settings.
#[derive(Clone, Debug)]
pub struct ModelStorageConfig {
    pub directory: PathBuf,
    pub version: String,
}

impl ModelStorageConfig {
    pub fn model_path(&self) -> PathBuf {
        self.directory.join(format!("cluster-model-{}.bin", self.version))
    }
}

impl Default for ModelStorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./models"),
            version: "v1".to_string(),
        }
    }
}

/// The complete, explicit configuration for both cores plus the periodic
/// jobs, built from defaults and overridden field-by-field from the process
/// environment — no config-file format or crate is introduced; everything
/// here was a scalar `Settings` field in the original, which this layer
/// reads with the same env-var names.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub genetic: GeneticConfig,
    pub training: TrainingSettings,
    pub schedule: ScheduleSettings,
    pub model_storage: ModelStorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            genetic: GeneticConfig::default(),
            training: TrainingSettings::default(),
            schedule: ScheduleSettings::default(),
            model_storage: ModelStorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Starts from defaults and overrides whichever of `MIN_CLUSTERS`,
    /// `MAX_CLUSTERS`, `OPTIMAL_CLUSTER_METHOD`, `MODEL_STORAGE_PATH` and
    /// `MODEL_VERSION` are set in the environment. Unset or unparseable
    /// variables fall back to the default rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_usize("MIN_CLUSTERS") {
            config.training.k_min = value;
        }
        if let Some(value) = env_usize("MAX_CLUSTERS") {
            config.training.k_max = value;
        }
        if let Ok(method) = env::var("OPTIMAL_CLUSTER_METHOD") {
            config.training.k_selection_method = match method.to_lowercase().as_str() {
                "elbow" => KSelectionMethod::Elbow,
                _ => KSelectionMethod::Silhouette,
            };
        }
        if let Ok(path) = env::var("MODEL_STORAGE_PATH") {
            config.model_storage.directory = PathBuf::from(path);
        }
        if let Ok(version) = env::var("MODEL_VERSION") {
            config.model_storage.version = version;
        }

        config
    }
}

fn env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}
