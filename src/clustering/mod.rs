//! The mixed-type user-clustering recommender: feature extraction, K-Prototypes
//! clustering, k-selection, persistence, recommendation scoring and the
//! periodic retrain/broadcast jobs that tie them together.
pub mod admin;
pub mod features;
pub mod kprototypes;
pub mod kselector;
pub mod model;
pub mod persistence;
pub mod provider;
pub mod recommend;
pub mod region;
pub mod scaler;
pub mod scheduler;
pub mod silhouette;
pub mod training;

pub use admin::{BroadcastReport, ClusterAdmin, ClusterSummary, TrainingStatusSummary};
pub use features::{extract_user_features, transform_one, FeaturePipeline, RawUserFeatures, UserFeatureVector};
pub use kprototypes::{FitOutcome, MixedTypeClusterer, Prototype};
pub use kselector::{select_k, KCandidate, KSelectionMethod};
pub use model::ClusterModel;
pub use provider::{
    CategoryBreakdown, GardenRecord, InMemoryUserGardenProvider, TrainingHistoryEntry, UserGardenProvider,
    UserRecord,
};
pub use recommend::RecommendationScorer;
pub use region::RegionDiscretizer;
pub use scaler::StandardScaler;
pub use scheduler::{PeriodicScheduler, ScheduleSettings};
pub use silhouette::silhouette_score;
pub use training::{TrainingPipeline, TrainingReport, TrainingSettings};
