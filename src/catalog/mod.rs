//! The plant and compatibility catalog: read-only after load, safe to share
//! across concurrent optimizer runs without locking.
pub mod compatibility;
pub mod plant;
pub mod provider;

pub use compatibility::{CompatibilityPair, CompatibilityTable};
pub use plant::{Plant, PlantType, SunRequirement};
pub use provider::{CatalogProvider, InMemoryCatalogProvider};
