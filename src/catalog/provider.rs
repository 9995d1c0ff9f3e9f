use super::compatibility::CompatibilityPair;
use super::plant::Plant;
use crate::error::DomainError;

/// Two read operations, mirroring the original `IPlantRepository` /
/// `ICompatibilityRepository` contracts collapsed into a single capability
/// record (see design notes on polymorphic repositories): no inheritance,
/// just a trait object the use case accepts.
pub trait CatalogProvider: Send + Sync {
    fn list_plants(&self) -> Result<Vec<Plant>, DomainError>;
    fn list_compatibility_pairs(&self) -> Result<Vec<CompatibilityPair>, DomainError>;
}

/// An in-memory catalog, loaded once at startup and immutable thereafter.
/// The production collaborator is a database-backed implementation of the
/// same trait; this one is useful for tests and for the demo binary.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogProvider {
    plants: Vec<Plant>,
    pairs: Vec<CompatibilityPair>,
}

impl InMemoryCatalogProvider {
    pub fn new(plants: Vec<Plant>, pairs: Vec<CompatibilityPair>) -> Self {
        Self { plants, pairs }
    }
}

impl CatalogProvider for InMemoryCatalogProvider {
    fn list_plants(&self) -> Result<Vec<Plant>, DomainError> {
        Ok(self.plants.clone())
    }

    fn list_compatibility_pairs(&self) -> Result<Vec<CompatibilityPair>, DomainError> {
        Ok(self.pairs.clone())
    }
}
