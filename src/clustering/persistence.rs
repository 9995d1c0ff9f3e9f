use std::fs::{self, File};
use std::path::Path;

use crate::clustering::model::{ClusterModel, CURRENT_SCHEMA_VERSION};
use crate::error::DomainError;

/// Writes the model to `path` atomically: serialize to a sibling `.tmp`
/// file, `fsync` it, then `rename` over the destination. A reader can never
/// observe a half-written file, and a crash mid-write leaves the previous
/// version intact.
pub fn save(model: &ClusterModel, path: &Path) -> Result<(), DomainError> {
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)
            .map_err(|e| DomainError::PersistenceFailure(format!("creating {tmp_path:?}: {e}")))?;
        bincode::serialize_into(&file, model)
            .map_err(|e| DomainError::PersistenceFailure(format!("serializing model: {e}")))?;
        file.sync_all()
            .map_err(|e| DomainError::PersistenceFailure(format!("fsync {tmp_path:?}: {e}")))?;
    }
    fs::rename(&tmp_path, path)
        .map_err(|e| DomainError::PersistenceFailure(format!("renaming {tmp_path:?} to {path:?}: {e}")))?;
    Ok(())
}

/// Loads a previously saved model, rejecting one written under a different
/// schema version rather than guessing at field compatibility.
pub fn load(path: &Path) -> Result<ClusterModel, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::PersistenceFailure(format!("opening {path:?}: {e}")))?;
    let model: ClusterModel = bincode::deserialize_from(file)
        .map_err(|e| DomainError::PersistenceFailure(format!("deserializing model: {e}")))?;
    if model.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(DomainError::PersistenceFailure(format!(
            "model schema version {} does not match current version {}",
            model.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(model)
}
