use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An unordered pair of species with a compatibility score in `[-1, 1]`.
/// Canonicalized so `plant1 <= plant2` lexicographically, mirroring the
/// symmetric lookup the table provides at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompatibilityPair {
    pub plant1: String,
    pub plant2: String,
    pub compatibility: f64,
}

impl CompatibilityPair {
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        compatibility: f64,
    ) -> Result<Self, DomainError> {
        let a = a.into();
        let b = b.into();
        if !(-1.0..=1.0).contains(&compatibility) {
            return Err(DomainError::invalid(
                "compatibility",
                format!("compatibility must be in [-1,1], got {compatibility}"),
            ));
        }
        if a.is_empty() || b.is_empty() {
            return Err(DomainError::invalid(
                "plant1/plant2",
                "species names cannot be empty",
            ));
        }
        let (plant1, plant2) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self {
            plant1,
            plant2,
            compatibility,
        })
    }
}

/// Symmetric lookup structure built from the catalog's compatibility pairs.
/// `C(a,b) = C(b,a)`; a missing pair resolves to `0.0`.
#[derive(Clone, Debug, Default)]
pub struct CompatibilityTable {
    values: HashMap<(String, String), f64>,
}

impl CompatibilityTable {
    pub fn build(pairs: &[CompatibilityPair]) -> Self {
        let mut values = HashMap::with_capacity(pairs.len());
        for pair in pairs {
            let key = Self::canonical_key(&pair.plant1, &pair.plant2);
            values.insert(key, pair.compatibility);
        }
        Self { values }
    }

    fn canonical_key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    pub fn get(&self, a: &str, b: &str) -> f64 {
        self.values
            .get(&Self::canonical_key(a, b))
            .copied()
            .unwrap_or(0.0)
    }
}
