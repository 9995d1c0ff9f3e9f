use crate::catalog::PlantType;
use serde::{Deserialize, Serialize};

/// The garden's primary objective. Determines the fixed weight vector used
/// when aggregating the four fitness components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenObjective {
    Alimenticio,
    Medicinal,
    Sostenible,
    Ornamental,
}

impl Default for GardenObjective {
    fn default() -> Self {
        GardenObjective::Alimenticio
    }
}

/// The weights for CEE, PSNTPA, WCE and UE respectively.
#[derive(Clone, Copy, Debug)]
pub struct ObjectiveWeights {
    pub cee: f64,
    pub psntpa: f64,
    pub wce: f64,
    pub ue: f64,
}

impl GardenObjective {
    pub fn weights(&self) -> ObjectiveWeights {
        match self {
            GardenObjective::Alimenticio => ObjectiveWeights {
                cee: 0.20,
                psntpa: 0.50,
                wce: 0.20,
                ue: 0.10,
            },
            GardenObjective::Medicinal => ObjectiveWeights {
                cee: 0.25,
                psntpa: 0.45,
                wce: 0.15,
                ue: 0.15,
            },
            GardenObjective::Sostenible => ObjectiveWeights {
                cee: 0.25,
                psntpa: 0.20,
                wce: 0.40,
                ue: 0.15,
            },
            GardenObjective::Ornamental => ObjectiveWeights {
                cee: 0.20,
                psntpa: 0.40,
                wce: 0.15,
                ue: 0.25,
            },
        }
    }

    /// The plant type PSNTPA rewards for this objective. `sostenible` has no
    /// explicit mapping upstream; resolved to `Medicinal` per DESIGN.md.
    pub fn target_type(&self) -> PlantType {
        match self {
            GardenObjective::Alimenticio => PlantType::Vegetable,
            GardenObjective::Medicinal => PlantType::Medicinal,
            GardenObjective::Sostenible => PlantType::Medicinal,
            GardenObjective::Ornamental => PlantType::Ornamental,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_per_objective() {
        for objective in [
            GardenObjective::Alimenticio,
            GardenObjective::Medicinal,
            GardenObjective::Sostenible,
            GardenObjective::Ornamental,
        ] {
            let w = objective.weights();
            let sum = w.cee + w.psntpa + w.wce + w.ue;
            assert!((sum - 1.0).abs() < 1e-9, "{objective:?} weights sum to {sum}");
        }
    }
}
