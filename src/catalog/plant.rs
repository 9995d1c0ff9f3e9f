use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The four plant categories a layout can target. A plant may belong to more
/// than one at once (e.g. an aromatic medicinal herb).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
    Vegetable,
    Medicinal,
    Aromatic,
    Ornamental,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SunRequirement {
    High,
    Medium,
    Low,
}

/// Immutable catalog entry. Once loaded at startup, plants are never
/// mutated; validation happens once, at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plant {
    pub id: u32,
    pub species: String,
    pub scientific_name: String,
    pub plant_type: Vec<PlantType>,
    pub sun_requirement: SunRequirement,
    pub weekly_water_liters: f64,
    pub harvest_days: u32,
    pub soil_type: String,
    pub water_per_kg: f64,
    pub benefits: Vec<String>,
    pub size: f64,
}

impl Plant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        species: impl Into<String>,
        scientific_name: impl Into<String>,
        plant_type: Vec<PlantType>,
        sun_requirement: SunRequirement,
        weekly_water_liters: f64,
        harvest_days: u32,
        soil_type: impl Into<String>,
        water_per_kg: f64,
        benefits: Vec<String>,
        size: f64,
    ) -> Result<Self, DomainError> {
        if !(1..=50).contains(&id) {
            return Err(DomainError::invalid(
                "id",
                format!("plant id must be in [1,50], got {id}"),
            ));
        }
        if size <= 0.0 {
            return Err(DomainError::invalid(
                "size",
                format!("size must be positive, got {size}"),
            ));
        }
        if weekly_water_liters < 0.0 {
            return Err(DomainError::invalid(
                "weekly_water_liters",
                format!("weekly water cannot be negative, got {weekly_water_liters}"),
            ));
        }
        if harvest_days == 0 {
            return Err(DomainError::invalid(
                "harvest_days",
                "harvest_days must be positive",
            ));
        }
        Ok(Self {
            id,
            species: species.into(),
            scientific_name: scientific_name.into(),
            plant_type,
            sun_requirement,
            weekly_water_liters,
            harvest_days,
            soil_type: soil_type.into(),
            water_per_kg,
            benefits,
            size,
        })
    }

    pub fn has_type(&self, plant_type: PlantType) -> bool {
        self.plant_type.contains(&plant_type)
    }

    /// Estimated production per cycle, in kg: `size * 10 * min(harvest_days/100, 1.5)`.
    pub fn production_per_cycle(&self) -> f64 {
        let base = self.size * 10.0;
        let time_factor = (self.harvest_days as f64 / 100.0).min(1.5);
        base * time_factor
    }

    /// Cost of planting one unit of this species: `size * 50` monetary units.
    pub fn planting_cost(&self) -> f64 {
        self.size * 50.0
    }

    /// Weekly upkeep estimate used to gate initialization against
    /// `maintenanceTime` (see Open Question 3 in the design notes):
    /// `size * 5` minutes/week.
    pub fn maintenance_minutes(&self) -> f64 {
        self.size * 5.0
    }
}
