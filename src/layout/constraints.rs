use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Hard, inviolable bounds for a single garden-layout request.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GardenConstraints {
    pub max_area: f64,
    pub max_water_weekly: f64,
    pub max_budget: f64,
    pub maintenance_time_weekly: u32,
}

impl GardenConstraints {
    pub fn new(
        max_area: f64,
        max_water_weekly: f64,
        max_budget: f64,
        maintenance_time_weekly: u32,
    ) -> Result<Self, DomainError> {
        if !(1.0..=5.0).contains(&max_area) {
            return Err(DomainError::invalid(
                "max_area",
                format!("area must be in [1.0,5.0] m^2, got {max_area}"),
            ));
        }
        if !(80.0..=200.0).contains(&max_water_weekly) {
            return Err(DomainError::invalid(
                "max_water_weekly",
                format!("weekly water must be in [80,200] L, got {max_water_weekly}"),
            ));
        }
        if !(200.0..=800.0).contains(&max_budget) {
            return Err(DomainError::invalid(
                "max_budget",
                format!("budget must be in [200,800], got {max_budget}"),
            ));
        }
        if maintenance_time_weekly < 30 || maintenance_time_weekly > 300 {
            return Err(DomainError::invalid(
                "maintenance_time_weekly",
                format!(
                    "maintenance time must be in [30,300] min/week, got {maintenance_time_weekly}"
                ),
            ));
        }
        Ok(Self {
            max_area,
            max_water_weekly,
            max_budget,
            maintenance_time_weekly,
        })
    }
}
