use crate::layout::{GardenConstraints, GardenObjective};

/// One optimization request: the objective and the hard constraints to
/// search within. The catalog is supplied separately (it is shared,
/// read-only, and outlives any single request).
#[derive(Clone, Copy, Debug)]
pub struct LayoutRequest {
    pub objective: GardenObjective,
    pub constraints: GardenConstraints,
}

impl LayoutRequest {
    pub fn new(objective: GardenObjective, constraints: GardenConstraints) -> Self {
        Self {
            objective,
            constraints,
        }
    }
}
