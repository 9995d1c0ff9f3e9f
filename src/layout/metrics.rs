use std::collections::HashMap;

use super::constraints::GardenConstraints;
use super::grid::GardenLayout;
use super::objective::GardenObjective;
use crate::catalog::{CompatibilityTable, Plant};

const CEE_SIGMA: f64 = 1.5;
const UE_OPTIMUM: f64 = 0.85;

/// Computes the four fitness components for a layout and writes them, plus
/// the weighted aggregate, back onto the layout's metric fields. Pure
/// function of the layout and the read-only catalog: safe to call
/// concurrently for distinct layouts sharing the same `plants`/`compat`.
pub fn evaluate(
    layout: &mut GardenLayout,
    plants: &HashMap<u32, Plant>,
    compat: &CompatibilityTable,
    objective: GardenObjective,
    constraints: &GardenConstraints,
) {
    let cee = compatibility_efficiency(layout, plants, compat);
    let psntpa = yield_satisfaction(layout, plants, objective);
    let wce = water_efficiency(layout, plants, constraints);
    let ue = space_utilization(layout, plants);

    let weights = objective.weights();
    let fitness =
        weights.cee * cee + weights.psntpa * psntpa + weights.wce * wce + weights.ue * ue;

    layout.cee = cee;
    layout.psntpa = psntpa;
    layout.wce = wce;
    layout.ue = ue;
    layout.fitness = fitness;
}

fn species_of<'a>(plants: &'a HashMap<u32, Plant>, id: u32) -> Option<&'a str> {
    plants.get(&id).map(|p| p.species.as_str())
}

/// CEE: distance-weighted mean compatibility over adjacent planted pairs.
fn compatibility_efficiency(
    layout: &GardenLayout,
    plants: &HashMap<u32, Plant>,
    compat: &CompatibilityTable,
) -> f64 {
    let mut num = 0.0;
    let mut den = 0.0;
    for (a, b, dist) in layout.adjacency_pairs() {
        let (Some(sa), Some(sb)) = (species_of(plants, a), species_of(plants, b)) else {
            continue;
        };
        let w = (-dist / CEE_SIGMA).exp();
        num += w * compat.get(sa, sb);
        den += w;
    }
    if den == 0.0 {
        0.0
    } else {
        (num / den).clamp(0.0, 1.0)
    }
}

/// PSNTPA: half production-volume satisfaction, half target-type coverage.
fn yield_satisfaction(
    layout: &GardenLayout,
    plants: &HashMap<u32, Plant>,
    objective: GardenObjective,
) -> f64 {
    let distinct = layout.distinct_ids();
    if distinct.is_empty() {
        return 0.0;
    }
    let target_type = objective.target_type();

    let mut production = 0.0;
    for id in layout.cells().iter().flatten().flatten() {
        if let Some(plant) = plants.get(id) {
            production += plant.production_per_cycle();
        }
    }

    let target_count = distinct
        .iter()
        .filter(|id| plants.get(id).is_some_and(|p| p.has_type(target_type)))
        .count();

    let production_term = (production / 10.0).min(1.0);
    let coverage_term = (target_count as f64 / distinct.len() as f64).min(1.0);
    0.5 * production_term + 0.5 * coverage_term
}

/// WCE: weekly water draw against the request's budget.
fn water_efficiency(
    layout: &GardenLayout,
    plants: &HashMap<u32, Plant>,
    constraints: &GardenConstraints,
) -> f64 {
    let mut total_water = 0.0;
    for id in layout.distinct_ids() {
        if let Some(plant) = plants.get(&id) {
            total_water += plant.weekly_water_liters * layout.count_of(id) as f64;
        }
    }
    if total_water > constraints.max_water_weekly {
        0.0
    } else {
        (1.0 - total_water / constraints.max_water_weekly).clamp(0.0, 1.0)
    }
}

/// UE: occupied-area ratio, peaking at `UE_OPTIMUM` and decaying linearly
/// past it.
fn space_utilization(layout: &GardenLayout, plants: &HashMap<u32, Plant>) -> f64 {
    let mut occupied = 0.0;
    for id in layout.distinct_ids() {
        if let Some(plant) = plants.get(&id) {
            occupied += plant.size * layout.count_of(id) as f64;
        }
    }
    let utilization = occupied / layout.area();
    if utilization > UE_OPTIMUM {
        (1.0 - 2.0 * (utilization - UE_OPTIMUM)).max(0.0)
    } else {
        (utilization / UE_OPTIMUM).min(1.0)
    }
}
