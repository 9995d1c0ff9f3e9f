use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Plant;
use crate::layout::{GardenConstraints, GardenLayout};

/// Builds one random individual: an aspect-ratio-randomized grid sized from
/// `constraints.max_area`, filled cell-by-cell in random order with a
/// uniformly random catalog plant, skipping any placement that would push
/// cumulative water, cost, maintenance time, or occupied area past the
/// request's bounds.
/// The result may end up with fewer plants than cells — that is expected,
/// not an error.
pub fn random_individual<R: Rng>(
    constraints: &GardenConstraints,
    plants: &[Plant],
    rng: &mut R,
) -> GardenLayout {
    let area = constraints.max_area;
    let aspect_ratio = rng.gen_range(0.5..=2.0);
    let width = (area * aspect_ratio).sqrt();
    let height = area / width;

    let cell_size = rng.gen_range(0.5..=1.0_f64);
    let rows = ((height / cell_size).floor() as usize).max(1);
    let cols = ((width / cell_size).floor() as usize).max(1);

    let mut cells: Vec<Vec<Option<u32>>> = vec![vec![None; cols]; rows];
    let mut order: Vec<(usize, usize)> = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c))).collect();
    order.shuffle(rng);

    let mut water_used = 0.0;
    let mut cost_used = 0.0;
    let mut maintenance_used = 0.0;
    let mut area_used = 0.0;

    if plants.is_empty() {
        return GardenLayout::new(width, height, cells).unwrap_or_else(|_| {
            GardenLayout::new(1.0, 1.0, vec![vec![None]]).expect("unit layout is always valid")
        });
    }

    for (r, c) in order {
        let plant = &plants[rng.gen_range(0..plants.len())];
        let candidate_water = water_used + plant.weekly_water_liters;
        let candidate_cost = cost_used + plant.planting_cost();
        let candidate_maintenance = maintenance_used + plant.maintenance_minutes();
        let candidate_area = area_used + plant.size;

        if candidate_water > constraints.max_water_weekly
            || candidate_cost > constraints.max_budget
            || candidate_maintenance > constraints.maintenance_time_weekly as f64
            || candidate_area > constraints.max_area
        {
            continue;
        }

        cells[r][c] = Some(plant.id);
        water_used = candidate_water;
        cost_used = candidate_cost;
        maintenance_used = candidate_maintenance;
        area_used = candidate_area;
    }

    GardenLayout::new(width, height, cells)
        .unwrap_or_else(|_| GardenLayout::new(1.0, 1.0, vec![vec![None]]).expect("unit layout is always valid"))
}

/// Convenience for callers that already keyed the catalog by plant id.
pub fn plants_as_slice(plants: &HashMap<u32, Plant>) -> Vec<Plant> {
    plants.values().cloned().collect()
}
