use std::collections::HashMap;

use rayon::prelude::*;

use crate::catalog::{CompatibilityTable, Plant};
use crate::layout::{evaluate, GardenConstraints, GardenLayout, GardenObjective};

/// Evaluates every layout in a population. Mirrors the teacher's
/// `Fitness::call_for_population` split between a sequential and a
/// `par_iter_mut` path, gated by `GeneticConfig::parallel_fitness` rather
/// than a thread_local cache, since evaluation here is a pure function of
/// immutable catalog data.
pub fn evaluate_population(
    layouts: &mut [GardenLayout],
    plants: &HashMap<u32, Plant>,
    compat: &CompatibilityTable,
    objective: GardenObjective,
    constraints: &GardenConstraints,
    parallel: bool,
) {
    if parallel {
        layouts.par_iter_mut().for_each(|layout| {
            evaluate(layout, plants, compat, objective, constraints);
        });
    } else {
        for layout in layouts.iter_mut() {
            evaluate(layout, plants, compat, objective, constraints);
        }
    }
}
