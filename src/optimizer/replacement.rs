use crate::layout::GardenLayout;

/// Elitist μ+λ replacement: the top `elite_size` parents survive untouched;
/// the remaining slots are filled from the pool of (non-elite parents ∪
/// offspring), sorted by fitness descending.
pub fn replace(
    mut parents: Vec<GardenLayout>,
    offspring: Vec<GardenLayout>,
    elite_size: usize,
) -> Vec<GardenLayout> {
    parents.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    let target_size = parents.len();
    let elite_size = elite_size.min(target_size);

    let elite: Vec<GardenLayout> = parents.drain(..elite_size).collect();
    let mut pool = parents;
    pool.extend(offspring);
    pool.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    pool.truncate(target_size - elite_size);

    let mut next_generation = elite;
    next_generation.extend(pool);
    next_generation
}
