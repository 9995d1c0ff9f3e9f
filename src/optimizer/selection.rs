use rand::Rng;

use crate::layout::GardenLayout;

/// Selects one parent from the population by `tournament_size`-way tournament:
/// sample that many candidates uniformly with replacement and keep the
/// fittest.
pub fn tournament_select<'a, R: Rng>(
    layouts: &'a [GardenLayout],
    tournament_size: usize,
    rng: &mut R,
) -> &'a GardenLayout {
    let mut best: Option<&GardenLayout> = None;
    for _ in 0..tournament_size {
        let candidate = &layouts[rng.gen_range(0..layouts.len())];
        best = match best {
            Some(current) if current.fitness >= candidate.fitness => Some(current),
            _ => Some(candidate),
        };
    }
    best.expect("tournament_size is validated to be at least 1")
}
