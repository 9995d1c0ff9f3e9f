use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::layout::GardenLayout;

/// Two-point row-wise crossover: if both parents have identical row and
/// column counts and at least 3 rows, picks interior cut points
/// `cut1 ∈ {1..rows-2}`, `cut2 ∈ {cut1+1..rows-1}` and swaps the row band
/// `[cut1, cut2)` between the two parents, producing two offspring of the
/// same shape. Otherwise (shapes differ, or too few rows), both parents are
/// cloned through unchanged, same as when crossover does not fire.
pub fn crossover<R: Rng>(
    parent_a: &GardenLayout,
    parent_b: &GardenLayout,
    crossover_probability: f64,
    rng: &mut R,
) -> (GardenLayout, GardenLayout) {
    let mut child_a = parent_a.clone();
    let mut child_b = parent_b.clone();

    if parent_a.rows() != parent_b.rows() || parent_a.cols() != parent_b.cols() {
        return (child_a, child_b);
    }
    let rows = parent_a.rows();
    if rows < 3 {
        return (child_a, child_b);
    }
    let sampler = Bernoulli::new(crossover_probability).expect("probability validated in [0,1]");
    if !sampler.sample(rng) {
        return (child_a, child_b);
    }

    let cut1 = rng.gen_range(1..=rows - 2);
    let cut2 = rng.gen_range(cut1 + 1..=rows - 1);
    let cols = parent_a.cols();
    for row in cut1..cut2 {
        for col in 0..cols {
            child_a.set_cell(row, col, parent_b.cell(row, col));
            child_b.set_cell(row, col, parent_a.cell(row, col));
        }
    }
    (child_a, child_b)
}
