use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::layout::GardenLayout;

/// Swap mutation: with probability `mutation_probability`, draw two cells in
/// the layout uniformly (possibly the same cell) and exchange their
/// contents. A no-op on layouts with fewer than two cells.
pub fn mutate<R: Rng>(layout: &mut GardenLayout, mutation_probability: f64, rng: &mut R) {
    let rows = layout.rows();
    let cols = layout.cols();
    if rows * cols < 2 {
        return;
    }
    let sampler = Bernoulli::new(mutation_probability).expect("probability validated in [0,1]");
    if !sampler.sample(rng) {
        return;
    }

    let total = rows * cols;
    let mut first = rng.gen_range(0..total);
    let mut second = rng.gen_range(0..total);
    if first > second {
        std::mem::swap(&mut first, &mut second);
    }
    let (r1, c1) = (first / cols, first % cols);
    let (r2, c2) = (second / cols, second % cols);

    let a = layout.cell(r1, c1);
    let b = layout.cell(r2, c2);
    layout.set_cell(r1, c1, b);
    layout.set_cell(r2, c2, a);
}
