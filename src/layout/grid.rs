use crate::error::DomainError;
use std::collections::HashSet;

/// One candidate garden layout — the chromosome of the genetic search.
///
/// `clone()` (the derived [`Clone`] impl) is the only duplication path used
/// during evolution, so that crossover and mutation never alias a parent's
/// grid: every offspring owns its own `Vec<Vec<Option<u32>>>`.
#[derive(Clone, Debug)]
pub struct GardenLayout {
    width: f64,
    height: f64,
    cells: Vec<Vec<Option<u32>>>,
    pub fitness: f64,
    pub cee: f64,
    pub psntpa: f64,
    pub wce: f64,
    pub ue: f64,
}

impl GardenLayout {
    pub fn new(
        width: f64,
        height: f64,
        cells: Vec<Vec<Option<u32>>>,
    ) -> Result<Self, DomainError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(DomainError::invalid(
                "width/height",
                "garden dimensions must be positive",
            ));
        }
        let area = width * height;
        if !(1.0..=5.0).contains(&area) {
            return Err(DomainError::invalid(
                "width*height",
                format!("garden area must be in [1,5] m^2, got {area:.2}"),
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
            fitness: 0.0,
            cee: 0.0,
            psntpa: 0.0,
            wce: 0.0,
            ue: 0.0,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<u32>) {
        self.cells[row][col] = value;
    }

    pub fn cells(&self) -> &Vec<Vec<Option<u32>>> {
        &self.cells
    }

    /// Nominal garden area in m^2 (`width * height`), independent of how
    /// many cells are actually planted.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn total_plants(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }

    pub fn count_of(&self, plant_id: u32) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Some(plant_id))
            .count()
    }

    /// Distinct plant ids present in the layout, in no particular order.
    pub fn distinct_ids(&self) -> Vec<u32> {
        let set: HashSet<u32> = self.cells.iter().flatten().filter_map(|c| *c).collect();
        set.into_iter().collect()
    }

    /// Neighbor offsets used by CEE: right and down at distance 1, diagonal
    /// at distance sqrt(2).
    pub fn adjacency_pairs(&self) -> Vec<(u32, u32, f64)> {
        let rows = self.rows();
        let cols = self.cols();
        let mut pairs = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let Some(here) = self.cell(r, c) else {
                    continue;
                };
                let neighbors: [(usize, usize, f64); 3] = [
                    (r, c + 1, 1.0),
                    (r + 1, c, 1.0),
                    (r + 1, c + 1, std::f64::consts::SQRT_2),
                ];
                for (nr, nc, dist) in neighbors {
                    if nr < rows && nc < cols {
                        if let Some(other) = self.cell(nr, nc) {
                            pairs.push((here, other, dist));
                        }
                    }
                }
            }
        }
        pairs
    }
}
