use crate::layout::GardenLayout;

/// A generation's worth of candidate layouts, plus the bookkeeping needed to
/// report progress and detect convergence.
#[derive(Clone, Debug)]
pub struct Population {
    pub layouts: Vec<GardenLayout>,
}

impl Population {
    pub fn new(layouts: Vec<GardenLayout>) -> Self {
        Self { layouts }
    }

    pub fn size(&self) -> usize {
        self.layouts.len()
    }

    pub fn best(&self) -> Option<&GardenLayout> {
        self.layouts
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    /// Sorts in place by fitness, best first.
    pub fn sort_descending(&mut self) {
        self.layouts
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    pub fn fitness_mean(&self) -> f64 {
        if self.layouts.is_empty() {
            return 0.0;
        }
        self.layouts.iter().map(|l| l.fitness).sum::<f64>() / self.layouts.len() as f64
    }

    pub fn fitness_variance(&self) -> f64 {
        if self.layouts.is_empty() {
            return 0.0;
        }
        let mean = self.fitness_mean();
        self.layouts
            .iter()
            .map(|l| (l.fitness - mean).powi(2))
            .sum::<f64>()
            / self.layouts.len() as f64
    }
}
