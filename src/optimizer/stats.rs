/// Per-generation telemetry, useful for reporters and for diagnosing why a
/// run stopped early.
#[derive(Clone, Copy, Debug)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub fitness_variance: f64,
    pub stale_generations: usize,
}

impl GenerationStats {
    pub fn log(&self) {
        log::debug!(
            "generation {}: best={:.4} mean={:.4} variance={:.6} stale={}",
            self.generation,
            self.best_fitness,
            self.mean_fitness,
            self.fitness_variance,
            self.stale_generations
        );
    }
}
