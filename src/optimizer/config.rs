use crate::error::DomainError;

/// Tunables for one optimization run. Constructed through [`GeneticConfigBuilder`]
/// so that defaults live in one place and validation happens once, at `build()`,
/// rather than being re-checked on every generation.
#[derive(Clone, Copy, Debug)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub tournament_size: usize,
    pub elite_size: usize,
    pub patience: usize,
    pub stale_variance_threshold: f64,
    pub parallel_fitness: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            max_generations: 150,
            crossover_probability: 0.85,
            mutation_probability: 0.08,
            tournament_size: 3,
            elite_size: 3,
            patience: 20,
            stale_variance_threshold: 1e-3,
            parallel_fitness: false,
        }
    }
}

/// Error returned when a [`GeneticConfigBuilder`] has invalid or missing
/// configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromGeneticConfigBuilderError(pub &'static str);

#[derive(Clone, Copy, Debug)]
pub struct GeneticConfigBuilder {
    population_size: usize,
    max_generations: usize,
    crossover_probability: f64,
    mutation_probability: f64,
    tournament_size: usize,
    elite_size: usize,
    patience: usize,
    stale_variance_threshold: f64,
    parallel_fitness: bool,
}

impl Default for GeneticConfigBuilder {
    fn default() -> Self {
        let defaults = GeneticConfig::default();
        Self {
            population_size: defaults.population_size,
            max_generations: defaults.max_generations,
            crossover_probability: defaults.crossover_probability,
            mutation_probability: defaults.mutation_probability,
            tournament_size: defaults.tournament_size,
            elite_size: defaults.elite_size,
            patience: defaults.patience,
            stale_variance_threshold: defaults.stale_variance_threshold,
            parallel_fitness: defaults.parallel_fitness,
        }
    }
}

impl GeneticConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }
    pub fn with_crossover_probability(mut self, crossover_probability: f64) -> Self {
        self.crossover_probability = crossover_probability;
        self
    }
    pub fn with_mutation_probability(mut self, mutation_probability: f64) -> Self {
        self.mutation_probability = mutation_probability;
        self
    }
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }
    pub fn with_elite_size(mut self, elite_size: usize) -> Self {
        self.elite_size = elite_size;
        self
    }
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }
    pub fn with_stale_variance_threshold(mut self, stale_variance_threshold: f64) -> Self {
        self.stale_variance_threshold = stale_variance_threshold;
        self
    }
    pub fn with_parallel_fitness(mut self, parallel_fitness: bool) -> Self {
        self.parallel_fitness = parallel_fitness;
        self
    }

    pub fn build(self) -> Result<GeneticConfig, TryFromGeneticConfigBuilderError> {
        if !(10..=100).contains(&self.population_size) {
            return Err(TryFromGeneticConfigBuilderError(
                "population_size must be in [10,100]",
            ));
        }
        if self.elite_size >= self.population_size {
            return Err(TryFromGeneticConfigBuilderError(
                "elite_size must be smaller than population_size",
            ));
        }
        if self.tournament_size < 2 || self.tournament_size > self.population_size {
            return Err(TryFromGeneticConfigBuilderError(
                "tournament_size must be in [2, population_size]",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(TryFromGeneticConfigBuilderError(
                "crossover_probability must be in [0,1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(TryFromGeneticConfigBuilderError(
                "mutation_probability must be in [0,1]",
            ));
        }
        if !(50..=500).contains(&self.max_generations) {
            return Err(TryFromGeneticConfigBuilderError(
                "max_generations must be in [50,500]",
            ));
        }
        Ok(GeneticConfig {
            population_size: self.population_size,
            max_generations: self.max_generations,
            crossover_probability: self.crossover_probability,
            mutation_probability: self.mutation_probability,
            tournament_size: self.tournament_size,
            elite_size: self.elite_size,
            patience: self.patience,
            stale_variance_threshold: self.stale_variance_threshold,
            parallel_fitness: self.parallel_fitness,
        })
    }
}

impl TryFrom<GeneticConfigBuilder> for GeneticConfig {
    type Error = DomainError;
    fn try_from(builder: GeneticConfigBuilder) -> Result<Self, Self::Error> {
        builder
            .build()
            .map_err(|e| DomainError::invalid("genetic_config", e.0))
    }
}
