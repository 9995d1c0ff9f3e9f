use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;

use crate::catalog::{CompatibilityTable, Plant};
use crate::layout::GardenLayout;
use crate::optimizer::cancellation::CancellationToken;
use crate::optimizer::config::GeneticConfig;
use crate::optimizer::crossover::crossover;
use crate::optimizer::fitness::evaluate_population;
use crate::optimizer::init::random_individual;
use crate::optimizer::mutate::mutate;
use crate::optimizer::population::Population;
use crate::optimizer::replacement::replace;
use crate::optimizer::request::LayoutRequest;
use crate::optimizer::response::{
    ConvergenceReason, LayoutSolution, OptimizationOutcome, PlantingCalendarEntry,
};
use crate::optimizer::selection::tournament_select;
use crate::optimizer::stats::GenerationStats;

const TOP_N_SOLUTIONS: usize = 3;

/// Runs the evolutionary search described in the component design: random
/// initialization under the request's running budgets, then generations of
/// tournament selection, two-point row-wise crossover, swap mutation and
/// elitist μ+λ replacement, until `max_generations`, `patience` stale
/// generations, fitness-variance collapse, or cancellation ends the run.
#[derive(Clone, Debug)]
pub struct GeneticOptimizer {
    config: GeneticConfig,
}

impl GeneticOptimizer {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn run<R: Rng>(
        &self,
        request: &LayoutRequest,
        plants: &[Plant],
        compat: &CompatibilityTable,
        rng: &mut R,
        cancellation: &CancellationToken,
    ) -> OptimizationOutcome {
        let started_at = Instant::now();

        if plants.is_empty() {
            return OptimizationOutcome::Empty {
                reason: "catalog has no plants to place".to_string(),
            };
        }
        let plants_by_id: HashMap<u32, Plant> =
            plants.iter().map(|p| (p.id, p.clone())).collect();

        let mut population = Population::new(
            (0..self.config.population_size)
                .map(|_| random_individual(&request.constraints, plants, rng))
                .collect(),
        );

        if population.layouts.iter().all(|l| l.total_plants() == 0) {
            return OptimizationOutcome::Empty {
                reason: "no individual could place a plant within the given constraints"
                    .to_string(),
            };
        }

        evaluate_population(
            &mut population.layouts,
            &plants_by_id,
            compat,
            request.objective,
            &request.constraints,
            self.config.parallel_fitness,
        );

        let mut history = Vec::new();
        let mut best_fitness_seen = population.best().map(|l| l.fitness).unwrap_or(0.0);
        let mut stale_generations = 0usize;
        let mut generations_executed = 0usize;
        let mut convergence_reason = ConvergenceReason::MaxGenerationsReached;

        for generation in 1..=self.config.max_generations {
            if cancellation.is_cancelled() {
                log::info!("optimization cancelled at generation {generation}");
                convergence_reason = ConvergenceReason::Cancelled;
                break;
            }

            let mut offspring = Vec::with_capacity(self.config.population_size);
            while offspring.len() < self.config.population_size {
                let parent_a =
                    tournament_select(&population.layouts, self.config.tournament_size, rng);
                let parent_b =
                    tournament_select(&population.layouts, self.config.tournament_size, rng);
                let (mut child_a, mut child_b) = crossover(
                    parent_a,
                    parent_b,
                    self.config.crossover_probability,
                    rng,
                );
                mutate(&mut child_a, self.config.mutation_probability, rng);
                mutate(&mut child_b, self.config.mutation_probability, rng);
                offspring.push(child_a);
                if offspring.len() < self.config.population_size {
                    offspring.push(child_b);
                }
            }

            evaluate_population(
                &mut offspring,
                &plants_by_id,
                compat,
                request.objective,
                &request.constraints,
                self.config.parallel_fitness,
            );

            population.layouts = replace(
                std::mem::take(&mut population.layouts),
                offspring,
                self.config.elite_size,
            );
            generations_executed = generation;

            let stats = GenerationStats {
                generation,
                best_fitness: population.best().map(|l| l.fitness).unwrap_or(0.0),
                mean_fitness: population.fitness_mean(),
                fitness_variance: population.fitness_variance(),
                stale_generations,
            };
            stats.log();

            if stats.best_fitness > best_fitness_seen + 1e-9 {
                best_fitness_seen = stats.best_fitness;
                stale_generations = 0;
            } else {
                stale_generations += 1;
            }
            history.push(GenerationStats {
                stale_generations,
                ..stats
            });

            if stale_generations >= self.config.patience {
                log::debug!("stopping: {stale_generations} stale generations reached patience");
                convergence_reason = ConvergenceReason::PatienceExceeded;
                break;
            }
            if stats.fitness_variance < self.config.stale_variance_threshold {
                log::debug!("stopping: population fitness variance collapsed");
                convergence_reason = ConvergenceReason::VarianceCollapsed;
                break;
            }
        }

        population.sort_descending();
        let solutions: Vec<LayoutSolution> = population
            .layouts
            .into_iter()
            .take(TOP_N_SOLUTIONS)
            .enumerate()
            .map(|(index, layout)| build_solution(layout, index + 1, &plants_by_id))
            .collect();

        OptimizationOutcome::Solutions {
            solutions,
            objective: request.objective,
            generations_executed,
            convergence_reason,
            execution_time_seconds: started_at.elapsed().as_secs_f64(),
            history,
        }
    }
}

/// Derives the totals, per-species counts and planting calendar a caller
/// needs from one ranked layout, per the output shape in §6.
fn build_solution(layout: GardenLayout, rank: usize, plants_by_id: &HashMap<u32, Plant>) -> LayoutSolution {
    let mut total_water_weekly = 0.0;
    let mut total_cost = 0.0;
    let mut monthly_production = 0.0;
    let mut plant_counts = Vec::new();
    let mut planting_calendar = Vec::new();

    for id in layout.distinct_ids() {
        let Some(plant) = plants_by_id.get(&id) else {
            continue;
        };
        let count = layout.count_of(id);
        total_water_weekly += plant.weekly_water_liters * count as f64;
        total_cost += plant.planting_cost() * count as f64;
        monthly_production += plant.production_per_cycle() * count as f64 * 30.0 / plant.harvest_days as f64;
        plant_counts.push((plant.species.clone(), count));
        planting_calendar.push(PlantingCalendarEntry {
            species: plant.species.clone(),
            planting_week: 0,
            harvest_week: plant.harvest_days / 7,
        });
    }

    let total_area = layout.area();
    LayoutSolution {
        layout,
        rank,
        total_water_weekly,
        total_cost,
        total_area,
        monthly_production,
        plant_counts,
        planting_calendar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PlantType, SunRequirement};
    use crate::layout::{GardenConstraints, GardenObjective};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_plants() -> Vec<Plant> {
        vec![
            Plant::new(
                1,
                "tomato",
                "Solanum lycopersicum",
                vec![PlantType::Vegetable],
                SunRequirement::High,
                8.0,
                80,
                "loam",
                10.0,
                vec![],
                0.2,
            )
            .unwrap(),
            Plant::new(
                2,
                "basil",
                "Ocimum basilicum",
                vec![PlantType::Aromatic],
                SunRequirement::Medium,
                4.0,
                60,
                "loam",
                8.0,
                vec![],
                0.1,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn run_with_empty_catalog_returns_empty_outcome() {
        let optimizer = GeneticOptimizer::new(GeneticConfig::default());
        let request = LayoutRequest::new(
            GardenObjective::Alimenticio,
            GardenConstraints::new(2.0, 150.0, 500.0, 60).unwrap(),
        );
        let compat = CompatibilityTable::build(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = optimizer.run(&request, &[], &compat, &mut rng, &CancellationToken::new());
        assert!(outcome.is_empty());
    }

    #[test]
    fn run_produces_at_most_three_solutions_sorted_by_fitness() {
        let config = GeneticConfig::default();
        let optimizer = GeneticOptimizer::new(config);
        let request = LayoutRequest::new(
            GardenObjective::Alimenticio,
            GardenConstraints::new(2.0, 150.0, 500.0, 120).unwrap(),
        );
        let compat = CompatibilityTable::build(&[]);
        let plants = sample_plants();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = optimizer.run(&request, &plants, &compat, &mut rng, &CancellationToken::new());
        match outcome {
            OptimizationOutcome::Solutions { solutions, .. } => {
                assert!(solutions.len() <= 3);
                for pair in solutions.windows(2) {
                    assert!(pair[0].layout.fitness >= pair[1].layout.fitness);
                }
            }
            OptimizationOutcome::Empty { reason } => panic!("unexpected empty outcome: {reason}"),
        }
    }

    #[test]
    fn determinism_under_identical_seed() {
        let config = GeneticConfig::default();
        let request = LayoutRequest::new(
            GardenObjective::Alimenticio,
            GardenConstraints::new(2.0, 150.0, 500.0, 120).unwrap(),
        );
        let compat = CompatibilityTable::build(&[]);
        let plants = sample_plants();

        let optimizer_a = GeneticOptimizer::new(config);
        let mut rng_a = StdRng::seed_from_u64(123);
        let outcome_a = optimizer_a.run(&request, &plants, &compat, &mut rng_a, &CancellationToken::new());

        let optimizer_b = GeneticOptimizer::new(config);
        let mut rng_b = StdRng::seed_from_u64(123);
        let outcome_b = optimizer_b.run(&request, &plants, &compat, &mut rng_b, &CancellationToken::new());

        match (outcome_a, outcome_b) {
            (
                OptimizationOutcome::Solutions { solutions: a, .. },
                OptimizationOutcome::Solutions { solutions: b, .. },
            ) => {
                assert_eq!(a.len(), b.len());
                for (sa, sb) in a.iter().zip(b.iter()) {
                    assert_eq!(sa.layout.cells(), sb.layout.cells());
                }
            }
            _ => panic!("expected solutions from both runs"),
        }
    }

    #[test]
    fn cancellation_stops_before_max_generations() {
        let mut config = GeneticConfig::default();
        config.max_generations = 1000;
        config.patience = 1000;
        let optimizer = GeneticOptimizer::new(config);
        let request = LayoutRequest::new(
            GardenObjective::Alimenticio,
            GardenConstraints::new(2.0, 150.0, 500.0, 120).unwrap(),
        );
        let compat = CompatibilityTable::build(&[]);
        let plants = sample_plants();
        let mut rng = StdRng::seed_from_u64(5);
        let token = CancellationToken::new();
        token.cancel();
        let outcome = optimizer.run(&request, &plants, &compat, &mut rng, &token);
        if let OptimizationOutcome::Solutions {
            generations_executed,
            convergence_reason,
            ..
        } = outcome
        {
            assert_eq!(generations_executed, 0);
            assert_eq!(convergence_reason, ConvergenceReason::Cancelled);
        }
    }
}
