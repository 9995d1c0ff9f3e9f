//! The multi-objective genetic garden-layout optimizer: population
//! initialization, selection, crossover, mutation, elitist replacement and
//! the run loop that ties them together.
pub mod cancellation;
pub mod config;
pub mod crossover;
pub mod fitness;
pub mod init;
pub mod mutate;
pub mod population;
pub mod replacement;
pub mod request;
pub mod response;
pub mod selection;
pub mod stats;
pub mod strategy;

pub use cancellation::CancellationToken;
pub use config::{GeneticConfig, GeneticConfigBuilder, TryFromGeneticConfigBuilderError};
pub use population::Population;
pub use request::LayoutRequest;
pub use response::{ConvergenceReason, LayoutSolution, OptimizationOutcome, PlantingCalendarEntry};
pub use stats::GenerationStats;
pub use strategy::GeneticOptimizer;
