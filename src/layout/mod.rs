//! Garden layout domain types: the chromosome, its constraints and
//! objective, and the fitness evaluation that scores it.
pub mod constraints;
pub mod grid;
pub mod metrics;
pub mod objective;

pub use constraints::GardenConstraints;
pub use grid::GardenLayout;
pub use metrics::evaluate;
pub use objective::{GardenObjective, ObjectiveWeights};
