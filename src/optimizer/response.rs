use crate::layout::{GardenLayout, GardenObjective};
use crate::optimizer::stats::GenerationStats;

/// One species' planting calendar entry, per §6: planting always happens in
/// week 0, harvest lands at `harvestDays / 7` weeks in.
#[derive(Clone, Debug)]
pub struct PlantingCalendarEntry {
    pub species: String,
    pub planting_week: u32,
    pub harvest_week: u32,
}

/// One of the top-ranked layouts returned from a completed run, enriched
/// with the totals and calendar a caller needs without re-deriving them from
/// the raw grid.
#[derive(Clone, Debug)]
pub struct LayoutSolution {
    pub layout: GardenLayout,
    pub rank: usize,
    pub total_water_weekly: f64,
    pub total_cost: f64,
    pub total_area: f64,
    pub monthly_production: f64,
    pub plant_counts: Vec<(String, usize)>,
    pub planting_calendar: Vec<PlantingCalendarEntry>,
}

/// Why the run stopped, echoed back to the caller for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvergenceReason {
    MaxGenerationsReached,
    PatienceExceeded,
    VarianceCollapsed,
    Cancelled,
}

impl ConvergenceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvergenceReason::MaxGenerationsReached => "max_generations_reached",
            ConvergenceReason::PatienceExceeded => "patience_exceeded",
            ConvergenceReason::VarianceCollapsed => "variance_collapsed",
            ConvergenceReason::Cancelled => "cancelled",
        }
    }
}

/// The final result of a run. An empty population is a normal outcome (the
/// catalog or constraints were too tight to place anything), never an
/// unhandled error — see the error handling design.
#[derive(Clone, Debug)]
pub enum OptimizationOutcome {
    Solutions {
        solutions: Vec<LayoutSolution>,
        objective: GardenObjective,
        generations_executed: usize,
        convergence_reason: ConvergenceReason,
        execution_time_seconds: f64,
        history: Vec<GenerationStats>,
    },
    Empty {
        reason: String,
    },
}

impl OptimizationOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, OptimizationOutcome::Empty { .. })
    }
}
