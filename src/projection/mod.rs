//! Projection engine for yearly household wealth projections

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{
    expense_coverage, run, ProjectionConfig, ProjectionEngine, MAX_PROFILE_HORIZON_YEARS,
    MIN_PROFILE_HORIZON_YEARS,
};
pub use cashflows::{
    ExpenseCategories, ExpenseCoverage, PlanningTargets, ProjectionResult, ProjectionSummary,
    YearlyProjection, MILLION, MIN_LIFE_COVER,
};
