//! Coverage Planner - household financial projection and life-insurance planning
//!
//! This library provides:
//! - Yearly projections of income, expenses, bank balance and net worth
//! - Life-event expense modeling (marriage, child birth)
//! - What-if scenario comparison against a baseline
//! - Life-insurance coverage need and product ranking

pub mod assumptions;
pub mod error;
pub mod insurance;
pub mod planner;
pub mod profile;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{GrowthAssumptions, LifeEvent, LifeEventKind};
pub use error::{PlannerError, Result};
pub use insurance::{
    CoverageCalculator, CoverageNeed, InsuranceRecommendation, ProductCatalog, ProductMatcher,
};
pub use planner::FinancialPlanner;
pub use profile::{load_profile, FinancialProfile, RiskTolerance};
pub use projection::{ProjectionEngine, ProjectionResult, YearlyProjection};
pub use scenario::{ComparisonResult, ScenarioCatalog, ScenarioComparator};
