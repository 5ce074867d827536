//! Scenario catalog and baseline comparison

mod catalog;
mod comparator;

pub use catalog::{
    ProfileDelta, ScenarioCatalog, ScenarioDefinition, ScenarioTone, BASELINE_ID,
    DEFAULT_CATALOG_PATH,
};
pub use comparator::{
    ComparisonResult, Scenario, ScenarioComparator, DEFAULT_COMPARISON_YEARS, IMPACT_HORIZONS,
};
