//! Planner facade for repeated projections, comparisons and recommendations
//!
//! Loads assumptions and catalogs once, then serves any number of profiles
//! without re-reading CSV files.

use crate::assumptions::{GrowthAssumptions, LifeEvent};
use crate::error::Result;
use crate::insurance::{
    CoverageCalculator, InsuranceRecommendation, ProductCatalog, ProductMatcher,
    DEFAULT_COVERAGE_YEARS,
};
use crate::profile::{require_profile, FinancialProfile};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::scenario::{
    ComparisonResult, ScenarioCatalog, ScenarioComparator, BASELINE_ID, DEFAULT_COMPARISON_YEARS,
};
use std::path::Path;

/// Pre-loaded planner
///
/// # Example
/// ```ignore
/// let planner = FinancialPlanner::from_csv()?;
/// let profile = load_profile("data/profiles/sample.json")?;
///
/// let projection = planner.project(Some(&profile), &[], None)?;
/// let comparison = planner.compare_scenarios(Some(&profile), &[], None)?;
/// let insurance = planner.recommend_insurance(Some(&profile), Some("job_loss"), None)?;
/// ```
#[derive(Debug, Clone)]
pub struct FinancialPlanner {
    /// Base rates; the investment return is replaced per profile
    assumptions: GrowthAssumptions,
    scenarios: ScenarioCatalog,
    matcher: ProductMatcher,
    coverage: CoverageCalculator,
}

impl FinancialPlanner {
    /// Planner with built-in assumptions and catalogs
    pub fn new() -> Self {
        Self::with_assumptions(GrowthAssumptions::standard())
    }

    /// Load assumptions and catalogs from the default data directories
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_catalogs(
            GrowthAssumptions::from_csv()?,
            ScenarioCatalog::from_csv()?,
            ProductCatalog::from_csv()?,
        ))
    }

    /// Load assumptions from `assumptions_dir` and both catalogs from `catalog_dir`
    pub fn from_csv_path(assumptions_dir: &Path, catalog_dir: &Path) -> Result<Self> {
        Ok(Self::with_catalogs(
            GrowthAssumptions::from_csv_path(assumptions_dir)?,
            ScenarioCatalog::from_csv_path(catalog_dir)?,
            ProductCatalog::from_csv_path(catalog_dir)?,
        ))
    }

    /// Planner with explicit assumptions and built-in catalogs
    pub fn with_assumptions(assumptions: GrowthAssumptions) -> Self {
        Self::with_catalogs(assumptions, ScenarioCatalog::standard(), ProductCatalog::standard())
    }

    pub fn with_catalogs(
        assumptions: GrowthAssumptions,
        scenarios: ScenarioCatalog,
        products: ProductCatalog,
    ) -> Self {
        Self {
            assumptions,
            scenarios,
            matcher: ProductMatcher::new(products),
            coverage: CoverageCalculator::default(),
        }
    }

    /// Replace the coverage calculator (e.g. with different buffer constants)
    pub fn with_coverage(mut self, coverage: CoverageCalculator) -> Self {
        self.coverage = coverage;
        self
    }

    /// Project one profile; without `horizon_years` it runs to life expectancy (50 to 60 years)
    pub fn project(
        &self,
        profile: Option<&FinancialProfile>,
        events: &[LifeEvent],
        horizon_years: Option<u32>,
    ) -> Result<ProjectionResult> {
        let profile = require_profile(profile)?;
        let config = horizon_years
            .map(ProjectionConfig::with_horizon)
            .unwrap_or_else(|| ProjectionConfig::for_profile(profile));

        let engine = ProjectionEngine::new(self.assumptions_for(profile), config);
        Ok(engine.project_profile(profile, events))
    }

    /// Run every catalog scenario against the profile's baseline
    pub fn compare_scenarios(
        &self,
        profile: Option<&FinancialProfile>,
        events: &[LifeEvent],
        horizon_years: Option<u32>,
    ) -> Result<ComparisonResult> {
        let profile = require_profile(profile)?;
        let comparator =
            ScenarioComparator::new(self.assumptions_for(profile), self.scenarios.clone());
        let horizon_years = horizon_years.unwrap_or(DEFAULT_COMPARISON_YEARS);
        Ok(comparator.compare(profile, events, horizon_years))
    }

    /// Coverage need under a scenario (baseline by default) plus ranked products
    pub fn recommend_insurance(
        &self,
        profile: Option<&FinancialProfile>,
        scenario_id: Option<&str>,
        years: Option<u32>,
    ) -> Result<InsuranceRecommendation> {
        let profile = require_profile(profile)?;
        Ok(self.matcher.recommend_for_profile(
            &self.coverage,
            profile,
            scenario_id.unwrap_or(BASELINE_ID),
            years.unwrap_or(DEFAULT_COVERAGE_YEARS),
        ))
    }

    pub fn assumptions(&self) -> &GrowthAssumptions {
        &self.assumptions
    }

    pub fn scenarios(&self) -> &ScenarioCatalog {
        &self.scenarios
    }

    pub fn products(&self) -> &ProductCatalog {
        self.matcher.catalog()
    }

    fn assumptions_for(&self, profile: &FinancialProfile) -> GrowthAssumptions {
        self.assumptions.with_investment_return(profile.risk_tolerance.investment_return())
    }
}

impl Default for FinancialPlanner {
    fn default() -> Self {
        Self::new()
    }
}
