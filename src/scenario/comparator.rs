//! Multi-scenario comparison against a baseline projection

use super::catalog::{ProfileDelta, ScenarioCatalog, ScenarioDefinition, ScenarioTone};
use crate::assumptions::{GrowthAssumptions, LifeEvent};
use crate::profile::FinancialProfile;
use crate::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary, YearlyProjection,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Years at which scenario impacts are measured
pub const IMPACT_HORIZONS: [usize; 3] = [10, 20, 50];

/// Horizon covering every impact year (years 0..=50)
pub const DEFAULT_COMPARISON_YEARS: u32 = 51;

/// A scenario definition evaluated for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub tone: ScenarioTone,
    pub description: String,
    pub delta: ProfileDelta,
    pub projections: Vec<YearlyProjection>,
    pub summary: ProjectionSummary,

    /// Scenario net worth minus baseline net worth at year 10
    pub impact_10yr: f64,
    pub impact_20yr: f64,
    pub impact_50yr: f64,
}

/// Baseline series plus every catalog scenario, in catalog order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline: Vec<YearlyProjection>,
    pub scenarios: Vec<Scenario>,
}

impl ComparisonResult {
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

/// Runs a scenario catalog against a baseline profile
#[derive(Debug, Clone)]
pub struct ScenarioComparator {
    /// Baseline assumptions; scenarios may override the investment return
    assumptions: GrowthAssumptions,
    catalog: ScenarioCatalog,
}

impl ScenarioComparator {
    pub fn new(assumptions: GrowthAssumptions, catalog: ScenarioCatalog) -> Self {
        Self { assumptions, catalog }
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Project the baseline and every scenario over `horizon_years`
    pub fn compare(
        &self,
        profile: &FinancialProfile,
        events: &[LifeEvent],
        horizon_years: u32,
    ) -> ComparisonResult {
        let config = ProjectionConfig::with_horizon(horizon_years);
        let baseline =
            ProjectionEngine::new(self.assumptions, config).project_profile(profile, events);

        // collect() on an indexed parallel iterator keeps catalog order
        let scenarios: Vec<Scenario> = self
            .catalog
            .definitions()
            .par_iter()
            .map(|definition| self.evaluate(definition, profile, events, config, &baseline))
            .collect();

        ComparisonResult {
            baseline: baseline.years,
            scenarios,
        }
    }

    fn evaluate(
        &self,
        definition: &ScenarioDefinition,
        profile: &FinancialProfile,
        events: &[LifeEvent],
        config: ProjectionConfig,
        baseline: &ProjectionResult,
    ) -> Scenario {
        let (result, impacts) = if definition.is_baseline() {
            (baseline.clone(), [0.0; 3])
        } else {
            let adjusted = definition.delta.apply(profile);
            let assumptions = definition.delta.assumptions(self.assumptions);
            let result =
                ProjectionEngine::new(assumptions, config).project_profile(&adjusted, events);
            let impacts = IMPACT_HORIZONS
                .map(|year| result.net_worth_at(year) - baseline.net_worth_at(year));
            (result, impacts)
        };

        log::debug!(
            "Scenario {}: impacts 10y {:.0}, 20y {:.0}, 50y {:.0}",
            definition.id,
            impacts[0],
            impacts[1],
            impacts[2],
        );

        Scenario {
            id: definition.id.clone(),
            name: definition.name.clone(),
            tone: definition.tone,
            description: definition.description.clone(),
            delta: definition.delta,
            summary: result.summary(),
            projections: result.years,
            impact_10yr: impacts[0],
            impact_20yr: impacts[1],
            impact_50yr: impacts[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::BASELINE_ID;
    use approx::assert_relative_eq;

    fn test_profile() -> FinancialProfile {
        FinancialProfile {
            current_age: 30,
            monthly_active_income: 5_000.0,
            monthly_passive_income: 200.0,
            monthly_expense: 3_000.0,
            initial_bank_balance: 10_000.0,
            monthly_investment: 1_000.0,
            ..Default::default()
        }
    }

    fn comparator() -> ScenarioComparator {
        ScenarioComparator::new(GrowthAssumptions::standard(), ScenarioCatalog::standard())
    }

    #[test]
    fn test_baseline_impacts_are_zero() {
        let result = comparator().compare(&test_profile(), &[], DEFAULT_COMPARISON_YEARS);
        let baseline = result.scenario(BASELINE_ID).unwrap();

        assert_eq!(baseline.impact_10yr, 0.0);
        assert_eq!(baseline.impact_20yr, 0.0);
        assert_eq!(baseline.impact_50yr, 0.0);
        assert_eq!(baseline.projections, result.baseline);
    }

    #[test]
    fn test_catalog_order_preserved() {
        let result = comparator().compare(&test_profile(), &[], DEFAULT_COMPARISON_YEARS);
        let ids: Vec<&str> = result.scenarios.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(
            ids,
            [
                "baseline",
                "career_growth",
                "job_loss",
                "medical",
                "new_dependent",
                "aggressive_savings",
                "recession"
            ]
        );
        assert!(result.scenarios.iter().all(|s| s.projections.len() == 51));
    }

    #[test]
    fn test_impacts_are_net_worth_deltas() {
        let result = comparator().compare(&test_profile(), &[], DEFAULT_COMPARISON_YEARS);
        let career = result.scenario("career_growth").unwrap();

        let impacts =
            [(10, career.impact_10yr), (20, career.impact_20yr), (50, career.impact_50yr)];
        for (year, impact) in impacts {
            let delta = career.projections[year].net_worth - result.baseline[year].net_worth;
            assert_relative_eq!(impact, delta);
        }
        assert!(career.impact_20yr > 0.0);

        let job_loss = result.scenario("job_loss").unwrap();
        assert!(job_loss.impact_10yr < 0.0);
        assert!(job_loss.summary.shortfall_years > 0);
    }

    #[test]
    fn test_unchanged_year_zero_inputs_share_year_zero() {
        // Only the investment return changes for this scenario
        let catalog = ScenarioCatalog::new(vec![ScenarioDefinition::new(
            "higher_return",
            "Higher Return",
            ScenarioTone::Positive,
            "",
            ProfileDelta { return_rate_override: Some(0.09), ..ProfileDelta::identity() },
        )]);
        let comparator = ScenarioComparator::new(GrowthAssumptions::standard(), catalog);
        let result = comparator.compare(&test_profile(), &[], 20);

        let scenario = result.scenario("higher_return").unwrap();
        assert_eq!(scenario.projections[0], result.baseline[0]);
    }

    #[test]
    fn test_baseline_reports_applied_delta() {
        let mut baseline = ScenarioDefinition::baseline();
        baseline.delta.expense_multiplier = 2.0;
        let catalog = ScenarioCatalog::new(vec![baseline]);
        let comparator = ScenarioComparator::new(GrowthAssumptions::standard(), catalog);
        let result = comparator.compare(&test_profile(), &[], 5);

        let scenario = result.scenario(BASELINE_ID).unwrap();
        assert_eq!(scenario.delta, ProfileDelta::identity());
        assert_eq!(scenario.projections[0].base_annual_expense, 36_000.0);
    }

    #[test]
    fn test_short_horizon_uses_final_year() {
        let result = comparator().compare(&test_profile(), &[], 5);
        let career = result.scenario("career_growth").unwrap();

        let expected = career.projections[4].net_worth - result.baseline[4].net_worth;
        assert_relative_eq!(career.impact_10yr, expected);
        assert_relative_eq!(career.impact_50yr, expected);
    }

    #[test]
    fn test_comparison_is_deterministic() {
        let events = [LifeEvent::marriage(32)];
        let a = comparator().compare(&test_profile(), &events, DEFAULT_COMPARISON_YEARS);
        let b = comparator().compare(&test_profile(), &events, DEFAULT_COMPARISON_YEARS);
        assert_eq!(a, b);
    }
}
