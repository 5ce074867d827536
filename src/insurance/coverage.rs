//! Life-insurance coverage need from a household profile

use crate::profile::FinancialProfile;
use serde::{Deserialize, Serialize};

/// Coverage horizon used when the caller gives none
pub const DEFAULT_COVERAGE_YEARS: u32 = 20;

/// Scenarios that add a protection buffer on top of the base need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageScenario {
    #[default]
    Baseline,
    JobLoss,
    Medical,
    NewDependent,
    Recession,
}

impl CoverageScenario {
    /// Parse a scenario id; ids without a coverage buffer map to Baseline
    pub fn from_id(id: &str) -> Self {
        match id {
            "baseline" | "" => CoverageScenario::Baseline,
            "job_loss" => CoverageScenario::JobLoss,
            "medical" => CoverageScenario::Medical,
            "new_dependent" => CoverageScenario::NewDependent,
            "recession" => CoverageScenario::Recession,
            other => {
                log::warn!("No coverage buffer for scenario `{}`, using baseline", other);
                CoverageScenario::Baseline
            }
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            CoverageScenario::Baseline => "baseline",
            CoverageScenario::JobLoss => "job_loss",
            CoverageScenario::Medical => "medical",
            CoverageScenario::NewDependent => "new_dependent",
            CoverageScenario::Recession => "recession",
        }
    }
}

/// Constants of the coverage formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageAssumptions {
    /// Years of income replaced at most
    pub income_replacement_cap_years: u32,

    /// Education fund per dependent
    pub education_per_dependent: f64,

    /// Assumed remaining mortgage term
    pub mortgage_years: u32,

    /// Years of expenses held as emergency buffer
    pub emergency_years: u32,

    /// Flat buffer for a medical emergency
    pub medical_buffer: f64,

    /// Years of expenses for job loss, new dependent and recession buffers
    pub job_loss_years: u32,
    pub new_dependent_years: u32,
    pub recession_years: u32,

    /// Total is rounded to a multiple of this
    pub rounding_step: f64,

    /// Smallest coverage ever recommended
    pub minimum_coverage: f64,
}

impl Default for CoverageAssumptions {
    fn default() -> Self {
        Self {
            income_replacement_cap_years: 25,
            education_per_dependent: 150_000.0,
            mortgage_years: 15,
            emergency_years: 2,
            medical_buffer: 200_000.0,
            job_loss_years: 3,
            new_dependent_years: 5,
            recession_years: 2,
            rounding_step: 50_000.0,
            minimum_coverage: 200_000.0,
        }
    }
}

/// Breakdown of a recommended coverage amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageNeed {
    pub income_replacement: f64,
    pub education_fund: f64,
    pub outstanding_mortgage: f64,
    pub emergency_buffer: f64,
    pub scenario_buffer: f64,
    /// Savings already held, offset against the need
    pub current_savings: f64,
    /// Rounded and floored coverage amount
    pub total_coverage: f64,
    pub years: u32,
    pub scenario: CoverageScenario,
}

impl CoverageNeed {
    /// Components summed before rounding and flooring
    pub fn raw_total(&self) -> f64 {
        self.income_replacement
            + self.education_fund
            + self.outstanding_mortgage
            + self.emergency_buffer
            + self.scenario_buffer
            - self.current_savings
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoverageCalculator {
    assumptions: CoverageAssumptions,
}

impl CoverageCalculator {
    pub fn new(assumptions: CoverageAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &CoverageAssumptions {
        &self.assumptions
    }

    /// Coverage need for a profile under a scenario id over `years`
    pub fn compute(
        &self,
        profile: &FinancialProfile,
        scenario_id: &str,
        years: u32,
    ) -> CoverageNeed {
        self.compute_for(profile, CoverageScenario::from_id(scenario_id), years)
    }

    pub fn compute_for(
        &self,
        profile: &FinancialProfile,
        scenario: CoverageScenario,
        years: u32,
    ) -> CoverageNeed {
        let a = &self.assumptions;
        let annual_expense = profile.monthly_expense * 12.0;
        let dependents = profile.dependents as f64;

        let income_replacement =
            profile.monthly_active_income * 12.0 * years.min(a.income_replacement_cap_years) as f64;
        let education_fund = dependents * a.education_per_dependent;
        let outstanding_mortgage = profile.monthly_mortgage * 12.0 * a.mortgage_years as f64;
        let emergency_buffer = annual_expense * a.emergency_years as f64;

        let scenario_buffer = match scenario {
            CoverageScenario::Baseline => 0.0,
            CoverageScenario::JobLoss => annual_expense * a.job_loss_years as f64,
            CoverageScenario::Medical => a.medical_buffer,
            CoverageScenario::NewDependent => {
                // One more child's education fund; nothing to divide with no dependents
                let per_dependent = if profile.dependents > 0 {
                    education_fund / dependents
                } else {
                    log::warn!("New dependent buffer with no dependents, education share is 0");
                    0.0
                };
                per_dependent + annual_expense * a.new_dependent_years as f64
            }
            CoverageScenario::Recession => annual_expense * a.recession_years as f64,
        };

        let mut need = CoverageNeed {
            income_replacement,
            education_fund,
            outstanding_mortgage,
            emergency_buffer,
            scenario_buffer,
            current_savings: profile.initial_bank_balance,
            total_coverage: 0.0,
            years,
            scenario,
        };
        need.total_coverage = self.round_and_floor(need.raw_total());

        log::debug!(
            "Coverage for {} over {} years: raw {:.0}, total {:.0}",
            scenario.id(),
            years,
            need.raw_total(),
            need.total_coverage,
        );

        need
    }

    /// Round to the nearest step, then apply the minimum
    fn round_and_floor(&self, raw: f64) -> f64 {
        let step = self.assumptions.rounding_step;
        let rounded = (raw / step).round() * step;
        rounded.max(self.assumptions.minimum_coverage)
    }
}
