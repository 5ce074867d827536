//! Core projection engine for yearly household cashflow projections

use super::cashflows::{
    ExpenseCategories, ExpenseCoverage, PlanningTargets, ProjectionResult, YearlyProjection,
};
use super::state::ProjectionState;
use crate::assumptions::{bump_for, GrowthAssumptions, LifeEvent};
use crate::profile::FinancialProfile;

/// Shortest horizon chosen by `ProjectionConfig::for_profile`
pub const MIN_PROFILE_HORIZON_YEARS: u32 = 50;

/// Longest horizon chosen by `ProjectionConfig::for_profile`
pub const MAX_PROFILE_HORIZON_YEARS: u32 = 60;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Number of years to project, starting at year 0
    pub horizon_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: 51, // years 0..=50
        }
    }
}

impl ProjectionConfig {
    pub fn with_horizon(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    /// Project to life expectancy, kept within 50..=60 years
    pub fn for_profile(profile: &FinancialProfile) -> Self {
        Self {
            horizon_years: profile
                .years_to_life_expectancy()
                .clamp(MIN_PROFILE_HORIZON_YEARS, MAX_PROFILE_HORIZON_YEARS),
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: GrowthAssumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: GrowthAssumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &GrowthAssumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run projection for a single profile
    pub fn project_profile(
        &self,
        profile: &FinancialProfile,
        events: &[LifeEvent],
    ) -> ProjectionResult {
        let targets = PlanningTargets::for_profile(profile);
        let mut result = ProjectionResult::new(profile.retirement_age).with_targets(targets);
        let mut state = ProjectionState::from_profile(profile);

        for year in 0..self.config.horizon_years {
            state.enter_year(profile, year);
            let row = self.calculate_year(profile, events, &mut state);
            result.add_row(row);
        }

        log::debug!(
            "Projected {} years from age {} ({} events, final bank {:.2})",
            result.years.len(),
            profile.current_age,
            events.len(),
            state.bank_balance,
        );

        result
    }

    /// Calculate one simulated year and roll balances forward
    fn calculate_year(
        &self,
        profile: &FinancialProfile,
        events: &[LifeEvent],
        state: &mut ProjectionState,
    ) -> YearlyProjection {
        let a = &self.assumptions;
        let mut row = YearlyProjection::new(state.year, state.age);
        let elapsed = state.year as i32;

        // Expenses: base inflates from year 0, each event from its own trigger year
        row.base_annual_expense =
            12.0 * profile.monthly_expense * (1.0 + a.expense_inflation).powi(elapsed);
        let bump = bump_for(state.age, events, a.expense_inflation);
        row.life_event_bump = bump.total;
        row.active_life_events = bump.active;
        row.annual_expense = row.base_annual_expense + row.life_event_bump;
        row.expense_categories = ExpenseCategories::split(row.annual_expense);

        // Income
        row.is_alive = profile.is_alive_at(state.age);
        row.is_working = profile.is_working_at(state.age);
        row.annual_active_income = if row.is_alive && row.is_working {
            12.0 * profile.monthly_active_income * (1.0 + a.active_income_growth).powi(elapsed)
        } else {
            0.0
        };
        // Passive income keeps flowing to beneficiaries after death
        row.annual_passive_income =
            12.0 * profile.monthly_passive_income * (1.0 + a.passive_income_growth).powi(elapsed);

        row.annual_savings_contribution = if row.is_alive {
            12.0 * profile.monthly_savings_rate
        } else {
            0.0
        };

        row.net_cashflow = row.annual_active_income + row.annual_passive_income
            + row.annual_savings_contribution
            - row.annual_expense;

        // Bank: deficits draw the balance down, surpluses are not deposited
        row.opening_bank_balance = state.bank_balance;
        row.savings_withdrawn = state.withdraw_deficit(row.net_cashflow);
        state.accrue_bank_interest(a.bank_interest_rate);
        row.bank_balance = state.bank_balance;
        row.bank_rate = a.bank_interest_rate;
        row.is_shortfall = state.bank_balance < 0.0;

        // Retirement account on active income
        row.retirement_contribution = row.annual_active_income * a.retirement_contribution_rate;
        state.retirement_balance = state.retirement_balance * (1.0 + a.retirement_account_return)
            + row.retirement_contribution;
        row.retirement_balance = state.retirement_balance;

        // Investment portfolio
        row.investment_contribution = if row.is_alive {
            12.0 * profile.monthly_investment
        } else {
            0.0
        };
        state.investment_balance =
            state.investment_balance * (1.0 + a.investment_return) + row.investment_contribution;
        row.investment_balance = state.investment_balance;

        row.net_worth = state.net_worth();
        row.expense_coverage = expense_coverage(&row);

        row
    }
}

/// Split a year's expenses into the sources that funded them
///
/// In surplus years income is scaled down to the expense level; when there
/// is no income at all the scale is taken as 0 rather than dividing by zero.
pub fn expense_coverage(row: &YearlyProjection) -> ExpenseCoverage {
    let income = row.total_income();

    if income >= row.annual_expense {
        let scale = if income > 0.0 {
            (row.annual_expense / income).min(1.0)
        } else {
            log::debug!("Year {}: no income to scale, using 0", row.year);
            0.0
        };
        ExpenseCoverage {
            active_income: row.annual_active_income * scale,
            passive_income: row.annual_passive_income * scale,
            savings_used: 0.0,
            uncovered: 0.0,
        }
    } else {
        let deficit = row.annual_expense - income;
        ExpenseCoverage {
            active_income: row.annual_active_income,
            passive_income: row.annual_passive_income,
            savings_used: row.savings_withdrawn,
            uncovered: deficit - row.savings_withdrawn,
        }
    }
}

/// Run a projection and return just the yearly series
pub fn run(
    profile: &FinancialProfile,
    assumptions: &GrowthAssumptions,
    events: &[LifeEvent],
    horizon_years: u32,
) -> Vec<YearlyProjection> {
    ProjectionEngine::new(*assumptions, ProjectionConfig::with_horizon(horizon_years))
        .project_profile(profile, events)
        .years
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn surplus_profile() -> FinancialProfile {
        FinancialProfile {
            current_age: 30,
            retirement_age: 65,
            monthly_active_income: 5_000.0,
            monthly_expense: 3_000.0,
            initial_bank_balance: 10_000.0,
            ..Default::default()
        }
    }

    fn closed_form_assumptions() -> GrowthAssumptions {
        GrowthAssumptions {
            expense_inflation: 0.02,
            active_income_growth: 0.03,
            ..GrowthAssumptions::standard()
        }
    }

    #[test]
    fn test_projection_runs() {
        let years = run(&surplus_profile(), &GrowthAssumptions::standard(), &[], 20);

        assert_eq!(years.len(), 20);
        for (i, row) in years.iter().enumerate() {
            assert_eq!(row.year, i as u32);
            assert_eq!(row.age, 30 + i as u32);
        }
    }

    #[test]
    fn test_summary_carries_profile_targets() {
        let profile = FinancialProfile { monthly_investment: 1_000.0, ..surplus_profile() };
        let config = ProjectionConfig::with_horizon(51);
        let result = ProjectionEngine::new(GrowthAssumptions::standard(), config)
            .project_profile(&profile, &[]);
        let summary = result.summary();

        assert_eq!(summary.targets, PlanningTargets::for_profile(&profile));
        let million = summary.first_million_year.unwrap();
        assert!(result.years[million as usize].net_worth >= 1_000_000.0);
        assert!(result.years[..million as usize].iter().all(|r| r.net_worth < 1_000_000.0));
        let year_3 = &result.years[3];
        assert_relative_eq!(year_3.expense_categories.housing, year_3.annual_expense * 0.40);
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        assert!(run(&surplus_profile(), &GrowthAssumptions::standard(), &[], 0).is_empty());
    }

    #[test]
    fn test_surplus_never_deposited() {
        let years = run(&surplus_profile(), &closed_form_assumptions(), &[], 30);

        for row in &years {
            assert!(row.net_cashflow > 0.0);
            assert_eq!(row.savings_withdrawn, 0.0);
            assert_relative_eq!(
                row.opening_bank_balance,
                10_000.0 * 1.06f64.powi(row.year as i32),
                max_relative = 1e-12
            );
            // Closing balance includes the year's interest credit
            assert_relative_eq!(
                row.bank_balance,
                row.opening_bank_balance * 1.06,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_active_income_stops_at_retirement() {
        let years = run(&surplus_profile(), &GrowthAssumptions::standard(), &[], 40);

        let at_64 = years.iter().find(|r| r.age == 64).unwrap();
        let at_65 = years.iter().find(|r| r.age == 65).unwrap();
        assert!(at_64.annual_active_income > 0.0);
        assert_eq!(at_65.annual_active_income, 0.0);
        assert!(years.iter().filter(|r| r.age >= 65).all(|r| r.annual_active_income == 0.0));
    }

    #[test]
    fn test_death_stops_active_income_but_not_passive() {
        let profile = FinancialProfile {
            current_age: 34,
            death_age: Some(40),
            monthly_active_income: 7_000.0,
            monthly_passive_income: 900.0,
            monthly_expense: 4_500.0,
            initial_bank_balance: 85_000.0,
            monthly_savings_rate: 200.0,
            ..Default::default()
        };
        let years = run(&profile, &GrowthAssumptions::standard(), &[], 10);

        let at_39 = &years[5];
        let at_40 = &years[6];
        assert!(at_39.annual_active_income > 0.0);
        assert_eq!(at_39.annual_savings_contribution, 2_400.0);
        assert!(!at_40.is_alive);
        assert_eq!(at_40.annual_active_income, 0.0);
        assert_eq!(at_40.annual_savings_contribution, 0.0);
        assert_relative_eq!(at_40.annual_passive_income, 12.0 * 900.0 * 1.02f64.powi(6));
    }

    #[test]
    fn test_deficit_draws_down_bank() {
        let profile = FinancialProfile {
            current_age: 60,
            retirement_age: 60,
            monthly_expense: 2_000.0,
            initial_bank_balance: 100_000.0,
            ..Default::default()
        };
        let assumptions =
            GrowthAssumptions { expense_inflation: 0.0, ..GrowthAssumptions::standard() };
        let years = run(&profile, &assumptions, &[], 2);

        assert_eq!(years[0].net_cashflow, -24_000.0);
        assert_eq!(years[0].savings_withdrawn, 24_000.0);
        assert_relative_eq!(years[0].bank_balance, 76_000.0 * 1.06);
        assert_relative_eq!(years[1].bank_balance, (76_000.0 * 1.06 - 24_000.0) * 1.06);
        assert!(!years[1].is_shortfall);
    }

    #[test]
    fn test_shortfall_recomputed_and_persists_through_surplus() {
        // Year 0 runs a small deficit, later years run surpluses
        let profile = FinancialProfile {
            current_age: 30,
            monthly_active_income: 4_000.0,
            monthly_expense: 4_100.0,
            initial_bank_balance: 500.0,
            ..Default::default()
        };
        let years = run(&profile, &GrowthAssumptions::standard(), &[], 10);

        assert!(years[0].net_cashflow < 0.0);
        assert_eq!(years[0].savings_withdrawn, 500.0);
        assert!(years[0].is_shortfall);
        assert_relative_eq!(years[0].bank_balance, (500.0 - 1_200.0) * 1.06);

        for row in &years[1..] {
            assert!(row.net_cashflow > 0.0);
            assert_eq!(row.is_shortfall, row.bank_balance < 0.0);
            // Surpluses do not replenish the balance, so the deficit only compounds
            assert!(row.is_shortfall);
        }
        assert!(years[9].bank_balance < years[1].bank_balance);
    }

    #[test]
    fn test_life_event_bump_flows_into_expense() {
        let profile = surplus_profile();
        let events = [LifeEvent::child_birth(36)];
        let years = run(&profile, &GrowthAssumptions::standard(), &events, 10);

        assert_eq!(years[5].life_event_bump, 0.0);
        assert!(years[5].active_life_events.is_empty());
        assert_relative_eq!(years[6].life_event_bump, 2_600.0 * 12.0);
        assert_relative_eq!(years[6].annual_expense, years[6].base_annual_expense + 31_200.0);
        assert_eq!(years[6].active_life_events.len(), 1);
    }

    #[test]
    fn test_net_worth_includes_sleeves() {
        let profile = FinancialProfile {
            monthly_investment: 1_000.0,
            ..surplus_profile()
        };
        let assumptions = GrowthAssumptions::standard();
        let years = run(&profile, &assumptions, &[], 2);

        let first = &years[0];
        assert_relative_eq!(first.retirement_contribution, 60_000.0 * 0.20);
        assert_relative_eq!(first.retirement_balance, 12_000.0);
        assert_relative_eq!(first.investment_balance, 12_000.0);
        assert_relative_eq!(first.net_worth, first.bank_balance + 24_000.0);

        let second = &years[1];
        assert_relative_eq!(second.investment_balance, 12_000.0 * 1.05 + 12_000.0);
        assert_relative_eq!(
            second.net_worth,
            second.bank_balance + second.retirement_balance + second.investment_balance
        );
    }

    #[test]
    fn test_expense_coverage_split() {
        let profile = FinancialProfile {
            current_age: 30,
            monthly_active_income: 1_000.0,
            monthly_passive_income: 1_000.0,
            monthly_expense: 1_000.0,
            ..Default::default()
        };
        let assumptions = GrowthAssumptions {
            expense_inflation: 0.0,
            active_income_growth: 0.0,
            passive_income_growth: 0.0,
            ..GrowthAssumptions::standard()
        };
        let surplus = &run(&profile, &assumptions, &[], 1)[0];
        assert_relative_eq!(surplus.expense_coverage.active_income, 6_000.0);
        assert_relative_eq!(surplus.expense_coverage.passive_income, 6_000.0);
        assert_eq!(surplus.expense_coverage.uncovered, 0.0);

        let deficit_profile = FinancialProfile {
            monthly_expense: 3_000.0,
            initial_bank_balance: 4_000.0,
            ..profile
        };
        let deficit = &run(&deficit_profile, &assumptions, &[], 1)[0];
        assert_eq!(deficit.expense_coverage.savings_used, 4_000.0);
        assert_abs_diff_eq!(deficit.expense_coverage.uncovered, 8_000.0);
    }

    #[test]
    fn test_no_income_no_expense_is_finite() {
        let profile = FinancialProfile { current_age: 30, ..Default::default() };
        let years = run(&profile, &GrowthAssumptions::standard(), &[], 3);

        for row in &years {
            assert_eq!(row.expense_coverage, ExpenseCoverage::default());
            assert!(row.net_worth.is_finite());
        }
    }

    #[test]
    fn test_profile_horizon_clamped() {
        let young = FinancialProfile { current_age: 20, life_expectancy: 90, ..Default::default() };
        let old = FinancialProfile { current_age: 60, life_expectancy: 85, ..Default::default() };
        let mid = FinancialProfile { current_age: 30, life_expectancy: 85, ..Default::default() };

        assert_eq!(ProjectionConfig::for_profile(&young).horizon_years, 60);
        assert_eq!(ProjectionConfig::for_profile(&old).horizon_years, 50);
        assert_eq!(ProjectionConfig::for_profile(&mid).horizon_years, 55);
    }

    #[test]
    fn test_deterministic() {
        let profile = surplus_profile();
        let events = [LifeEvent::marriage(32), LifeEvent::child_birth(36)];
        let a = run(&profile, &GrowthAssumptions::standard(), &events, 55);
        let b = run(&profile, &GrowthAssumptions::standard(), &events, 55);
        assert_eq!(a, b);
    }
}
