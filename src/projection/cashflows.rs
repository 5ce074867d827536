//! Yearly projection output structures

use crate::assumptions::ActiveLifeEvent;
use crate::profile::FinancialProfile;
use serde::{Deserialize, Serialize};

/// Net worth counted as the first million
pub const MILLION: f64 = 1_000_000.0;

/// Smallest life cover ever suggested by the planning targets
pub const MIN_LIFE_COVER: f64 = 200_000.0;

/// How a year's expenses were funded, split for stacked display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCoverage {
    pub active_income: f64,
    pub passive_income: f64,
    pub savings_used: f64,
    /// Deficit left after positive savings ran out
    pub uncovered: f64,
}

/// A year's expenses split by spending category (40/30/15/15)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategories {
    pub housing: f64,
    pub daily: f64,
    pub medical: f64,
    pub other: f64,
}

impl ExpenseCategories {
    pub fn split(annual_expense: f64) -> Self {
        Self {
            housing: annual_expense * 0.40,
            daily: annual_expense * 0.30,
            medical: annual_expense * 0.15,
            other: annual_expense * 0.15,
        }
    }
}

/// A single row of projection output for one simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    // Timing
    pub year: u32,
    pub age: u32,
    pub is_alive: bool,
    pub is_working: bool,

    // Income
    pub annual_active_income: f64,
    pub annual_passive_income: f64,

    // Expenses
    pub base_annual_expense: f64,
    pub life_event_bump: f64,
    pub active_life_events: Vec<ActiveLifeEvent>,
    pub annual_expense: f64,
    pub expense_categories: ExpenseCategories,

    // Cashflow and bank
    pub annual_savings_contribution: f64,
    pub net_cashflow: f64,
    /// Balance carried in from the prior year
    pub opening_bank_balance: f64,
    /// Balance after this year's withdrawal and interest credit
    pub bank_balance: f64,
    pub savings_withdrawn: f64,
    pub is_shortfall: bool,
    pub bank_rate: f64,

    // Retirement account and investments
    pub retirement_contribution: f64,
    pub retirement_balance: f64,
    pub investment_contribution: f64,
    pub investment_balance: f64,

    // Summary
    pub net_worth: f64,
    pub expense_coverage: ExpenseCoverage,
}

impl YearlyProjection {
    /// Create a new row with zeroed values
    pub fn new(year: u32, age: u32) -> Self {
        Self {
            year,
            age,
            is_alive: true,
            is_working: true,
            annual_active_income: 0.0,
            annual_passive_income: 0.0,
            base_annual_expense: 0.0,
            life_event_bump: 0.0,
            active_life_events: Vec::new(),
            annual_expense: 0.0,
            expense_categories: ExpenseCategories::default(),
            annual_savings_contribution: 0.0,
            net_cashflow: 0.0,
            opening_bank_balance: 0.0,
            bank_balance: 0.0,
            savings_withdrawn: 0.0,
            is_shortfall: false,
            bank_rate: 0.0,
            retirement_contribution: 0.0,
            retirement_balance: 0.0,
            investment_contribution: 0.0,
            investment_balance: 0.0,
            net_worth: 0.0,
            expense_coverage: ExpenseCoverage::default(),
        }
    }

    pub fn total_income(&self) -> f64 {
        self.annual_active_income + self.annual_passive_income
    }
}

/// Planning targets derived from a profile's year-0 figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningTargets {
    /// Six months of expenses
    pub emergency_fund: f64,

    /// 25 years of annual expenses
    pub retirement_target: f64,

    /// Ten years of expenses plus 100k per dependent, at least 200k
    pub life_cover: f64,

    /// Monthly investment as a whole percentage of monthly income
    pub savings_rate_pct: f64,
}

impl PlanningTargets {
    pub fn for_profile(profile: &FinancialProfile) -> Self {
        let monthly_income = profile.monthly_active_income + profile.monthly_passive_income;
        let savings_rate_pct = if monthly_income > 0.0 {
            (profile.monthly_investment / monthly_income * 100.0).round()
        } else {
            0.0
        };
        let life_cover =
            (profile.monthly_expense * 12.0 * 10.0 + profile.dependents as f64 * 100_000.0).round();

        Self {
            emergency_fund: (profile.monthly_expense * 6.0).round(),
            retirement_target: (profile.monthly_expense * 12.0 * 25.0).round(),
            life_cover: life_cover.max(MIN_LIFE_COVER),
            savings_rate_pct,
        }
    }
}

/// Complete projection result for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub retirement_age: u32,

    pub targets: PlanningTargets,

    /// Yearly rows, ordered by year with no gaps
    pub years: Vec<YearlyProjection>,
}

impl ProjectionResult {
    pub fn new(retirement_age: u32) -> Self {
        Self {
            retirement_age,
            targets: PlanningTargets::default(),
            years: Vec::new(),
        }
    }

    pub fn with_targets(mut self, targets: PlanningTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Add a yearly row
    pub fn add_row(&mut self, row: YearlyProjection) {
        self.years.push(row);
    }

    /// Net worth at `year`, falling back to the final year for short series
    pub fn net_worth_at(&self, year: usize) -> f64 {
        self.years
            .get(year)
            .or_else(|| self.years.last())
            .map(|r| r.net_worth)
            .unwrap_or(0.0)
    }

    /// First year whose net worth reaches `threshold`
    pub fn first_year_reaching(&self, threshold: f64) -> Option<u32> {
        self.years.iter().find(|r| r.net_worth >= threshold).map(|r| r.year)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let shortfall_years = self.years.iter().filter(|r| r.is_shortfall).count() as u32;
        let first_shortfall_age = self.years.iter().find(|r| r.is_shortfall).map(|r| r.age);

        ProjectionSummary {
            total_years: self.years.len() as u32,
            retirement_age: self.retirement_age,
            shortfall_years,
            first_shortfall_age,
            final_bank_balance: self.years.last().map(|r| r.bank_balance).unwrap_or(0.0),
            final_net_worth: self.years.last().map(|r| r.net_worth).unwrap_or(0.0),
            first_million_year: self.first_year_reaching(MILLION),
            // Only meaningful once there is an expense to retire on
            retirement_ready_year: if self.targets.retirement_target > 0.0 {
                self.first_year_reaching(self.targets.retirement_target)
            } else {
                None
            },
            targets: self.targets,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub retirement_age: u32,
    pub shortfall_years: u32,
    pub first_shortfall_age: Option<u32>,
    pub final_bank_balance: f64,
    pub final_net_worth: f64,
    pub first_million_year: Option<u32>,
    /// First year net worth covers the retirement target
    pub retirement_ready_year: Option<u32>,
    pub targets: PlanningTargets,
}
