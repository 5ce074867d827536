//! Household financial profile record

use serde::{Deserialize, Serialize};

fn default_retirement_age() -> u32 {
    65
}

fn default_life_expectancy() -> u32 {
    85
}

/// Investment risk appetite; drives the assumed investment return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    /// Annual investment return assumed for this risk appetite
    pub fn investment_return(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.04,
            RiskTolerance::Balanced => 0.05,
            RiskTolerance::Aggressive => 0.07,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Balanced => "balanced",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

/// A household's financial position at simulation year 0
///
/// All monetary amounts are monthly, in year-0 dollars. The profile is
/// read-only to the engine: scenarios derive modified copies rather than
/// mutating the caller's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    /// Age at simulation year 0
    pub current_age: u32,

    /// Active income stops at this age
    pub retirement_age: u32,

    /// Age at death for the protection simulation (None = survives the horizon)
    pub death_age: Option<u32>,

    /// Age the default projection horizon runs to
    pub life_expectancy: u32,

    pub monthly_active_income: f64,
    pub monthly_passive_income: f64,
    pub monthly_expense: f64,

    /// Bank savings at year 0
    pub initial_bank_balance: f64,

    /// Discretionary monthly savings paid in while alive
    pub monthly_savings_rate: f64,

    /// Monthly contribution to the investment portfolio
    pub monthly_investment: f64,

    pub dependents: u32,

    pub monthly_mortgage: f64,

    pub risk_tolerance: RiskTolerance,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            current_age: 0,
            retirement_age: default_retirement_age(),
            death_age: None,
            life_expectancy: default_life_expectancy(),
            monthly_active_income: 0.0,
            monthly_passive_income: 0.0,
            monthly_expense: 0.0,
            initial_bank_balance: 0.0,
            monthly_savings_rate: 0.0,
            monthly_investment: 0.0,
            dependents: 0,
            monthly_mortgage: 0.0,
            risk_tolerance: RiskTolerance::Balanced,
        }
    }
}

impl FinancialProfile {
    /// Attained age at a simulation year
    pub fn age_at(&self, year: u32) -> u32 {
        self.current_age + year
    }

    /// Whether the household earner is alive at `age`
    pub fn is_alive_at(&self, age: u32) -> bool {
        self.death_age.map_or(true, |death_age| age < death_age)
    }

    /// Whether the earner is below retirement age at `age`
    pub fn is_working_at(&self, age: u32) -> bool {
        age < self.retirement_age
    }

    /// Years from current age to life expectancy (0 if already past it)
    pub fn years_to_life_expectancy(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.current_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let profile: FinancialProfile = serde_json::from_str("{}").unwrap();

        assert_eq!(profile.monthly_active_income, 0.0);
        assert_eq!(profile.dependents, 0);
        assert_eq!(profile.risk_tolerance, RiskTolerance::Balanced);
        assert_eq!(profile.death_age, None);
        assert_eq!(profile.retirement_age, 65);
    }

    #[test]
    fn test_risk_tolerance_returns() {
        assert_eq!(RiskTolerance::Conservative.investment_return(), 0.04);
        assert_eq!(RiskTolerance::Balanced.investment_return(), 0.05);
        assert_eq!(RiskTolerance::Aggressive.investment_return(), 0.07);

        let parsed: RiskTolerance = serde_json::from_str("\"aggressive\"").unwrap();
        assert_eq!(parsed, RiskTolerance::Aggressive);
    }

    #[test]
    fn test_alive_and_working() {
        let profile = FinancialProfile {
            current_age: 34,
            retirement_age: 65,
            death_age: Some(40),
            ..Default::default()
        };

        assert!(profile.is_alive_at(39));
        assert!(!profile.is_alive_at(40));
        assert!(profile.is_working_at(64));
        assert!(!profile.is_working_at(65));
        assert_eq!(profile.age_at(6), 40);

        let immortal = FinancialProfile { death_age: None, ..profile };
        assert!(immortal.is_alive_at(120));
    }
}
