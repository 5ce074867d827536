//! Growth, inflation and return assumptions plus the life-event expense model

mod life_events;
pub mod loader;

pub use life_events::{bump_for, ActiveLifeEvent, LifeEvent, LifeEventBump, LifeEventKind};

use crate::error::Result;
use crate::profile::RiskTolerance;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Annual rates held constant for a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssumptions {
    /// Applied to base expenses and to life-event bumps
    pub expense_inflation: f64,

    pub active_income_growth: f64,

    pub passive_income_growth: f64,

    /// Fixed rate credited to the bank balance every year
    pub bank_interest_rate: f64,

    /// Return on the investment portfolio sleeve
    pub investment_return: f64,

    /// Share of active income paid into the retirement account
    pub retirement_contribution_rate: f64,

    /// Guaranteed return on the retirement account
    pub retirement_account_return: f64,
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self::standard()
    }
}

impl GrowthAssumptions {
    /// Standard planning assumptions for a balanced risk profile
    pub fn standard() -> Self {
        Self {
            expense_inflation: 0.017,
            active_income_growth: 0.05,
            passive_income_growth: 0.02,
            bank_interest_rate: 0.06,
            investment_return: RiskTolerance::Balanced.investment_return(),
            retirement_contribution_rate: 0.20,
            retirement_account_return: 0.025,
        }
    }

    /// Standard assumptions with the investment return for `risk`
    pub fn for_risk(risk: RiskTolerance) -> Self {
        Self::standard().with_investment_return(risk.investment_return())
    }

    /// Copy with a different investment return
    pub fn with_investment_return(self, investment_return: f64) -> Self {
        Self { investment_return, ..self }
    }

    /// Load assumptions from `growth_rates.csv` in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from `growth_rates.csv` in a specific directory
    ///
    /// Keys missing from the file keep their standard value.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let rates = loader::load_growth_rates(path)?;
        let mut assumptions = Self::standard();
        for (key, value) in rates {
            assumptions.set(&key, value)?;
        }
        Ok(assumptions)
    }

    fn set(&mut self, key: &str, value: f64) -> Result<()> {
        let slot = match key {
            "expense_inflation" => &mut self.expense_inflation,
            "active_income_growth" => &mut self.active_income_growth,
            "passive_income_growth" => &mut self.passive_income_growth,
            "bank_interest_rate" => &mut self.bank_interest_rate,
            "investment_return" => &mut self.investment_return,
            "retirement_contribution_rate" => &mut self.retirement_contribution_rate,
            "retirement_account_return" => &mut self.retirement_account_return,
            other => {
                return Err(crate::PlannerError::UnknownValue {
                    field: "growth assumption",
                    value: other.to_string(),
                })
            }
        };
        *slot = value;
        Ok(())
    }
}
