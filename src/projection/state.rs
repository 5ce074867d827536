//! Running balances carried from one simulated year to the next

use crate::profile::FinancialProfile;

/// Balances of a household at a point in the projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current simulation year (0-indexed)
    pub year: u32,

    /// Attained age in the current year
    pub age: u32,

    /// Bank savings; may go negative once deficits exceed it
    pub bank_balance: f64,

    /// Retirement account (CPF-style) balance
    pub retirement_balance: f64,

    /// Investment portfolio balance
    pub investment_balance: f64,
}

impl ProjectionState {
    /// Initialize state from a profile at projection start
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        Self {
            year: 0,
            age: profile.current_age,
            bank_balance: profile.initial_bank_balance,
            retirement_balance: 0.0,
            investment_balance: 0.0,
        }
    }

    /// Position the state at simulation year `year`
    pub fn enter_year(&mut self, profile: &FinancialProfile, year: u32) {
        self.year = year;
        self.age = profile.age_at(year);
    }

    /// Cover a deficit from the bank balance
    ///
    /// Returns the part of the deficit actually funded by positive savings.
    /// The balance itself absorbs the full deficit and is not floored.
    pub fn withdraw_deficit(&mut self, net_cashflow: f64) -> f64 {
        if net_cashflow >= 0.0 {
            return 0.0;
        }
        let withdrawn = net_cashflow.abs().min(self.bank_balance.max(0.0));
        self.bank_balance += net_cashflow;
        withdrawn
    }

    /// Credit a year of bank interest
    pub fn accrue_bank_interest(&mut self, rate: f64) {
        self.bank_balance *= 1.0 + rate;
    }

    pub fn net_worth(&self) -> f64 {
        self.bank_balance + self.retirement_balance + self.investment_balance
    }
}
