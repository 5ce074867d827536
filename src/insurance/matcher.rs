//! Filter and rank insurance products for a coverage amount

use super::coverage::{CoverageCalculator, CoverageNeed};
use super::product::{InsuranceProduct, ProductCatalog};
use crate::profile::FinancialProfile;
use serde::{Deserialize, Serialize};

/// Age up to which premiums carry no age loading
pub const BASE_PREMIUM_AGE: u32 = 30;

/// Premium loading per year of age above the base age
pub const AGE_LOADING_PER_YEAR: f64 = 0.03;

/// A product eligible for the requested cover, with its priced premium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product: InsuranceProduct,
    pub recommended_coverage: f64,
    pub monthly_premium: f64,
    pub annual_premium: f64,
    pub cost_per_100k: f64,
    /// Cover bought per dollar of monthly premium, scaled by 100,000
    pub value_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub recommended_coverage: f64,
    pub years_of_coverage: u32,
    pub scenario: String,
    pub cheapest_premium: f64,
    pub most_expensive_premium: f64,
}

/// Coverage need plus the products ranked against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRecommendation {
    pub coverage: CoverageNeed,
    pub products: Vec<RankedProduct>,
    pub summary: RecommendationSummary,
}

/// Premium multiplier for an applicant's age
pub fn age_factor(age: u32) -> f64 {
    if age > BASE_PREMIUM_AGE {
        1.0 + (age - BASE_PREMIUM_AGE) as f64 * AGE_LOADING_PER_YEAR
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductMatcher {
    catalog: ProductCatalog,
}

impl ProductMatcher {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Eligible products for `coverage` at `age`, cheapest first
    ///
    /// An empty list means nothing in the catalog accepts both the age and
    /// the amount.
    pub fn recommend(&self, coverage: f64, age: u32) -> Vec<RankedProduct> {
        let mut ranked: Vec<RankedProduct> = self
            .catalog
            .products()
            .iter()
            .filter(|p| p.accepts_age(age) && p.accepts_coverage(coverage))
            .map(|p| price(p, coverage, age))
            .collect();

        // Stable: equal premiums keep catalog order
        ranked.sort_by(|a, b| a.monthly_premium.total_cmp(&b.monthly_premium));

        log::debug!(
            "{} of {} products eligible for {:.0} at age {}",
            ranked.len(),
            self.catalog.len(),
            coverage,
            age,
        );

        ranked
    }

    /// Coverage need for a profile and the products that fit it
    pub fn recommend_for_profile(
        &self,
        calculator: &CoverageCalculator,
        profile: &FinancialProfile,
        scenario_id: &str,
        years: u32,
    ) -> InsuranceRecommendation {
        let coverage = calculator.compute(profile, scenario_id, years);
        let products = self.recommend(coverage.total_coverage, profile.current_age);

        let summary = RecommendationSummary {
            recommended_coverage: coverage.total_coverage,
            years_of_coverage: coverage.years,
            scenario: coverage.scenario.id().to_string(),
            cheapest_premium: products.first().map_or(0.0, |p| p.monthly_premium),
            most_expensive_premium: products.last().map_or(0.0, |p| p.monthly_premium),
        };

        InsuranceRecommendation {
            coverage,
            products,
            summary,
        }
    }
}

fn price(product: &InsuranceProduct, coverage: f64, age: u32) -> RankedProduct {
    let units = coverage / 100_000.0;
    let monthly_premium = (units * product.premium_per_100k * age_factor(age)).round();

    let cost_per_100k = if units > 0.0 {
        (monthly_premium / units).round()
    } else {
        0.0
    };
    let value_score = if monthly_premium > 0.0 {
        (coverage / monthly_premium * 100_000.0).round()
    } else {
        0.0
    };

    RankedProduct {
        product: product.clone(),
        recommended_coverage: coverage,
        monthly_premium,
        annual_premium: monthly_premium * 12.0,
        cost_per_100k,
        value_score,
    }
}
