//! Life-insurance coverage need and product recommendation

mod coverage;
mod matcher;
mod product;

pub use coverage::{
    CoverageAssumptions, CoverageCalculator, CoverageNeed, CoverageScenario, DEFAULT_COVERAGE_YEARS,
};
pub use matcher::{
    age_factor, InsuranceRecommendation, ProductMatcher, RankedProduct, RecommendationSummary,
    AGE_LOADING_PER_YEAR, BASE_PREMIUM_AGE,
};
pub use product::{InsuranceProduct, ProductCatalog, ProductType};
