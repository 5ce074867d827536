//! Household financial profile and profile loading

mod data;
pub mod loader;

pub use data::{FinancialProfile, RiskTolerance};
pub use loader::{load_profile, load_profile_from_reader, require_profile};
