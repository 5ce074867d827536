//! Load financial profiles from JSON

use super::FinancialProfile;
use crate::error::{PlannerError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a single profile from a JSON file
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<FinancialProfile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PlannerError::io(path, e))?;
    let profile = load_profile_from_reader(BufReader::new(file))?;
    log::info!("Loaded profile from {} (age {})", path.display(), profile.current_age);
    Ok(profile)
}

/// Load a single profile from any JSON reader
pub fn load_profile_from_reader<R: Read>(reader: R) -> Result<FinancialProfile> {
    Ok(serde_json::from_reader(reader)?)
}

/// Turn an absent profile into `MissingProfile`
pub fn require_profile(profile: Option<&FinancialProfile>) -> Result<&FinancialProfile> {
    profile.ok_or(PlannerError::MissingProfile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RiskTolerance;

    #[test]
    fn test_load_from_reader() {
        let json = r#"{
            "current_age": 34,
            "death_age": 40,
            "monthly_active_income": 7000,
            "monthly_passive_income": 900,
            "monthly_expense": 4500,
            "initial_bank_balance": 85000,
            "risk_tolerance": "conservative"
        }"#;

        let profile = load_profile_from_reader(json.as_bytes()).unwrap();
        assert_eq!(profile.current_age, 34);
        assert_eq!(profile.death_age, Some(40));
        assert_eq!(profile.monthly_passive_income, 900.0);
        assert_eq!(profile.monthly_savings_rate, 0.0);
        assert_eq!(profile.risk_tolerance, RiskTolerance::Conservative);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = load_profile_from_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(PlannerError::Json(_))));
    }

    #[test]
    fn test_load_sample_profile() {
        let profile = load_profile("data/profiles/sample.json").unwrap();
        assert_eq!(profile.current_age, 34);
        assert!(profile.monthly_expense > 0.0);
    }

    #[test]
    fn test_missing_profile() {
        assert!(matches!(require_profile(None), Err(PlannerError::MissingProfile)));

        let profile = FinancialProfile::default();
        assert!(require_profile(Some(&profile)).is_ok());
    }
}
