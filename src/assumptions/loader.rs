//! CSV-based assumption loader
//!
//! Loads planning rates from CSV files in data/assumptions/

use crate::error::{PlannerError, Result};
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Load growth rates from `growth_rates.csv`
/// Returns (key, rate) pairs in file order
pub fn load_growth_rates(path: &Path) -> Result<Vec<(String, f64)>> {
    let file_path = path.join("growth_rates.csv");
    let mut reader = csv::Reader::from_path(&file_path)
        .map_err(|e| PlannerError::csv(&file_path, e))?;

    let mut rates = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| PlannerError::csv(&file_path, e))?;
        let key = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record.get(1).map(str::trim).ok_or_else(|| PlannerError::InvalidNumber {
            field: key.clone(),
            value: String::new(),
        })?;
        let value: f64 = raw.parse().map_err(|_| PlannerError::InvalidNumber {
            field: key.clone(),
            value: raw.to_string(),
        })?;
        rates.push((key, value));
    }

    log::info!("Loaded {} growth rates from {}", rates.len(), file_path.display());
    Ok(rates)
}
