//! Named what-if scenarios and the profile adjustments they apply

use crate::assumptions::GrowthAssumptions;
use crate::error::{PlannerError, Result};
use crate::profile::FinancialProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Id of the unmodified scenario every catalog carries
pub const BASELINE_ID: &str = "baseline";

/// Default path to the catalog directory
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog";

/// How a scenario reads to the household, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTone {
    Neutral,
    Positive,
    Moderate,
    Negative,
    Critical,
}

impl ScenarioTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioTone::Neutral => "neutral",
            ScenarioTone::Positive => "positive",
            ScenarioTone::Moderate => "moderate",
            ScenarioTone::Negative => "negative",
            ScenarioTone::Critical => "critical",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "neutral" => Ok(ScenarioTone::Neutral),
            "positive" => Ok(ScenarioTone::Positive),
            "moderate" => Ok(ScenarioTone::Moderate),
            "negative" => Ok(ScenarioTone::Negative),
            "critical" => Ok(ScenarioTone::Critical),
            other => Err(PlannerError::UnknownValue {
                field: "scenario tone",
                value: other.to_string(),
            }),
        }
    }
}

/// Adjustments a scenario makes to the baseline profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileDelta {
    /// Scales monthly active income
    pub income_multiplier: f64,

    /// Scales monthly living expense
    pub expense_multiplier: f64,

    /// Scales monthly investment contribution
    pub investment_multiplier: f64,

    /// Scales the initial bank balance before the offset
    pub savings_multiplier: f64,

    /// Added to the initial bank balance (negative for a one-off cost)
    pub savings_offset: f64,

    pub dependents_delta: u32,

    /// Replaces the investment return for this scenario
    pub return_rate_override: Option<f64>,
}

impl Default for ProfileDelta {
    fn default() -> Self {
        Self::identity()
    }
}

impl ProfileDelta {
    /// Delta that leaves a profile unchanged
    pub fn identity() -> Self {
        Self {
            income_multiplier: 1.0,
            expense_multiplier: 1.0,
            investment_multiplier: 1.0,
            savings_multiplier: 1.0,
            savings_offset: 0.0,
            dependents_delta: 0,
            return_rate_override: None,
        }
    }

    /// Derive the scenario's profile from the baseline
    pub fn apply(&self, profile: &FinancialProfile) -> FinancialProfile {
        FinancialProfile {
            monthly_active_income: profile.monthly_active_income * self.income_multiplier,
            monthly_expense: profile.monthly_expense * self.expense_multiplier,
            monthly_investment: profile.monthly_investment * self.investment_multiplier,
            initial_bank_balance: profile.initial_bank_balance * self.savings_multiplier
                + self.savings_offset,
            dependents: profile.dependents + self.dependents_delta,
            ..profile.clone()
        }
    }

    /// Derive the scenario's assumptions from the baseline assumptions
    pub fn assumptions(&self, base: GrowthAssumptions) -> GrowthAssumptions {
        match self.return_rate_override {
            Some(rate) => base.with_investment_return(rate),
            None => base,
        }
    }
}

/// One entry of the scenario catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub id: String,
    pub name: String,
    pub tone: ScenarioTone,
    pub description: String,
    pub delta: ProfileDelta,
}

impl ScenarioDefinition {
    pub fn new(
        id: &str,
        name: &str,
        tone: ScenarioTone,
        description: &str,
        delta: ProfileDelta,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tone,
            description: description.to_string(),
            delta,
        }
    }

    pub fn baseline() -> Self {
        Self::new(
            BASELINE_ID,
            "Current Plan",
            ScenarioTone::Neutral,
            "Your current financial trajectory",
            ProfileDelta::identity(),
        )
    }

    pub fn is_baseline(&self) -> bool {
        self.id == BASELINE_ID
    }
}

/// Ordered, immutable list of scenario definitions
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    definitions: Vec<ScenarioDefinition>,
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScenarioCatalog {
    /// Build a catalog, prepending a baseline entry when none is present
    ///
    /// A baseline entry always carries the identity delta; any other delta
    /// on it is discarded.
    pub fn new(mut definitions: Vec<ScenarioDefinition>) -> Self {
        for definition in definitions.iter_mut().filter(|d| d.is_baseline()) {
            if definition.delta != ProfileDelta::identity() {
                log::warn!("Ignoring adjustments on baseline scenario `{}`", definition.id);
                definition.delta = ProfileDelta::identity();
            }
        }
        if !definitions.iter().any(|d| d.is_baseline()) {
            definitions.insert(0, ScenarioDefinition::baseline());
        }
        Self { definitions }
    }

    /// Standard planning scenarios
    pub fn standard() -> Self {
        let id = ProfileDelta::identity();
        Self::new(vec![
            ScenarioDefinition::baseline(),
            ScenarioDefinition::new(
                "career_growth",
                "Career Growth",
                ScenarioTone::Positive,
                "Promotion with 30% salary increase",
                ProfileDelta {
                    income_multiplier: 1.30,
                    expense_multiplier: 1.15,
                    investment_multiplier: 1.60,
                    ..id
                },
            ),
            ScenarioDefinition::new(
                "job_loss",
                "Job Loss",
                ScenarioTone::Critical,
                "Complete unemployment - living off savings",
                ProfileDelta {
                    income_multiplier: 0.0,
                    investment_multiplier: 0.0,
                    ..id
                },
            ),
            ScenarioDefinition::new(
                "medical",
                "Medical Emergency",
                ScenarioTone::Critical,
                "Immediate medical bill and higher ongoing costs",
                ProfileDelta {
                    expense_multiplier: 1.40,
                    investment_multiplier: 0.0,
                    savings_offset: -70_000.0,
                    ..id
                },
            ),
            ScenarioDefinition::new(
                "new_dependent",
                "New Baby",
                ScenarioTone::Moderate,
                "New child - higher expenses and reduced investing",
                ProfileDelta {
                    expense_multiplier: 1.35,
                    investment_multiplier: 0.60,
                    savings_offset: -15_000.0,
                    dependents_delta: 1,
                    ..id
                },
            ),
            ScenarioDefinition::new(
                "aggressive_savings",
                "FIRE Plan",
                ScenarioTone::Positive,
                "Cut expenses and maximize investments",
                ProfileDelta {
                    expense_multiplier: 0.70,
                    investment_multiplier: 2.50,
                    return_rate_override: Some(0.07),
                    ..id
                },
            ),
            ScenarioDefinition::new(
                "recession",
                "Recession",
                ScenarioTone::Negative,
                "Pay cut and portfolio loss",
                ProfileDelta {
                    income_multiplier: 0.85,
                    expense_multiplier: 1.10,
                    investment_multiplier: 0.50,
                    savings_multiplier: 0.80,
                    return_rate_override: Some(0.04),
                    ..id
                },
            ),
        ])
    }

    /// Load the catalog from `scenarios.csv` in the default location (data/catalog/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load the catalog from `scenarios.csv` in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file_path = path.join("scenarios.csv");
        let mut reader = csv::Reader::from_path(&file_path)
            .map_err(|e| PlannerError::csv(&file_path, e))?;

        let mut definitions = Vec::new();
        for result in reader.deserialize() {
            let row: CsvRow = result.map_err(|e| PlannerError::csv(&file_path, e))?;
            definitions.push(row.into_definition()?);
        }

        log::info!("Loaded {} scenarios from {}", definitions.len(), file_path.display());
        Ok(Self::new(definitions))
    }

    pub fn definitions(&self) -> &[ScenarioDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Raw CSV row matching scenarios.csv columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    tone: String,
    description: String,
    income_multiplier: f64,
    expense_multiplier: f64,
    investment_multiplier: f64,
    savings_multiplier: f64,
    savings_offset: f64,
    dependents_delta: u32,
    return_rate_override: Option<f64>,
}

impl CsvRow {
    fn into_definition(self) -> Result<ScenarioDefinition> {
        let definition = ScenarioDefinition {
            tone: ScenarioTone::parse(self.tone.trim())?,
            id: self.id,
            name: self.name,
            description: self.description,
            delta: ProfileDelta {
                income_multiplier: self.income_multiplier,
                expense_multiplier: self.expense_multiplier,
                investment_multiplier: self.investment_multiplier,
                savings_multiplier: self.savings_multiplier,
                savings_offset: self.savings_offset,
                dependents_delta: self.dependents_delta,
                return_rate_override: self.return_rate_override,
            },
        };

        if definition.is_baseline() && definition.delta != ProfileDelta::identity() {
            return Err(PlannerError::BaselineWithDelta { id: definition.id });
        }
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_delta_preserves_profile() {
        let profile = FinancialProfile {
            monthly_active_income: 5_000.0,
            monthly_expense: 3_000.0,
            initial_bank_balance: 10_000.0,
            monthly_investment: 1_000.0,
            dependents: 2,
            ..Default::default()
        };
        assert_eq!(ProfileDelta::identity().apply(&profile), profile);
    }

    #[test]
    fn test_medical_delta() {
        let catalog = ScenarioCatalog::standard();
        let medical = catalog.get("medical").unwrap();
        let profile = FinancialProfile {
            monthly_active_income: 5_000.0,
            monthly_expense: 3_000.0,
            initial_bank_balance: 10_000.0,
            monthly_investment: 1_000.0,
            ..Default::default()
        };

        let adjusted = medical.delta.apply(&profile);
        assert_eq!(adjusted.monthly_active_income, 5_000.0);
        assert_eq!(adjusted.monthly_expense, 3_000.0 * 1.40);
        assert_eq!(adjusted.monthly_investment, 0.0);
        assert_eq!(adjusted.initial_bank_balance, -60_000.0);
    }

    #[test]
    fn test_return_override() {
        let base = GrowthAssumptions::standard();
        let catalog = ScenarioCatalog::standard();

        let recession = catalog.get("recession").unwrap();
        assert_eq!(recession.delta.assumptions(base).investment_return, 0.04);

        let career = catalog.get("career_growth").unwrap();
        assert_eq!(career.delta.assumptions(base), base);
    }

    #[test]
    fn test_baseline_prepended_when_missing() {
        let catalog = ScenarioCatalog::new(vec![ScenarioDefinition::new(
            "job_loss",
            "Job Loss",
            ScenarioTone::Critical,
            "",
            ProfileDelta { income_multiplier: 0.0, ..ProfileDelta::identity() },
        )]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.definitions()[0].is_baseline());
        assert_eq!(catalog.definitions()[1].id, "job_loss");
    }

    fn csv_row(id: &str, expense_multiplier: f64) -> CsvRow {
        CsvRow {
            id: id.to_string(),
            name: "Row".to_string(),
            tone: "neutral".to_string(),
            description: String::new(),
            income_multiplier: 1.0,
            expense_multiplier,
            investment_multiplier: 1.0,
            savings_multiplier: 1.0,
            savings_offset: 0.0,
            dependents_delta: 0,
            return_rate_override: None,
        }
    }

    #[test]
    fn test_baseline_row_with_delta_rejected() {
        let err = csv_row(BASELINE_ID, 2.0).into_definition().unwrap_err();
        assert!(matches!(err, PlannerError::BaselineWithDelta { ref id } if id == BASELINE_ID));

        assert!(csv_row(BASELINE_ID, 1.0).into_definition().is_ok());
        assert!(csv_row("costly", 2.0).into_definition().is_ok());
    }

    #[test]
    fn test_baseline_delta_reset_in_catalog() {
        let mut baseline = ScenarioDefinition::baseline();
        baseline.delta.expense_multiplier = 2.0;
        let catalog = ScenarioCatalog::new(vec![baseline]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.definitions()[0].delta, ProfileDelta::identity());
    }

    #[test]
    fn test_load_default_csv_matches_standard() {
        let loaded = ScenarioCatalog::from_csv();
        assert!(loaded.is_ok(), "Failed to load scenarios: {:?}", loaded.err());

        let loaded = loaded.unwrap();
        let standard = ScenarioCatalog::standard();
        assert_eq!(loaded.len(), standard.len());
        for (a, b) in loaded.definitions().iter().zip(standard.definitions()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.tone, b.tone);
            assert_eq!(a.delta, b.delta);
        }
    }
}
