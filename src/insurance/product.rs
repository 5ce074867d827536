//! Insurance product reference data

use crate::error::{PlannerError, Result};
use crate::scenario::DEFAULT_CATALOG_PATH;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    TermLife,
}

/// A life-insurance product a household can be matched to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProduct {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub product_type: ProductType,
    pub min_coverage: f64,
    pub max_coverage: f64,
    /// Eligible issue ages, inclusive
    pub min_age: u32,
    pub max_age: u32,
    /// Monthly premium per $100,000 of cover at the base age
    pub premium_per_100k: f64,
    pub features: Vec<String>,
    pub renewable: bool,
    /// Last age the policy can be renewed to
    pub renewal_age: u32,
    pub suitability: String,
}

impl InsuranceProduct {
    pub fn accepts_age(&self, age: u32) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    pub fn accepts_coverage(&self, coverage: f64) -> bool {
        coverage >= self.min_coverage && coverage <= self.max_coverage
    }
}

/// Immutable product list the matcher ranks against
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCatalog {
    products: Vec<InsuranceProduct>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProductCatalog {
    pub fn new(products: Vec<InsuranceProduct>) -> Self {
        Self { products }
    }

    /// Representative term-life plans
    pub fn standard() -> Self {
        Self::new(vec![
            InsuranceProduct {
                min_coverage: 50_000.0,
                renewal_age: 70,
                features: features(&["Death benefit", "Medisave eligible", "Annual renewable"]),
                suitability: "Budget-friendly option for essential coverage".to_string(),
                ..term_plan("basic_term_plan", "Basic Term Plan", "Provider A", 12.0)
            },
            InsuranceProduct {
                max_age: 60,
                renewal_age: 70,
                features: features(&[
                    "Death benefit",
                    "Simple application",
                    "Quick approval (7 days)",
                ]),
                suitability: "Straightforward coverage with fast processing".to_string(),
                ..term_plan("standard_term_plan", "Standard Term Plan", "Provider B", 13.0)
            },
            InsuranceProduct {
                features: features(&["Death benefit", "Conversion option", "Premium flexibility"]),
                suitability: "Adaptable plan with option to convert to whole life".to_string(),
                ..term_plan("flexible_term_plan", "Flexible Term Plan", "Provider C", 14.0)
            },
            InsuranceProduct {
                features: features(&[
                    "Death benefit",
                    "Terminal illness",
                    "Total permanent disability",
                ]),
                suitability: "Comprehensive protection with disability coverage".to_string(),
                ..term_plan("premium_term_plan", "Premium Term Plan", "Provider D", 15.0)
            },
            InsuranceProduct {
                renewal_age: 80,
                features: features(&["Death benefit", "Critical illness rider", "Premium waiver"]),
                suitability: "Maximum coverage with critical illness protection".to_string(),
                ..term_plan("enhanced_term_plan", "Enhanced Term Plan", "Provider E", 16.0)
            },
        ])
    }

    /// Load products from `insurance_products.csv` in the default location (data/catalog/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load products from `insurance_products.csv` in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file_path = path.join("insurance_products.csv");
        let mut reader = csv::Reader::from_path(&file_path)
            .map_err(|e| PlannerError::csv(&file_path, e))?;

        let mut products = Vec::new();
        for result in reader.deserialize() {
            let row: CsvRow = result.map_err(|e| PlannerError::csv(&file_path, e))?;
            products.push(row.into_product()?);
        }

        log::info!("Loaded {} insurance products from {}", products.len(), file_path.display());
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[InsuranceProduct] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&InsuranceProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Renewable term plan for ages 18 to 65 and cover of 100k to 10M
fn term_plan(id: &str, name: &str, provider: &str, premium_per_100k: f64) -> InsuranceProduct {
    InsuranceProduct {
        id: id.to_string(),
        name: name.to_string(),
        provider: provider.to_string(),
        product_type: ProductType::TermLife,
        min_coverage: 100_000.0,
        max_coverage: 10_000_000.0,
        min_age: 18,
        max_age: 65,
        premium_per_100k,
        features: Vec::new(),
        renewable: true,
        renewal_age: 75,
        suitability: String::new(),
    }
}

fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|f| f.to_string()).collect()
}

/// Raw CSV row matching insurance_products.csv columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    provider: String,
    product_type: String,
    min_coverage: f64,
    max_coverage: f64,
    min_age: u32,
    max_age: u32,
    premium_per_100k: f64,
    /// `;`-separated
    features: String,
    renewable: bool,
    renewal_age: u32,
    suitability: String,
}

impl CsvRow {
    fn into_product(self) -> Result<InsuranceProduct> {
        let product_type = match self.product_type.trim() {
            "term_life" => ProductType::TermLife,
            other => {
                return Err(PlannerError::UnknownValue {
                    field: "product type",
                    value: other.to_string(),
                })
            }
        };

        Ok(InsuranceProduct {
            id: self.id,
            name: self.name,
            provider: self.provider,
            product_type,
            min_coverage: self.min_coverage,
            max_coverage: self.max_coverage,
            min_age: self.min_age,
            max_age: self.max_age,
            premium_per_100k: self.premium_per_100k,
            features: self
                .features
                .split(';')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
            renewable: self.renewable,
            renewal_age: self.renewal_age,
            suitability: self.suitability,
        })
    }
}
