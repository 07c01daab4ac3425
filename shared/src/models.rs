use serde::{Deserialize, Serialize};

/// One row of the usage sheet. Every cell is optional at parse time; the
/// aggregator decides which rows are usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub product_code: Option<String>,
    pub short_name: Option<String>,
    pub estimated_sheets: Option<f64>,
    pub headcount: Option<f64>,
    pub sheets_per_pack: Option<f64>,
    pub packs_per_case: Option<f64>,
    pub country_of_origin: Option<String>,
    pub product_name: Option<String>,
}

/// Per short-name statistics derived from the valid usage rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub short_name: String,
    /// Mean of estimated sheets / headcount over the group's valid rows.
    pub daily_usage: f64,
    pub pack_size: Option<f64>,
    pub packs_per_case: Option<f64>,
    pub country_of_origin: Option<String>,
    pub product_code: Option<String>,
    /// Number of rows that contributed to `daily_usage`.
    pub sample_count: usize,
}

/// Runtime inputs for one side of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInputs {
    pub short_name: String,
    pub daily_usage: f64,
    pub pack_size: f64,
    pub packs_per_case: f64,
    pub price_per_pack: f64,
    pub country_of_origin: Option<String>,
}

impl ProductInputs {
    /// Label used in result tables, e.g. `ソフト（中国）`.
    pub fn display_label(&self, with_origin: bool) -> String {
        if with_origin {
            product_label(&self.short_name, self.country_of_origin.as_deref())
        } else {
            self.short_name.clone()
        }
    }
}

/// Formats a short name with its country of origin, `?` when unknown.
pub fn product_label(short_name: &str, origin: Option<&str>) -> String {
    format!("{}（{}）", short_name, origin.unwrap_or("?"))
}

/// Derived costs for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    pub product: ProductInputs,
    pub daily_cost_per_person: f64,
    pub case_price: f64,
    pub case_uses: f64,
    pub required_cases: f64,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Switching to the reference product lowers the monthly cost.
    CostReduction,
    NoReduction,
}

impl Recommendation {
    /// A zero difference is not a reduction.
    pub fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            Recommendation::CostReduction
        } else {
            Recommendation::NoReduction
        }
    }

    pub fn is_reduction(self) -> bool {
        matches!(self, Recommendation::CostReduction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub reference: ProductCost,
    pub comparison: ProductCost,
    /// Uses supplied by the entered comparison case volume.
    pub required_uses: f64,
    /// Comparison monthly cost minus reference monthly cost.
    pub diff: f64,
    /// `diff` as a percentage of the comparison monthly cost.
    pub rate: f64,
    pub recommendation: Recommendation,
}
