// Engine settings, loaded from the `engine` section of the JSON config
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub data_path: PathBuf,
    /// Worksheet to read when `data_path` is a workbook; the first one if unset.
    pub sheet_name: Option<String>,
    pub delimiter: char,
    pub columns: ColumnNames,
    pub reference_short_name: String,
    pub fallbacks: Fallbacks,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_path: PathBuf::from("data/usage.csv"),
            sheet_name: None,
            delimiter: ',',
            columns: ColumnNames::default(),
            reference_short_name: "新エルナ".to_string(),
            fallbacks: Fallbacks::default(),
        }
    }
}

impl EngineSettings {
    /// `.xlsx`/`.xlsm` paths are read as workbooks, anything else as delimited text.
    pub fn is_workbook(&self) -> bool {
        self.data_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.delimiter.is_ascii() {
            return Err(EngineError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if self.reference_short_name.trim().is_empty() {
            return Err(EngineError::Config("reference_short_name must not be empty".to_string()));
        }

        let names = self.columns.required();
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(EngineError::Config("column names must not be empty".to_string()));
            }
            if names[..idx].iter().any(|other| other.trim() == name.trim()) {
                return Err(EngineError::Config(format!("column '{}' is configured twice", name)));
            }
        }

        self.fallbacks.reference.validate("reference")?;
        self.fallbacks.comparison.validate("comparison")
    }
}

/// Header names of the usage sheet columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub product_code: String,
    pub short_name: String,
    pub estimated_sheets: String,
    pub headcount: String,
    pub sheets_per_pack: String,
    pub packs_per_case: String,
    pub country_of_origin: String,
    pub product_name: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            product_code: "商品コード".to_string(),
            short_name: "略符".to_string(),
            estimated_sheets: "推定使用枚数".to_string(),
            headcount: "事業所人数".to_string(),
            sheets_per_pack: "枚数".to_string(),
            packs_per_case: "入数".to_string(),
            country_of_origin: "原産国".to_string(),
            product_name: "商品名".to_string(),
        }
    }
}

impl ColumnNames {
    /// All required headers, in sheet order.
    pub fn required(&self) -> [&str; 8] {
        [
            self.product_code.as_str(),
            self.short_name.as_str(),
            self.estimated_sheets.as_str(),
            self.headcount.as_str(),
            self.sheets_per_pack.as_str(),
            self.packs_per_case.as_str(),
            self.country_of_origin.as_str(),
            self.product_name.as_str(),
        ]
    }
}

/// Values used when a product is absent from the usage data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub reference: ProductFallback,
    pub comparison: ProductFallback,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Fallbacks {
            reference: ProductFallback { daily_usage: 6.71, pack_size: 200.0, packs_per_case: 35.0 },
            comparison: ProductFallback { daily_usage: 0.0, pack_size: 200.0, packs_per_case: 40.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductFallback {
    pub daily_usage: f64,
    pub pack_size: f64,
    pub packs_per_case: f64,
}

impl ProductFallback {
    fn validate(&self, side: &str) -> Result<(), EngineError> {
        let values = [
            ("daily_usage", self.daily_usage),
            ("pack_size", self.pack_size),
            ("packs_per_case", self.packs_per_case),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::Config(format!(
                    "fallbacks.{}.{} must be a non-negative number, got {}",
                    side, field, value
                )));
            }
        }
        Ok(())
    }
}
