// Console configuration, mirroring assets/config/default.json
use anyhow::{anyhow, Context, Result};
use engine::config::EngineSettings;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
    pub engine: EngineSettings,
    pub inputs: InputDefaults,
    pub display: DisplaySettings,
}

/// Initial values of the per-cycle inputs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InputDefaults {
    pub monthly_cases: f64,
    pub reference_price: f64,
    pub comparison_price: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        InputDefaults { monthly_cases: 50.0, reference_price: 79.0, comparison_price: 70.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings { color: true }
    }
}

impl AppConfig {
    pub fn load_default() -> Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str).context("embedded default configuration is invalid")
    }

    /// Reads a user config; keys it leaves out keep their built-in defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_json(&config_str).with_context(|| format!("invalid config file '{}'", path.display()))
    }

    pub fn from_json(config_str: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        let inputs = [
            ("inputs.monthly_cases", self.inputs.monthly_cases),
            ("inputs.reference_price", self.inputs.reference_price),
            ("inputs.comparison_price", self.inputs.comparison_price),
        ];
        for (key, value) in inputs {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number, got {}", key, value));
            }
        }
        Ok(())
    }
}
