// Entry point used by the front-end: choices, comparisons and cache control.
use crate::calculator::{self, ComparisonInputs};
use crate::config::EngineSettings;
use crate::data::{self, UsageRepository, UsageSource};
use crate::error::EngineError;
use crate::products::{self, ProductChoice};
use chrono::{DateTime, Utc};
use shared::models::ComparisonResult;

/// One interaction cycle's user inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub comparison_short_name: String,
    pub monthly_cases: f64,
    pub reference_price: f64,
    pub comparison_price: f64,
}

pub struct ComparisonService {
    settings: EngineSettings,
    repository: UsageRepository,
}

impl ComparisonService {
    /// Validates the settings and reads usage data from the configured file.
    pub fn from_settings(settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        let source = data::source_from_settings(&settings);
        Ok(Self::with_source(settings, source))
    }

    pub fn with_source(settings: EngineSettings, source: Box<dyn UsageSource>) -> Self {
        ComparisonService { settings, repository: UsageRepository::new(source) }
    }

    pub fn reference_short_name(&self) -> &str {
        &self.settings.reference_short_name
    }

    pub fn choices(&mut self) -> Result<Vec<ProductChoice>, EngineError> {
        let aggregates = self.repository.load()?;
        let choices = products::comparison_choices(&aggregates, &self.settings.reference_short_name);
        if choices.is_empty() {
            tracing::warn!(source = %self.repository.source_description(), "No comparison products in usage data");
            return Err(EngineError::NoProducts);
        }
        Ok(choices)
    }

    pub fn compare(&mut self, request: &ComparisonRequest) -> Result<ComparisonResult, EngineError> {
        tracing::info!(
            product = %request.comparison_short_name,
            monthly_cases = request.monthly_cases,
            reference_price = request.reference_price,
            comparison_price = request.comparison_price,
            "Received comparison request"
        );
        let aggregates = self.repository.load()?;
        let pair = products::build_products(
            &aggregates,
            &self.settings,
            &request.comparison_short_name,
            request.reference_price,
            request.comparison_price,
        )?;

        let result = calculator::compute(&ComparisonInputs {
            reference: pair.reference,
            comparison: pair.comparison,
            monthly_cases: request.monthly_cases,
        })
        .map_err(|e| {
            tracing::error!(product = %request.comparison_short_name, error = %e, "Comparison failed");
            e
        })?;

        tracing::info!(
            product = %request.comparison_short_name,
            diff = result.diff,
            rate = result.rate,
            recommendation = ?result.recommendation,
            "Comparison computed"
        );
        Ok(result)
    }

    /// Clears cached usage data; the next request reloads the source.
    pub fn invalidate(&mut self) {
        self.repository.invalidate();
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.repository.loaded_at()
    }

    pub fn source_description(&self) -> String {
        self.repository.source_description()
    }
}
