// Caches aggregated usage data for the session until explicitly invalidated.
use crate::aggregation::{aggregate_usage, UsageAggregates};
use crate::config::{ColumnNames, EngineSettings};
use crate::data::usage_sheet::UsageSheetParser;
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use shared::models::UsageRecord;
use std::path::PathBuf;
use std::sync::Arc;

/// Where usage rows come from.
pub trait UsageSource: Send + Sync {
    fn describe(&self) -> String;
    fn read_records(&self) -> Result<Vec<UsageRecord>, EngineError>;
}

pub struct CsvUsageSource {
    path: PathBuf,
    delimiter: u8,
    columns: ColumnNames,
}

impl CsvUsageSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8, columns: ColumnNames) -> Self {
        CsvUsageSource { path: path.into(), delimiter, columns }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        // validate() guarantees an ASCII delimiter
        Self::new(settings.data_path.clone(), settings.delimiter as u8, settings.columns.clone())
    }
}

impl UsageSource for CsvUsageSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_records(&self) -> Result<Vec<UsageRecord>, EngineError> {
        UsageSheetParser::load_records_from_path(&self.path, self.delimiter, &self.columns)
    }
}

pub struct XlsxUsageSource {
    path: PathBuf,
    sheet: Option<String>,
    columns: ColumnNames,
}

impl XlsxUsageSource {
    pub fn new(path: impl Into<PathBuf>, sheet: Option<String>, columns: ColumnNames) -> Self {
        XlsxUsageSource { path: path.into(), sheet, columns }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.data_path.clone(), settings.sheet_name.clone(), settings.columns.clone())
    }
}

impl UsageSource for XlsxUsageSource {
    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }

    fn read_records(&self) -> Result<Vec<UsageRecord>, EngineError> {
        UsageSheetParser::load_records_from_workbook(&self.path, self.sheet.as_deref(), &self.columns)
    }
}

/// Picks the reader for the configured data file by its extension.
pub fn source_from_settings(settings: &EngineSettings) -> Box<dyn UsageSource> {
    if settings.is_workbook() {
        Box::new(XlsxUsageSource::from_settings(settings))
    } else {
        Box::new(CsvUsageSource::from_settings(settings))
    }
}

pub struct UsageRepository {
    source: Box<dyn UsageSource>,
    cache: Option<Arc<UsageAggregates>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl UsageRepository {
    pub fn new(source: Box<dyn UsageSource>) -> Self {
        UsageRepository { source, cache: None, loaded_at: None }
    }

    /// Returns the cached aggregates, reading the source on first access.
    pub fn load(&mut self) -> Result<Arc<UsageAggregates>, EngineError> {
        if let Some(cached) = &self.cache {
            return Ok(Arc::clone(cached));
        }

        let source = self.source.describe();
        tracing::info!(source = %source, "Loading usage data");
        let records = self.source.read_records().map_err(|e| {
            tracing::error!(source = %source, error = %e, "Failed to load usage data");
            e
        })?;

        let aggregates = Arc::new(aggregate_usage(&records));
        tracing::info!(
            source = %source,
            rows = aggregates.total_rows(),
            dropped = aggregates.dropped_rows(),
            products = aggregates.len(),
            "Usage data loaded"
        );
        self.cache = Some(Arc::clone(&aggregates));
        self.loaded_at = Some(Utc::now());
        Ok(aggregates)
    }

    /// Drops the cache; the next `load()` re-reads the source.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::info!(source = %self.source.describe(), "Usage data cache cleared");
        }
        self.loaded_at = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
