pub mod repository;
pub mod usage_sheet;

pub use repository::{source_from_settings, CsvUsageSource, UsageRepository, UsageSource, XlsxUsageSource};
pub use usage_sheet::UsageSheetParser;
