pub mod settings;

pub use settings::{ColumnNames, EngineSettings, Fallbacks, ProductFallback};
