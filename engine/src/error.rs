use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Usage data source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Usage data is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Failed to load usage data: {0}")]
    Load(String),

    #[error("Division by zero: {quantity} of '{product}' is zero")]
    DivisionByZero { product: String, quantity: &'static str },

    #[error("No comparison products available in the usage data")]
    NoProducts,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for EngineError {
    fn from(source: csv::Error) -> Self {
        EngineError::Load(format!("CSV parsing system error: {}", source))
    }
}

impl From<calamine::XlsxError> for EngineError {
    fn from(source: calamine::XlsxError) -> Self {
        EngineError::Load(format!("Workbook parsing error: {}", source))
    }
}

impl From<std::io::Error> for EngineError {
    fn from(source: std::io::Error) -> Self {
        EngineError::Load(format!("I/O error: {}", source))
    }
}

impl EngineError {
    /// Errors caused by the data file, as opposed to the user's inputs.
    /// The console offers a reload for these.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            EngineError::SourceNotFound { .. }
                | EngineError::MissingColumns { .. }
                | EngineError::Load(_)
                | EngineError::NoProducts
        )
    }
}
