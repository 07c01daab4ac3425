// Services exposed to front-ends.
pub mod comparison_service;

pub use comparison_service::{ComparisonRequest, ComparisonService};
