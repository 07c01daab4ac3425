// Engine library root: usage data loading, aggregation and cost comparison.

pub mod aggregation;
pub mod calculator;
pub mod config;
pub mod data;
pub mod error;
pub mod products;
pub mod services;

pub use error::EngineError;
