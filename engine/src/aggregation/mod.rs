// Usage aggregation: per short-name statistics built from the usage sheet.
pub mod daily_usage;

pub use daily_usage::{aggregate_usage, per_person_usage};

use shared::models::ProductAggregate;
use std::collections::BTreeMap;

/// Aggregated usage data keyed by short name, iterated in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageAggregates {
    products: BTreeMap<String, ProductAggregate>,
    total_rows: usize,
    dropped_rows: usize,
}

impl UsageAggregates {
    pub fn new(products: BTreeMap<String, ProductAggregate>, total_rows: usize, dropped_rows: usize) -> Self {
        UsageAggregates { products, total_rows, dropped_rows }
    }

    pub fn get(&self, short_name: &str) -> Option<&ProductAggregate> {
        self.products.get(short_name)
    }

    pub fn daily_usage(&self, short_name: &str) -> Option<f64> {
        self.get(short_name).map(|p| p.daily_usage)
    }

    pub fn pack_size(&self, short_name: &str) -> Option<f64> {
        self.get(short_name).and_then(|p| p.pack_size)
    }

    pub fn packs_per_case(&self, short_name: &str) -> Option<f64> {
        self.get(short_name).and_then(|p| p.packs_per_case)
    }

    pub fn product_code(&self, short_name: &str) -> Option<&str> {
        self.get(short_name).and_then(|p| p.product_code.as_deref())
    }

    pub fn country_of_origin(&self, short_name: &str) -> Option<&str> {
        self.get(short_name).and_then(|p| p.country_of_origin.as_deref())
    }

    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}
