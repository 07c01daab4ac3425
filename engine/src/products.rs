// Builds the reference/comparison product inputs from aggregates and prices.
use crate::aggregation::UsageAggregates;
use crate::config::{EngineSettings, ProductFallback};
use crate::error::EngineError;
use serde::Serialize;
use shared::models::{product_label, ProductInputs};

/// A comparison product offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductChoice {
    pub short_name: String,
    /// `name（origin）`
    pub label: String,
}

/// Every short name except the reference product, in name order.
pub fn comparison_choices(aggregates: &UsageAggregates, reference_short_name: &str) -> Vec<ProductChoice> {
    aggregates
        .short_names()
        .filter(|name| *name != reference_short_name)
        .map(|name| ProductChoice {
            short_name: name.to_string(),
            label: product_label(name, aggregates.country_of_origin(name)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPair {
    pub reference: ProductInputs,
    pub comparison: ProductInputs,
}

pub fn build_products(
    aggregates: &UsageAggregates,
    settings: &EngineSettings,
    comparison_short_name: &str,
    reference_price: f64,
    comparison_price: f64,
) -> Result<ProductPair, EngineError> {
    let reference_short_name = settings.reference_short_name.as_str();
    if comparison_short_name == reference_short_name {
        return Err(EngineError::InvalidInput(format!(
            "'{}' is the reference product and cannot be compared with itself",
            comparison_short_name
        )));
    }

    Ok(ProductPair {
        reference: product_inputs(aggregates, reference_short_name, &settings.fallbacks.reference, reference_price),
        comparison: product_inputs(aggregates, comparison_short_name, &settings.fallbacks.comparison, comparison_price),
    })
}

fn product_inputs(
    aggregates: &UsageAggregates,
    short_name: &str,
    fallback: &ProductFallback,
    price_per_pack: f64,
) -> ProductInputs {
    let daily_usage = aggregates.daily_usage(short_name);
    let pack_size = aggregates.pack_size(short_name);
    let packs_per_case = aggregates.packs_per_case(short_name);

    if daily_usage.is_none() || pack_size.is_none() || packs_per_case.is_none() {
        tracing::warn!(
            product = %short_name,
            daily_usage_missing = daily_usage.is_none(),
            pack_size_missing = pack_size.is_none(),
            packs_per_case_missing = packs_per_case.is_none(),
            "Using fallback values for product"
        );
    }

    ProductInputs {
        short_name: short_name.to_string(),
        daily_usage: daily_usage.unwrap_or(fallback.daily_usage),
        pack_size: pack_size.unwrap_or(fallback.pack_size),
        packs_per_case: packs_per_case.unwrap_or(fallback.packs_per_case),
        price_per_pack,
        country_of_origin: aggregates.country_of_origin(short_name).map(str::to_string),
    }
}
