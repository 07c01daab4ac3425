// Groups usage rows by short name and averages the per-person usage.
use super::UsageAggregates;
use shared::models::{ProductAggregate, UsageRecord};
use std::collections::BTreeMap;

#[derive(Default)]
struct GroupAccumulator {
    usage_sum: f64,
    count: usize,
    pack_size: Option<f64>,
    packs_per_case: Option<f64>,
    country_of_origin: Option<String>,
    product_code: Option<String>,
}

impl GroupAccumulator {
    fn push(&mut self, per_person: f64, record: &UsageRecord) {
        self.usage_sum += per_person;
        self.count += 1;
        // First observed value wins; blank cells are not observations.
        if self.pack_size.is_none() {
            self.pack_size = record.sheets_per_pack;
        }
        if self.packs_per_case.is_none() {
            self.packs_per_case = record.packs_per_case;
        }
        if self.country_of_origin.is_none() {
            self.country_of_origin = record.country_of_origin.clone();
        }
        if self.product_code.is_none() {
            self.product_code = record.product_code.clone();
        }
    }

    fn finish(self, short_name: String) -> ProductAggregate {
        ProductAggregate {
            short_name,
            daily_usage: self.usage_sum / self.count as f64,
            pack_size: self.pack_size,
            packs_per_case: self.packs_per_case,
            country_of_origin: self.country_of_origin,
            product_code: self.product_code,
            sample_count: self.count,
        }
    }
}

/// Per-person usage of a row, or `None` if the row must be dropped.
pub fn per_person_usage(record: &UsageRecord) -> Option<f64> {
    let sheets = record.estimated_sheets?;
    let headcount = record.headcount?;
    if headcount <= 0.0 {
        return None;
    }
    Some(sheets / headcount)
}

pub fn aggregate_usage(records: &[UsageRecord]) -> UsageAggregates {
    let mut groups: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
    let mut dropped = 0usize;

    for record in records {
        let (Some(short_name), Some(per_person)) = (record.short_name.as_ref(), per_person_usage(record)) else {
            dropped += 1;
            continue;
        };
        groups.entry(short_name.clone()).or_default().push(per_person, record);
    }

    if dropped > 0 {
        tracing::debug!(dropped, total = records.len(), "Dropped usage rows without usable usage/headcount");
    }

    let products = groups
        .into_iter()
        .map(|(name, acc)| (name.clone(), acc.finish(name)))
        .collect();
    UsageAggregates::new(products, records.len(), dropped)
}
