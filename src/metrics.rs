use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::record::SalesRecord;

/// Aggregates computed over the whole dataset.
///
/// A snapshot belongs to the dataset it was computed from; replacing
/// the dataset makes it stale, which is why the session recomputes it
/// on every successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub total_sales: u128,
    pub average_sale_value: u128,
    pub most_popular_product: String,
}

impl Metrics {
    /// Compute the snapshot, or nothing at all for an empty dataset.
    pub fn compute(records: &[SalesRecord]) -> Option<Metrics> {
        if records.is_empty() {
            return None;
        }

        let total_sales = records
            .iter()
            .fold(0u128, |sum, record| sum.saturating_add(record.total_sales));
        let average_sale_value = total_sales / records.len() as u128;

        // group quantities per product. the BTreeMap keeps the grouping
        // order stable, so a tie resolves to the first product in key
        // order rather than whichever hashed first.
        let mut by_product: BTreeMap<&str, u64> = BTreeMap::new();
        for record in records {
            let quantity = by_product.entry(record.product.as_str()).or_insert(0);
            *quantity = quantity.saturating_add(record.quantity_sold);
        }

        let mut groups = by_product.into_iter();
        let (mut best_product, mut best_quantity) = groups.next()?;
        for (product, quantity) in groups {
            if quantity > best_quantity {
                best_product = product;
                best_quantity = quantity;
            }
        }

        Some(Metrics {
            total_sales,
            average_sale_value,
            most_popular_product: best_product.to_owned(),
        })
    }
}

/// Total sales per category, in category key order.
pub fn sales_by_category(records: &[SalesRecord]) -> BTreeMap<String, u128> {
    let mut totals: BTreeMap<String, u128> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.category.clone()).or_insert(0);
        *total = total.saturating_add(record.total_sales);
    }
    totals
}

/// Total sales per day, in ascending date order.
pub fn sales_by_date(records: &[SalesRecord]) -> BTreeMap<NaiveDate, u128> {
    let mut totals: BTreeMap<NaiveDate, u128> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.date).or_insert(0);
        *total = total.saturating_add(record.total_sales);
    }
    totals
}
