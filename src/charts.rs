use crate::metrics::{sales_by_category, sales_by_date};
use crate::record::{format_usd, SalesRecord};

const BAR_WIDTH: usize = 40;
const HISTOGRAM_BUCKETS: usize = 10;
const SCATTER_COLS: usize = 50;
const SCATTER_ROWS: usize = 12;

/// Horizontal bars of total sales per category, widest seller first.
pub fn category_bars(records: &[SalesRecord]) -> Vec<String> {
    let totals = sales_by_category(records);
    if totals.is_empty() {
        return vec![String::from("(no data)")];
    }

    let mut ordered: Vec<(String, u128)> = totals.into_iter().collect();
    // largest first; the sort is stable so equal totals stay in key order
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let widest = ordered
        .iter()
        .map(|(category, _)| category.len())
        .max()
        .unwrap_or(0);
    let max_total = ordered[0].1;

    ordered
        .iter()
        .map(|(category, total)| {
            let bar = "#".repeat(scaled(*total, max_total, BAR_WIDTH));
            format!("{category:<widest$} | {bar} {}", format_usd(*total))
        })
        .collect()
}

/// One bar per day, in ascending date order.
pub fn daily_trend(records: &[SalesRecord]) -> Vec<String> {
    let totals = sales_by_date(records);
    if totals.is_empty() {
        return vec![String::from("(no data)")];
    }

    let max_total = totals.values().copied().max().unwrap_or(0);

    totals
        .iter()
        .map(|(date, total)| {
            let bar = "#".repeat(scaled(*total, max_total, BAR_WIDTH));
            format!("{date} | {bar} {}", format_usd(*total))
        })
        .collect()
}

/// Price distribution over equal-width buckets between the cheapest
/// and the dearest product.
pub fn price_histogram(records: &[SalesRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![String::from("(no data)")];
    }

    let min_price = records.iter().map(|r| r.price).min().unwrap_or(0);
    let max_price = records.iter().map(|r| r.price).max().unwrap_or(0);
    // the width rounds up so the dearest price lands in the last
    // bucket instead of one past it
    let span = (max_price - min_price).max(1);
    let bucket_width = span.div_ceil(HISTOGRAM_BUCKETS as u128);

    let mut counts = [0usize; HISTOGRAM_BUCKETS];
    for record in records {
        let index = ((record.price - min_price) / bucket_width) as usize;
        counts[index.min(HISTOGRAM_BUCKETS - 1)] += 1;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            // label arithmetic saturates so a price at the top of the
            // fixed-point range cannot push a bound past u128
            let low = min_price.saturating_add(bucket_width.saturating_mul(index as u128));
            let high = low.saturating_add(bucket_width);
            let bar = "#".repeat(scaled(*count as u128, max_count as u128, BAR_WIDTH));
            format!(
                "{:>12} - {:<12} | {bar} {count}",
                format_usd(low),
                format_usd(high)
            )
        })
        .collect()
}

/// Price against quantity on a character grid. Each point is marked
/// with the first letter of its category; a shared cell keeps the
/// last mark written.
pub fn price_quantity_scatter(records: &[SalesRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![String::from("(no data)")];
    }

    let min_price = records.iter().map(|r| r.price).min().unwrap_or(0);
    let max_price = records.iter().map(|r| r.price).max().unwrap_or(0);
    let price_span = (max_price - min_price).max(1);
    let max_quantity = records
        .iter()
        .map(|r| r.quantity_sold)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut grid = vec![[' '; SCATTER_COLS]; SCATTER_ROWS];
    for record in records {
        let column =
            ((record.price - min_price).saturating_mul((SCATTER_COLS - 1) as u128) / price_span) as usize;
        let from_bottom = (record.quantity_sold as u128 * (SCATTER_ROWS - 1) as u128
            / max_quantity as u128) as usize;
        let marker = record
            .category
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('*');
        grid[SCATTER_ROWS - 1 - from_bottom][column] = marker;
    }

    let mut lines = Vec::with_capacity(SCATTER_ROWS + 2);
    for (index, cells) in grid.iter().enumerate() {
        let label = if index == 0 {
            format!("{max_quantity:>8}")
        } else if index == SCATTER_ROWS - 1 {
            format!("{:>8}", 0)
        } else {
            " ".repeat(8)
        };
        let row: String = cells.iter().collect();
        lines.push(format!("{label} |{row}"));
    }
    lines.push(format!("{} +{}", " ".repeat(8), "-".repeat(SCATTER_COLS)));
    lines.push(format!(
        "{}  price {} to {}",
        " ".repeat(8),
        format_usd(min_price),
        format_usd(max_price)
    ));
    lines
}

/// Print the dashboard: categories, trend, price spread, then price
/// vs quantity.
pub fn render_dashboard(records: &[SalesRecord]) {
    print_chart("Total Sales by Category", &category_bars(records));
    print_chart("Sales Trend Over Time", &daily_trend(records));
    print_chart("Distribution of Product Prices", &price_histogram(records));
    print_chart("Price vs. Quantity Sold", &price_quantity_scatter(records));
}

fn print_chart(title: &str, lines: &[String]) {
    println!("\n--- {title} ---");
    for line in lines {
        println!("{line}");
    }
}

/// Scale a value against the chart maximum, keeping any nonzero value
/// visible at a width of at least one.
fn scaled(value: u128, max: u128, width: usize) -> usize {
    if value == 0 || max == 0 {
        return 0;
    }
    let exact = (value.saturating_mul(width as u128) / max) as usize;
    exact.max(1)
}
