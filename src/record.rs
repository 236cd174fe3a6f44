use chrono::NaiveDate;
use serde::Deserialize;

/// Calendar formats accepted for row dates and filter bounds,
/// tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Direct mapping of the input csv header.
///
/// Every field is an optional string so deserialising a row never
/// fails on bad content; the validation pass decides what survives.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Product")]
    pub product: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Quantity Sold")]
    pub quantity_sold: Option<String>,
    #[serde(rename = "Total Sales")]
    pub total_sales: Option<String>,
}

/// One validated transaction line.
///
/// `price` and `total_sales` are unsigned fixed-point with 4 decimals
/// (1.5 is stored as 15000), so a negative or non-numeric source value
/// can never survive into the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub category: String,
    pub price: u128,
    pub quantity_sold: u64,
    pub total_sales: u128,
}

impl RawRecord {
    /// Validate one raw row into a typed record, or drop it.
    ///
    /// Rows missing any required value are dropped, then coercion
    /// failures on date, price or quantity drop the row as well. No
    /// value is ever defaulted in.
    ///
    /// `total_supplied` says whether the source carried a Total Sales
    /// column; when it did not, or when the cell itself is unusable,
    /// the total is derived as price * quantity.
    pub fn validate(&self, total_supplied: bool) -> Option<SalesRecord> {
        let date = non_empty(&self.date)?;
        let product = non_empty(&self.product)?;
        let category = non_empty(&self.category)?;
        let price = non_empty(&self.price)?;
        let quantity = non_empty(&self.quantity_sold)?;

        let date = parse_date(date)?;
        let price = parse_money(price)?;
        let quantity_sold = parse_quantity(quantity)?;

        // a product that overflows the fixed-point range is treated
        // like any other coercion failure.
        let derived = price.checked_mul(quantity_sold as u128)?;
        let total_sales = if total_supplied {
            match non_empty(&self.total_sales) {
                Some(cell) => parse_money(cell).unwrap_or(derived),
                None => derived,
            }
        } else {
            derived
        };

        Some(SalesRecord {
            date,
            product: product.to_owned(),
            category: category.to_owned(),
            price,
            quantity_sold,
            total_sales,
        })
    }
}

/// A required cell is present only if it holds something other than
/// whitespace. The csv reader hands empty cells over as None, the
/// serde_json test path as Some(""), so both are checked here.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse a money string into 4-decimal fixed point.
///
/// "1.5" becomes 15000 and "100" becomes 1000000; digits beyond the
/// fourth decimal are truncated. Returns None for anything that does
/// not parse, including negatives (the unsigned parse rejects the
/// sign), which is the null marker the cleaning pass drops on.
pub fn parse_money(input: &str) -> Option<u128> {
    let processed = input.split('.').collect::<Vec<&str>>();

    // handle edge where int is supplied instead of
    // decimal.
    if processed.len() == 1 {
        return input.parse::<u128>().ok()?.checked_mul(10_000);
    }

    if let [units, decimals] = processed[..] {
        let mut decimals_iter = decimals.chars();
        let d0 = decimals_iter.next().unwrap_or('0');
        let d1 = decimals_iter.next().unwrap_or('0');
        let d2 = decimals_iter.next().unwrap_or('0');
        let d3 = decimals_iter.next().unwrap_or('0');

        return format!("{units}{d0}{d1}{d2}{d3}").parse::<u128>().ok();
    }

    None
}

/// Quantities are whole units; fractional or signed input fails the
/// coercion and drops the row.
pub fn parse_quantity(input: &str) -> Option<u64> {
    input.parse::<u64>().ok()
}

/// Coerce a date string against the accepted formats.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Transform fixed-point money back to string format with 4 decimals.
pub fn money_to_decimal_str(input: u128) -> String {
    let as_str = format!("{input:0>4}");
    let split_pos = as_str.len() - 4;
    let (units, decimals) = as_str.split_at(split_pos);

    let units = if units.is_empty() { "0" } else { units };
    format!("{units}.{decimals}")
}

/// Human format for summaries and chart labels: thousands separators
/// and 2 decimals, truncating the sub-cent digits.
pub fn format_usd(amount: u128) -> String {
    let units = amount / 10_000;
    let cents = (amount % 10_000) / 100;

    let mut reversed = String::new();
    for (index, digit) in units.to_string().chars().rev().enumerate() {
        if index > 0 && index % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(digit);
    }
    let grouped: String = reversed.chars().rev().collect();

    format!("{grouped}.{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // we use serde_json instead of parsing a csv just for testing as
    // we can use a simple json string.

    #[test]
    fn test_deserialise_raw_record() {
        let raw_string = r#"{ "Date": "2024-01-01", "Product": "Widget", "Category": "Tools", "Price": "10.5", "Quantity Sold": "3" }"#;
        let raw = serde_json::from_str::<RawRecord>(raw_string).unwrap();

        assert_eq!(raw.date.as_deref(), Some("2024-01-01"));
        assert_eq!(raw.product.as_deref(), Some("Widget"));
        assert_eq!(raw.category.as_deref(), Some("Tools"));
        assert_eq!(raw.price.as_deref(), Some("10.5"));
        assert_eq!(raw.quantity_sold.as_deref(), Some("3"));
        // the optional column simply stays absent
        assert_eq!(raw.total_sales, None);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("1.5"), Some(1_5000));

        // only decimals
        assert_eq!(parse_money("0.1234"), Some(1234));

        // beyond 4 decimals we choose to truncate
        assert_eq!(parse_money("0.123499999"), Some(1234));

        // no units before the d.p. - sometimes considered valid
        assert_eq!(parse_money(".0005"), Some(5));

        // an integer and not a decimal
        assert_eq!(parse_money("100"), Some(100_0000));

        assert_eq!(parse_money("0.0"), Some(0));

        // the top of the fixed-point range parses; one step past it
        // does not
        assert_eq!(
            parse_money("34028236692093846346337460743176821.1455"),
            Some(u128::MAX)
        );
        assert_eq!(parse_money("34028236692093846346337460743176821.1456"), None);

        // the failures become the null marker
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money("-3.5"), None);
        assert_eq!(parse_money("1.2.3"), None);
        assert_eq!(parse_money("1.2x"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("0"), Some(0));

        // quantities are whole units
        assert_eq!(parse_quantity("3.5"), None);
        assert_eq!(parse_quantity("-2"), None);
        assert_eq!(parse_quantity("many"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("2024-01-31"), Some(expected));
        assert_eq!(parse_date("2024/01/31"), Some(expected));
        assert_eq!(parse_date("01/31/2024"), Some(expected));

        assert_eq!(parse_date("31st January"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    fn raw(
        date: Option<&str>,
        product: Option<&str>,
        category: Option<&str>,
        price: Option<&str>,
        quantity: Option<&str>,
        total: Option<&str>,
    ) -> RawRecord {
        RawRecord {
            date: date.map(str::to_owned),
            product: product.map(str::to_owned),
            category: category.map(str::to_owned),
            price: price.map(str::to_owned),
            quantity_sold: quantity.map(str::to_owned),
            total_sales: total.map(str::to_owned),
        }
    }

    #[test]
    fn test_validate_keeps_fully_typed_row() {
        let record = raw(
            Some("2024-01-01"),
            Some("Widget"),
            Some("Tools"),
            Some("10.5"),
            Some("3"),
            None,
        )
        .validate(false)
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.price, 10_5000);
        assert_eq!(record.quantity_sold, 3);
        // derived: 10.5 * 3
        assert_eq!(record.total_sales, 31_5000);
    }

    #[test]
    fn test_validate_drops_missing_required_values() {
        let full = raw(
            Some("2024-01-01"),
            Some("Widget"),
            Some("Tools"),
            Some("10.5"),
            Some("3"),
            None,
        );
        assert!(full.validate(false).is_some());

        assert!(raw(None, Some("W"), Some("T"), Some("1"), Some("1"), None)
            .validate(false)
            .is_none());
        assert!(
            raw(Some("2024-01-01"), None, Some("T"), Some("1"), Some("1"), None)
                .validate(false)
                .is_none()
        );
        // whitespace counts as missing
        assert!(raw(
            Some("2024-01-01"),
            Some("  "),
            Some("T"),
            Some("1"),
            Some("1"),
            None
        )
        .validate(false)
        .is_none());
        assert!(
            raw(Some("2024-01-01"), Some("W"), Some(""), Some("1"), Some("1"), None)
                .validate(false)
                .is_none()
        );
    }

    #[test]
    fn test_validate_drops_coercion_failures() {
        // bad date
        assert!(
            raw(Some("soon"), Some("W"), Some("T"), Some("1"), Some("1"), None)
                .validate(false)
                .is_none()
        );
        // bad price, including negatives
        assert!(raw(
            Some("2024-01-01"),
            Some("W"),
            Some("T"),
            Some("free"),
            Some("1"),
            None
        )
        .validate(false)
        .is_none());
        assert!(
            raw(Some("2024-01-01"), Some("W"), Some("T"), Some("-4"), Some("1"), None)
                .validate(false)
                .is_none()
        );
        // fractional quantity
        assert!(
            raw(Some("2024-01-01"), Some("W"), Some("T"), Some("1"), Some("2.5"), None)
                .validate(false)
                .is_none()
        );
    }

    #[test]
    fn test_validate_prefers_supplied_total() {
        let record = raw(
            Some("2024-01-01"),
            Some("Widget"),
            Some("Tools"),
            Some("10"),
            Some("3"),
            Some("99.99"),
        )
        .validate(true)
        .unwrap();
        assert_eq!(record.total_sales, 99_9900);

        // an unusable cell falls back to the derived product
        let record = raw(
            Some("2024-01-01"),
            Some("Widget"),
            Some("Tools"),
            Some("10"),
            Some("3"),
            Some("n/a"),
        )
        .validate(true)
        .unwrap();
        assert_eq!(record.total_sales, 30_0000);

        // and so does the column being absent entirely
        let record = raw(
            Some("2024-01-01"),
            Some("Widget"),
            Some("Tools"),
            Some("10"),
            Some("3"),
            Some("99.99"),
        )
        .validate(false)
        .unwrap();
        assert_eq!(record.total_sales, 30_0000);
    }

    #[test]
    fn test_money_to_decimal_string() {
        assert_eq!(money_to_decimal_str(1_2345), String::from("1.2345"));
        assert_eq!(money_to_decimal_str(100_2345), String::from("100.2345"));
        assert_eq!(money_to_decimal_str(2345), String::from("0.2345"));
        assert_eq!(money_to_decimal_str(5), String::from("0.0005"));
        assert_eq!(money_to_decimal_str(0), String::from("0.0000"));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(80_0000), "80.00");
        assert_eq!(format_usd(40_0000), "40.00");
        assert_eq!(format_usd(1234567_8900), "1,234,567.89");
        assert_eq!(format_usd(5), "0.00");
        assert_eq!(format_usd(10_5000), "10.50");
    }
}
