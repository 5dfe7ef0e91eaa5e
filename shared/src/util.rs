use rust_decimal::prelude::*;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Highest price the admin form accepts
pub const MAX_PRICE: f64 = 100_000_000.0;

const DECIMAL_PLACES: u32 = 2;

/// Format an amount with the currency symbol and grouped thousands.
///
/// Whole amounts render without decimals (`$2,400`); anything with a
/// fractional part renders with two decimals (`$1,234.50`). Amounts outside
/// `Decimal` range fall back to plain float formatting.
pub fn format_price(amount: f64, symbol: &str) -> String {
    let Some(value) = Decimal::from_f64(amount) else {
        return format!("{symbol}{amount}");
    };
    let rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let rounded = rounded.abs();
    let whole = rounded.trunc().normalize().to_string();
    let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if cents == 0 {
        format!("{sign}{symbol}{grouped}")
    } else {
        format!("{sign}{symbol}{grouped}.{cents:02}")
    }
}

/// Render a millisecond timestamp as a calendar date (`2024-03-01`)
pub fn format_date_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(2400.0, "$"), "$2,400");
        assert_eq!(format_price(999.0, "$"), "$999");
        assert_eq!(format_price(1000.0, "£"), "£1,000");
        assert_eq!(format_price(1_234_567.0, "$"), "$1,234,567");
        assert_eq!(format_price(0.0, "$"), "$0");
    }

    #[test]
    fn test_format_price_fractional() {
        assert_eq!(format_price(1234.5, "$"), "$1,234.50");
        assert_eq!(format_price(0.99, "€"), "€0.99");
    }

    #[test]
    fn test_format_price_large_amounts_stay_exact() {
        assert_eq!(format_price(MAX_PRICE, "$"), "$100,000,000");
        assert_eq!(format_price(1e20, "$"), "$100,000,000,000,000,000,000");
        assert_eq!(format_price(0.005, "$"), "$0.01");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-1500.0, "$"), "-$1,500");
    }

    #[test]
    fn test_format_date_millis() {
        // 2024-01-01T00:00:00Z
        assert_eq!(format_date_millis(1_704_067_200_000), "2024-01-01");
    }
}
