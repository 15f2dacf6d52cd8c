//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Formats a decimal amount as a dollar price string.
///
/// Usage in templates: `{{ product.price|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format a decimal string as a dollar amount with two decimal places.
fn format_money(raw: &str) -> String {
    raw.parse::<Decimal>().map_or_else(
        |_| format!("${raw}"),
        |amount| format!("${:.2}", amount.round_dp(2)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_two_decimal_places() {
        assert_eq!(format_money("8"), "$8.00");
        assert_eq!(format_money("19.9"), "$19.90");
        assert_eq!(format_money("19.99"), "$19.99");
    }

    #[test]
    fn money_passes_through_unparseable_input() {
        assert_eq!(format_money("free"), "$free");
    }
}
