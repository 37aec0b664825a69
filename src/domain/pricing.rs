//! Display-side price helpers: currency conversion against a static rate table
//! and the compact labels used on product cards.

use rust_decimal::{Decimal, RoundingStrategy};

const SUPPORTED_CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "CAD", "AUD"];

pub fn supported_currencies() -> impl Iterator<Item = &'static str> {
    SUPPORTED_CURRENCIES.into_iter()
}

/// USD-based rates. Anything not listed converts at 1.
pub fn currency_rate(currency: &str) -> Decimal {
    match currency.to_ascii_uppercase().as_str() {
        "EUR" => Decimal::new(85, 2),
        "GBP" => Decimal::new(73, 2),
        "CAD" => Decimal::new(125, 2),
        "AUD" => Decimal::new(135, 2),
        _ => Decimal::ONE,
    }
}

/// `base * rate(currency) * exchange_rate`, rounded half away from zero to cents.
pub fn convert(base_price: Decimal, currency: &str, exchange_rate: Decimal) -> Decimal {
    (base_price * currency_rate(currency) * exchange_rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_price(price: Decimal) -> String {
    if price.is_zero() {
        "FREE".to_string()
    } else {
        format!("${:.2}", price)
    }
}

/// 950 -> "950", 8_000 -> "8.0K", 12_500 -> "12.5K", 1_200_000 -> "1.2M".
pub fn format_downloads(downloads: u64) -> String {
    if downloads >= 1_000_000 {
        compact(downloads, 1_000_000, "M")
    } else if downloads >= 1_000 {
        compact(downloads, 1_000, "K")
    } else {
        downloads.to_string()
    }
}

/// One decimal place, half up.
fn compact(value: u64, unit: u64, suffix: &str) -> String {
    let (value, unit) = (u128::from(value), u128::from(unit));
    let tenths = (value * 10 + unit / 2) / unit;
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn converts_with_table_rate() {
        assert_eq!(convert(d("12.99"), "EUR", Decimal::ONE), d("11.04"));
        assert_eq!(convert(d("12.99"), "gbp", Decimal::ONE), d("9.48"));
        assert_eq!(convert(d("49.99"), "AUD", Decimal::ONE), d("67.49"));
        assert_eq!(convert(d("10"), "USD", d("1.1")), d("11.00"));
    }

    #[test]
    fn unknown_currency_uses_unit_rate() {
        assert_eq!(currency_rate("JPY"), Decimal::ONE);
        assert_eq!(convert(d("9.99"), "JPY", Decimal::ONE), d("9.99"));
        assert_eq!(supported_currencies().count(), 5);
    }

    #[test]
    fn price_labels() {
        assert_eq!(format_price(Decimal::ZERO), "FREE");
        assert_eq!(format_price(d("12.99")), "$12.99");
        assert_eq!(format_price(d("7.5")), "$7.50");
    }

    #[test]
    fn download_labels() {
        assert_eq!(format_downloads(950), "950");
        assert_eq!(format_downloads(12_500), "12.5K");
        assert_eq!(format_downloads(8_000), "8.0K");
        assert_eq!(format_downloads(1_234_567), "1.2M");
        assert_eq!(format_downloads(u64::MAX), "18446744073709.6M");
    }
}
