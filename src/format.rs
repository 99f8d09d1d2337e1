//! Formatting

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an ETH amount for display: thousands separators, at most three
/// fraction digits and no trailing zeros.
///
/// `1234.5` is shown as `"1,234.5 ETH"` and zero as `"0 ETH"`.
pub fn format_eth(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(whole, fraction)| {
            (whole, Some(fraction))
        });

    let mut out = String::with_capacity(digits.len() + 8);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }

    out.push_str(&group_thousands(whole));

    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out.push_str(" ETH");

    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_eth_groups_thousands() {
        assert_eq!(format_eth(Decimal::new(12345, 1)), "1,234.5 ETH");
        assert_eq!(format_eth(Decimal::from(1_000_000)), "1,000,000 ETH");
        assert_eq!(format_eth(Decimal::from(999)), "999 ETH");
    }

    #[test]
    fn format_eth_keeps_at_most_three_fraction_digits() {
        assert_eq!(format_eth(Decimal::new(12345, 4)), "1.235 ETH");
        assert_eq!(format_eth(Decimal::new(4200, 4)), "0.42 ETH");
        assert_eq!(format_eth(Decimal::new(1, 4)), "0 ETH");
    }

    #[test]
    fn format_eth_zero() {
        assert_eq!(format_eth(Decimal::ZERO), "0 ETH");
    }

    #[test]
    fn format_eth_negative() {
        assert_eq!(format_eth(Decimal::new(-15005, 1)), "-1,500.5 ETH");
    }
}
