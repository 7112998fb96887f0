//! Type-safe price representation using decimal arithmetic.
//!
//! Gallery prices are quoted in KRW, which has no minor unit, but the
//! amount is kept as a `Decimal` so other currencies stay representable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., won, not jeon).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a KRW price from a whole-won amount.
    #[must_use]
    pub fn won(amount: i64) -> Self {
        Self {
            amount: Decimal::from(amount),
            currency_code: CurrencyCode::KRW,
        }
    }

    /// Format for display with a currency symbol and thousands separators
    /// (e.g., "₩1,200,000").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(self.currency_code.decimal_places());
        let formatted = group_thousands(&rounded.to_string());
        format!("{}{formatted}", self.currency_code.symbol())
    }
}

/// Insert comma separators into the integer part of a decimal string.
fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = s.strip_prefix('-').map_or(("", s), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    KRW,
    USD,
    EUR,
    JPY,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::KRW => "₩",
            Self::USD => "$",
            Self::EUR => "€",
            Self::JPY => "¥",
        }
    }

    /// Number of minor-unit decimal places.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Self::KRW | Self::JPY => 0,
            Self::USD | Self::EUR => 2,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_won_display() {
        assert_eq!(Price::won(1_200_000).display(), "₩1,200,000");
        assert_eq!(Price::won(0).display(), "₩0");
        assert_eq!(Price::won(999).display(), "₩999");
        assert_eq!(Price::won(1_000).display(), "₩1,000");
    }

    #[test]
    fn test_usd_display_keeps_cents() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::USD);
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("12"), "12");
        assert_eq!(group_thousands("-4500000"), "-4,500,000");
        assert_eq!(group_thousands("1234.56"), "1,234.56");
    }
}
