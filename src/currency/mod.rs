//! Display formatting for ledger amounts.

use serde::{Deserialize, Serialize};

/// How the integer part of an amount is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Last three digits, then pairs: `12,34,567`.
    #[default]
    Indian,
    /// Thousands: `1,234,567`.
    Western,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    pub grouping: DigitGrouping,
}

impl CurrencyFormat {
    pub fn new(code: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            code: code.into().to_uppercase(),
            grouping,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("INR", DigitGrouping::Indian)
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => format!("{} ", code),
    }
}

/// Formats `value` with two decimals, digit grouping and currency symbol.
pub fn format_amount(value: f64, format: &CurrencyFormat) -> String {
    let body = format_number(value.abs(), format.grouping);
    let symbol = symbol_for(&format.code);
    // Keep "-0.00" from appearing for tiny negative remainders.
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Formats a magnitude with an explicit `+`/`-` sign prefix.
pub fn format_signed(magnitude: f64, positive: bool, format: &CurrencyFormat) -> String {
    let sign = if positive { '+' } else { '-' };
    format!("{}{}", sign, format_amount(magnitude.abs(), format))
}

fn format_number(value: f64, grouping: DigitGrouping) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}.{}", group_digits(int_part, grouping), frac_part)
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_string();
    }
    let split = chars.len() - 3;
    let (head, tail) = chars.split_at(split);
    let group = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };
    let mut groups: Vec<String> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(head[start..end].iter().collect());
        end = start;
    }
    groups.reverse();
    let tail: String = tail.iter().collect();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping_uses_pairs_after_thousands() {
        let inr = CurrencyFormat::default();
        assert_eq!(format_amount(123456.5, &inr), "₹1,23,456.50");
        assert_eq!(format_amount(1234567.0, &inr), "₹12,34,567.00");
        assert_eq!(format_amount(999.0, &inr), "₹999.00");
    }

    #[test]
    fn western_grouping_uses_thousands() {
        let usd = CurrencyFormat::new("usd", DigitGrouping::Western);
        assert_eq!(format_amount(1234567.891, &usd), "$1,234,567.89");
        assert_eq!(format_amount(-75.0, &usd), "-$75.00");
    }

    #[test]
    fn unknown_codes_fall_back_to_code_prefix() {
        let chf = CurrencyFormat::new("CHF", DigitGrouping::Western);
        assert_eq!(format_amount(5.0, &chf), "CHF 5.00");
    }

    #[test]
    fn signed_amounts_carry_explicit_sign() {
        let inr = CurrencyFormat::default();
        assert_eq!(format_signed(100.0, true, &inr), "+₹100.00");
        assert_eq!(format_signed(30.0, false, &inr), "-₹30.00");
    }

    #[test]
    fn negligible_negative_renders_as_zero() {
        assert_eq!(format_amount(-0.001, &CurrencyFormat::default()), "₹0.00");
    }
}
