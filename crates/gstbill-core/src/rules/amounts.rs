//! Amount parsing, rounding and Indian-style formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use super::patterns::AMOUNT_NOISE;

/// Round to 2 decimal places, halves away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a user-entered amount ("₹1,00,053.75", " 12.5 ", "").
///
/// Anything that does not parse is zero.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned = AMOUNT_NOISE.replace_all(s.trim(), "");
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Format an amount with Indian digit grouping (1,00,053.75).
pub fn format_inr(amount: Decimal) -> String {
    let s = format!("{:.2}", round2(amount));
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = unsigned.split_once('.') else {
        return s;
    };

    // Last three digits form one group, the rest groups of two
    let digits: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    let head = digits.len().saturating_sub(3);
    for (i, c) in digits[..head].iter().enumerate() {
        if i > 0 && (head - i) % 2 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }
    if head > 0 {
        formatted.push(',');
    }
    formatted.extend(&digits[head..]);

    format!("{}{}.{}", sign, formatted, decimal_part)
}

/// Serde helper: accept a number, a numeric string, an empty string or null.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => {
            Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .unwrap_or(Decimal::ZERO)
        }
        Some(serde_json::Value::String(s)) => parse_amount(&s),
        _ => Decimal::ZERO,
    })
}
