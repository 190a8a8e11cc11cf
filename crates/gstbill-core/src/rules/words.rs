//! Amount in words using the Indian numbering system (lakh, crore).

use rust_decimal::Decimal;

use super::amounts::round2;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const THOUSAND: u128 = 1_000;
const LAKH: u128 = 100_000;
const CRORE: u128 = 10_000_000;

/// Render an amount for the "amount in words" line of a bill.
///
/// `290.00` becomes "Two Hundred Ninety Rupees Only";
/// `100053.75` becomes "One Lakh Fifty Three and Seventy Five Paise Rupees Only".
pub fn to_words(amount: Decimal) -> String {
    let amount = round2(amount);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "Minus "
    } else {
        ""
    };

    let amount = amount.abs();
    let rupees = amount.trunc();
    let paise = whole_units((amount - rupees) * Decimal::ONE_HUNDRED);
    let rupees = whole_units(rupees);

    let mut result = if rupees == 0 {
        "Zero".to_string()
    } else {
        integer_to_words(rupees)
    };
    if paise > 0 {
        result.push_str(" and ");
        result.push_str(&integer_to_words(paise));
        result.push_str(" Paise");
    }

    format!("{}{} Rupees Only", sign, result)
}

/// Integer part of a non-negative amount. Every `Decimal` fits in a u128.
fn whole_units(amount: Decimal) -> u128 {
    let whole = amount.trunc();
    whole.mantissa().unsigned_abs() / 10u128.pow(whole.scale())
}

/// Words for a whole number, empty for zero.
pub fn integer_to_words(n: u128) -> String {
    match n {
        0 => String::new(),
        1..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => join(TENS[(n / 10) as usize].to_string(), ONES[(n % 10) as usize]),
        100..=999 => join(
            format!("{} Hundred", ONES[(n / 100) as usize]),
            &integer_to_words(n % 100),
        ),
        _ if n < LAKH => group(n, THOUSAND, "Thousand"),
        _ if n < CRORE => group(n, LAKH, "Lakh"),
        _ => group(n, CRORE, "Crore"),
    }
}

fn group(n: u128, unit: u128, name: &str) -> String {
    join(
        format!("{} {}", integer_to_words(n / unit), name),
        &integer_to_words(n % unit),
    )
}

fn join(head: String, tail: &str) -> String {
    if tail.is_empty() {
        head
    } else {
        format!("{} {}", head, tail)
    }
}
