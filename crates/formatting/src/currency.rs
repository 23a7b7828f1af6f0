//! Currency text parsing and formatting.
//!
//! Quotes arrive as text in either Argentine locale (`1.234,56`) or plain
//! dot-decimal notation (`1234.56`). Anything that cannot be read as a number
//! is rendered as [`UNKNOWN_VALUE`] instead of failing the whole response.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder returned in place of an amount that could not be parsed.
pub const UNKNOWN_VALUE: &str = "?";

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Largest scale `Decimal` can represent.
const MAX_SCALE: u32 = 28;

/// Smallest amount rendered for a positive quote.
const ONE_CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Converts Argentine locale text into dot-decimal text.
///
/// When a comma is present, every `.` is a thousands separator and the comma
/// is the decimal separator. Text without a comma is returned untouched.
pub fn normalize_locale_number(value: &str) -> String {
    if value.contains(',') {
        value.replace('.', "").replace(',', ".")
    } else {
        value.to_string()
    }
}

/// Extracts the longest leading numeric literal, skipping leading whitespace.
///
/// Mirrors lenient float parsing: `"12abc"` reads as `12`, `"1.5e3x"` as `1.5e3`.
/// The returned literal is canonical (`"-.5"` becomes `"-0.5"`, `"5."` becomes `"5"`).
fn numeric_prefix(text: &str) -> Option<String> {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;
    let mut literal = String::new();

    match bytes.first() {
        Some(b'-') => {
            literal.push('-');
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &bytes[frac_start..end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    // Only ASCII digits were sliced above.
    literal.push_str(if int_digits.is_empty() {
        "0"
    } else {
        std::str::from_utf8(int_digits).ok()?
    });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(std::str::from_utf8(frac_digits).ok()?);
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        let sign = match bytes.get(end) {
            Some(b'-') => {
                end += 1;
                "-"
            }
            Some(b'+') => {
                end += 1;
                ""
            }
            _ => "",
        };
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            literal.push('e');
            literal.push_str(sign);
            literal.push_str(std::str::from_utf8(&bytes[exp_start..end]).ok()?);
        }
    }

    Some(literal)
}

/// A parsed quote.
///
/// Amounts inside the `Decimal` range are kept exact. Larger magnitudes are
/// carried as a finite `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Exact(Decimal),
    Approximate(f64),
}

impl Amount {
    /// Applies a whole-number tax percentage, e.g. `21` multiplies by `1.21`.
    pub fn with_tax(self, tax_percent: u32) -> Option<Amount> {
        let approximate = |value: f64| {
            let taxed = value * (1.0 + f64::from(tax_percent) / 100.0);
            taxed.is_finite().then_some(Amount::Approximate(taxed))
        };

        match self {
            Amount::Exact(amount) => match amount.checked_mul(tax_multiplier(tax_percent)) {
                Some(taxed) => Some(Amount::Exact(taxed)),
                None => approximate(amount.to_f64()?),
            },
            Amount::Approximate(value) => approximate(value),
        }
    }

    /// Renders the amount with a fixed number of decimals.
    pub fn format(&self, decimal_places: u32) -> String {
        match self {
            Amount::Exact(amount) => format_amount(*amount, decimal_places),
            Amount::Approximate(value) => {
                format!("{:.prec$}", value, prec = decimal_places as usize)
            }
        }
    }
}

/// Parses quote text into an amount, applying the one-cent floor to tiny positive values.
///
/// Returns `None` for text with no numeric prefix or a non-finite value.
pub fn parse_amount(value: &str) -> Option<Amount> {
    let normalized = normalize_locale_number(value);
    let literal = numeric_prefix(&normalized)?;

    let float = match literal.parse::<f64>() {
        Ok(float) if float.is_finite() => float,
        _ => {
            tracing::debug!("Quote '{}' is not a finite number", value);
            return None;
        }
    };

    // Positive values too small for `Decimal` still round up to one cent
    if float > 0.0 && float < 0.01 {
        return Some(Amount::Exact(ONE_CENT));
    }

    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };

    match parsed {
        Ok(amount) if amount > Decimal::ZERO && amount < ONE_CENT => {
            Some(Amount::Exact(ONE_CENT))
        }
        Ok(amount) => Some(Amount::Exact(amount)),
        // Negative underflow
        Err(_) if float.abs() < 1.0 => Some(Amount::Exact(Decimal::ZERO)),
        Err(e) => {
            tracing::debug!("Quote '{}' outside decimal range ({}), using f64", value, e);
            Some(Amount::Approximate(float))
        }
    }
}

/// Renders an amount with a fixed number of decimals, rounding half away from zero.
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(
        decimal_places.min(MAX_SCALE),
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.prec$}", rounded, prec = decimal_places as usize)
}

/// Multiplier for a whole-number tax percentage, e.g. `21` gives `1.21`.
fn tax_multiplier(tax_percent: u32) -> Decimal {
    Decimal::ONE + Decimal::from(tax_percent) / Decimal::ONE_HUNDRED
}

/// Formats quote text as a currency amount (`"1.234,56"` → `"1234.56"`).
///
/// Unparseable text yields [`UNKNOWN_VALUE`].
pub fn format_currency(value: &str, decimal_places: Option<u32>) -> String {
    let decimals = decimal_places.unwrap_or(DEFAULT_DECIMAL_PLACES);
    match parse_amount(value) {
        Some(amount) => amount.format(decimals),
        None => {
            tracing::debug!("Unparseable quote text: '{}'", value);
            UNKNOWN_VALUE.to_string()
        }
    }
}

/// Formats quote text as a currency amount with `tax_percent` applied on top.
pub fn format_currency_with_taxes(
    value: &str,
    decimal_places: Option<u32>,
    tax_percent: u32,
) -> String {
    let decimals = decimal_places.unwrap_or(DEFAULT_DECIMAL_PLACES);
    match parse_amount(value).and_then(|amount| amount.with_tax(tax_percent)) {
        Some(amount) => amount.format(decimals),
        None => {
            tracing::debug!("Unparseable quote text: '{}'", value);
            UNKNOWN_VALUE.to_string()
        }
    }
}

/// Currency formatter bound to the configured tax percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    tax_percent: u32,
}

impl CurrencyFormatter {
    pub fn new(tax_percent: u32) -> Self {
        Self { tax_percent }
    }

    pub fn tax_percent(&self) -> u32 {
        self.tax_percent
    }

    pub fn format(&self, value: &str, decimal_places: Option<u32>) -> String {
        format_currency(value, decimal_places)
    }

    pub fn format_with_taxes(&self, value: &str, decimal_places: Option<u32>) -> String {
        format_currency_with_taxes(value, decimal_places, self.tax_percent)
    }
}
