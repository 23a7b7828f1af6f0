//! # Formatting
//!
//! Quote formatting helpers for the rates API: currency text normalization,
//! taxed amounts, the Buenos Aires timestamp and the annual evolution report.

pub mod currency;
pub mod datetime;
pub mod evolution;

pub use currency::{
    format_currency, format_currency_with_taxes, parse_amount, Amount, CurrencyFormatter,
    DEFAULT_DECIMAL_PLACES, UNKNOWN_VALUE,
};
pub use datetime::{format_date_time, get_date_time, now_in_buenos_aires};
pub use evolution::{evolution, evolution_at, evolution_with_taxes, evolution_with_taxes_at};
