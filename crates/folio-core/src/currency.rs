//! # Currency Module
//!
//! Currency registry and display formatting.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  totals::compute ──► f64 (unrounded) ──► format() ──► "$1,234.50"      │
//! │                                             │                           │
//! │                                             └── × 100, round half even  │
//! │                                                 → integer minor units   │
//! │                                                                         │
//! │  The engine NEVER rounds. Display rounds exactly once, here.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Quirk
//! Every currency is shown with 2 decimals, zero-decimal currencies such as
//! JPY included (`¥500.00`). Existing documents already render this way.
//!
//! ## Usage
//! ```rust
//! use folio_core::currency;
//!
//! assert_eq!(currency::format(1234.5, "USD"), "$1,234.50");
//! assert_eq!(currency::symbol_for("EUR"), "€");
//! assert_eq!(currency::symbol_for("XYZ"), "XYZ");
//! ```

use serde::Serialize;

// =============================================================================
// Registry
// =============================================================================

/// A currency the document form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol placed before the amount.
    pub symbol: &'static str,
    /// Human-readable name for pickers.
    pub name: &'static str,
}

/// Digits after the decimal point for every currency.
pub const MINOR_DIGITS: u32 = 2;

const MINOR_FACTOR: u64 = 10u64.pow(MINOR_DIGITS);

/// Built-in registry, in picker order.
const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
    Currency { code: "CAD", symbol: "CA$", name: "Canadian Dollar" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "CNY", symbol: "CN¥", name: "Chinese Yuan" },
    Currency { code: "CHF", symbol: "CHF", name: "Swiss Franc" },
    Currency { code: "BDT", symbol: "৳", name: "Bangladeshi Taka" },
    Currency { code: "PKR", symbol: "Rs", name: "Pakistani Rupee" },
    Currency { code: "AED", symbol: "AED", name: "UAE Dirham" },
    Currency { code: "SAR", symbol: "SAR", name: "Saudi Riyal" },
    Currency { code: "SGD", symbol: "S$", name: "Singapore Dollar" },
    Currency { code: "NZD", symbol: "NZ$", name: "New Zealand Dollar" },
    Currency { code: "ZAR", symbol: "R", name: "South African Rand" },
    Currency { code: "BRL", symbol: "R$", name: "Brazilian Real" },
    Currency { code: "MXN", symbol: "MX$", name: "Mexican Peso" },
];

/// All registered currencies, in picker order.
pub fn all() -> &'static [Currency] {
    CURRENCIES
}

/// Looks up a currency by code. Case-insensitive, surrounding whitespace
/// ignored.
pub fn find(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Returns the display symbol for a currency code.
///
/// Unknown codes are echoed back (trimmed) instead of failing.
pub fn symbol_for(code: &str) -> String {
    match find(code) {
        Some(currency) => currency.symbol.to_string(),
        None => code.trim().to_string(),
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Converts an unrounded amount to integer minor units (cents).
///
/// Rounds half to even, so `0.125` → 12 and `0.375` → 38. Non-finite
/// amounts become 0; out-of-range amounts saturate.
pub fn to_minor_units(amount: f64) -> i64 {
    if !amount.is_finite() {
        return 0;
    }
    (amount * MINOR_FACTOR as f64).round_ties_even() as i64
}

/// Formats an amount for display in the given currency.
///
/// ## Examples
/// ```rust
/// use folio_core::currency::format;
///
/// assert_eq!(format(1234.5, "USD"), "$1,234.50");
/// assert_eq!(format(-99.999, "GBP"), "-£100.00");
/// assert_eq!(format(12.0, "CHF"), "CHF 12.00");
/// assert_eq!(format(1234.5, "XYZ"), "XYZ 1,234.50");
/// ```
pub fn format(amount: f64, code: &str) -> String {
    format_minor_units(to_minor_units(amount), code)
}

/// Formats an integer amount of minor units (cents) for display.
pub fn format_minor_units(minor: i64, code: &str) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let number = format_number(abs);

    let (symbol, known) = match find(code) {
        Some(currency) => (currency.symbol, true),
        None => (code.trim(), false),
    };
    // Echoed codes and letter symbols ("CHF", "Rs") need a gap before digits
    let letter_symbol = symbol.chars().last().is_some_and(char::is_alphabetic);
    let gap = if !symbol.is_empty() && (!known || letter_symbol) {
        " "
    } else {
        ""
    };

    format!("{sign}{symbol}{gap}{number}")
}

/// Minor units → grouped whole part plus `MINOR_DIGITS` fraction digits.
fn format_number(minor: u64) -> String {
    let whole = group_thousands(minor / MINOR_FACTOR);
    if MINOR_DIGITS == 0 {
        return whole;
    }
    format!(
        "{whole}.{frac:0width$}",
        frac = minor % MINOR_FACTOR,
        width = MINOR_DIGITS as usize
    )
}

/// 1234567 → "1,234,567".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
