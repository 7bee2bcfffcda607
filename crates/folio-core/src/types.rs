//! # Domain Types
//!
//! The input and output shapes of the totals engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    LineItem     │   │ FinancialAdjustments │   │     Totals      │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  description    │   │  discount_value      │   │  subtotal       │  │
//! │  │  quantity       │   │  discount_mode       │   │  discount_amount│  │
//! │  │  unit_rate      │   │  shipping_amount?    │   │  tax_base       │  │
//! │  │  line_amount    │   │  tax_rate_percent    │   │  grand_total    │  │
//! │  └────────┬────────┘   └──────────┬───────────┘   └────────▲────────┘  │
//! │           │                       │                        │           │
//! │           └───────────────────────┴──── totals::compute ───┘           │
//! │                                                                         │
//! │  Every user-entered number is a NumericInput: number, text, or null.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Not Integer Cents?
//! The form layer works in floating point and the engine must reproduce its
//! results exactly. Rounding happens once, at display time, in
//! [`crate::currency`].

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Numeric Input
// =============================================================================

/// A number as typed into a form field.
///
/// Form state arrives as JSON where a field may hold a number, the raw text
/// of an input box, or nothing at all. The engine reads every such field
/// through [`NumericInput::value`], which never fails.
///
/// ## Examples
/// ```rust
/// use folio_core::NumericInput;
///
/// assert_eq!(NumericInput::from(2.5).value(), 2.5);
/// assert_eq!(NumericInput::from("12.5kg").value(), 12.5);
/// assert_eq!(NumericInput::from("abc").value(), 0.0);
/// assert_eq!(NumericInput::Missing.value(), 0.0);
/// assert_eq!(NumericInput::Other(serde_json::json!(true)).value(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number.
    Number(f64),
    /// The raw text of an input box.
    Text(String),
    /// `null` or an absent field.
    Missing,
    /// Any other JSON (`true`, arrays, objects). Reads as zero.
    Other(serde_json::Value),
}

impl NumericInput {
    /// Safe-parse-or-zero.
    ///
    /// ## Rules
    /// - Finite numbers pass through, non-finite numbers become `0`
    /// - Text uses its longest leading decimal prefix (`"3 pcs"` → `3`)
    /// - Text without a numeric prefix becomes `0`
    /// - Missing becomes `0`
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(n) => finite_or_zero(*n),
            NumericInput::Text(text) => parse_leading_number(text),
            NumericInput::Missing | NumericInput::Other(_) => 0.0,
        }
    }

    /// Parses the whole value as a finite number, or returns `None`.
    ///
    /// Used by strict-mode validation only; `"12kg"` is rejected here even
    /// though [`NumericInput::value`] reads it as `12`.
    pub fn parse_strict(&self) -> Option<f64> {
        match self {
            NumericInput::Number(n) => Some(*n).filter(|n| n.is_finite()),
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
            NumericInput::Missing | NumericInput::Other(_) => None,
        }
    }

    /// True for `null`, absent, or blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            NumericInput::Missing => true,
            NumericInput::Text(text) => text.trim().is_empty(),
            NumericInput::Number(_) | NumericInput::Other(_) => false,
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Number(0.0)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

/// Non-finite values (overflowed products, NaN) read as zero.
#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Tolerant reader for derived amounts: anything that is not a finite
/// number (including the `null` serde_json writes for infinities) is `0`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(finite_or_zero).unwrap_or(0.0))
}

/// Reads the longest leading decimal number from `text`.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Anything after the number is ignored.
fn parse_leading_number(text: &str) -> f64 {
    let s = text.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let frac_digits = j - (end + 1);
        if digits + frac_digits > 0 {
            end = j;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        // "2e" is the number 2 followed by junk
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of an invoice or quotation.
///
/// `line_amount` is a projection of `quantity × unit_rate`. It is kept on
/// the row so previews can show it, but the engine never trusts it; see
/// [`crate::totals::compute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What is being billed.
    #[serde(default)]
    pub description: String,

    /// Number of units. Conceptually non-negative.
    #[serde(default)]
    pub quantity: NumericInput,

    /// Price per unit. May be negative for credits.
    #[serde(default, alias = "rate")]
    pub unit_rate: NumericInput,

    /// Derived: `quantity × unit_rate`. Ignored on input.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub line_amount: f64,
}

impl LineItem {
    /// Creates a line item with its amount already derived.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::LineItem;
    ///
    /// let item = LineItem::new("Design work", 3.0, 120.0);
    /// assert_eq!(item.line_amount, 360.0);
    /// ```
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<NumericInput>,
        unit_rate: impl Into<NumericInput>,
    ) -> Self {
        let mut item = LineItem {
            description: description.into(),
            quantity: quantity.into(),
            unit_rate: unit_rate.into(),
            line_amount: 0.0,
        };
        item.refresh_amount();
        item
    }

    /// The blank row a new document starts with: quantity 1, rate 0.
    pub fn empty() -> Self {
        LineItem::new("", 1.0, 0.0)
    }

    /// Fresh `quantity × unit_rate`, with both sides safe-parsed.
    ///
    /// A product that overflows `f64` reads as zero, like any other
    /// unusable input.
    #[inline]
    pub fn amount(&self) -> f64 {
        finite_or_zero(self.quantity.value() * self.unit_rate.value())
    }

    /// Re-derives `line_amount` after an edit.
    pub fn refresh_amount(&mut self) {
        self.line_amount = self.amount();
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::empty()
    }
}

// =============================================================================
// Discount Mode
// =============================================================================

/// How `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
    /// Percent of the subtotal (10 = 10%).
    #[default]
    Percentage,
    /// Absolute amount in the document currency.
    Fixed,
}

// =============================================================================
// Financial Adjustments
// =============================================================================

/// Document-level adjustments applied after the subtotal.
///
/// `shipping_amount` is optional: quotations carry no shipping, invoices do.
/// `None` is read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAdjustments {
    #[serde(default, alias = "discount")]
    pub discount_value: NumericInput,

    #[serde(default, alias = "discountType")]
    pub discount_mode: DiscountMode,

    #[serde(default, alias = "shipping", skip_serializing_if = "Option::is_none")]
    pub shipping_amount: Option<NumericInput>,

    #[serde(default, alias = "taxRate")]
    pub tax_rate_percent: NumericInput,
}

impl FinancialAdjustments {
    /// Shipping as a number, zero when omitted.
    #[inline]
    pub fn shipping(&self) -> f64 {
        self.shipping_amount
            .as_ref()
            .map(NumericInput::value)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived figures for a document. Never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Σ quantity × unit_rate.
    pub subtotal: f64,
    /// Discount in currency, after resolving the discount mode.
    pub discount_amount: f64,
    /// Shipping added before tax (zero for quotations).
    pub shipping_amount: f64,
    /// subtotal − discount + shipping.
    pub tax_base: f64,
    /// tax_base × rate / 100.
    pub tax_amount: f64,
    /// tax_base + tax_amount.
    pub grand_total: f64,
}

impl Totals {
    /// All figures zero.
    pub const fn zero() -> Self {
        Totals {
            subtotal: 0.0,
            discount_amount: 0.0,
            shipping_amount: 0.0,
            tax_base: 0.0,
            tax_amount: 0.0,
            grand_total: 0.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_input_values() {
        assert_eq!(NumericInput::from(4.0).value(), 4.0);
        assert_eq!(NumericInput::from(" 7 ").value(), 7.0);
        assert_eq!(NumericInput::from("-2.5").value(), -2.5);
        assert_eq!(NumericInput::from(".5").value(), 0.5);
        assert_eq!(NumericInput::from("1e3").value(), 1000.0);
        assert_eq!(NumericInput::Missing.value(), 0.0);
    }

    #[test]
    fn test_numeric_input_garbage_is_zero() {
        assert_eq!(NumericInput::from("abc").value(), 0.0);
        assert_eq!(NumericInput::from("").value(), 0.0);
        assert_eq!(NumericInput::from("-").value(), 0.0);
        assert_eq!(NumericInput::from(".").value(), 0.0);
        assert_eq!(NumericInput::from(f64::NAN).value(), 0.0);
        assert_eq!(NumericInput::from(f64::INFINITY).value(), 0.0);
        assert_eq!(NumericInput::from("1e999").value(), 0.0);
    }

    #[test]
    fn test_numeric_input_leading_prefix() {
        assert_eq!(NumericInput::from("12.5kg").value(), 12.5);
        assert_eq!(NumericInput::from("3 pcs").value(), 3.0);
        assert_eq!(NumericInput::from("2e").value(), 2.0);
        assert_eq!(NumericInput::from("5.").value(), 5.0);
    }

    #[test]
    fn test_numeric_input_accepts_any_json() {
        let parsed: Vec<NumericInput> =
            serde_json::from_str(r#"[true, [1, 2], {"n": 3}]"#).unwrap();
        assert!(parsed.iter().all(|n| matches!(n, NumericInput::Other(_))));
        assert!(parsed.iter().all(|n| n.value() == 0.0));
        assert!(parsed.iter().all(|n| n.parse_strict().is_none()));
        assert!(!parsed[0].is_blank());

        let item: LineItem =
            serde_json::from_str(r#"{"quantity": true, "unitRate": 5}"#).unwrap();
        assert_eq!(item.amount(), 0.0);
    }

    #[test]
    fn test_overflowing_amount_reads_as_zero() {
        assert_eq!(LineItem::new("big", 1e200, 1e200).amount(), 0.0);
        assert_eq!(LineItem::new("big", 1e200, -1e200).line_amount, 0.0);
        assert_eq!(LineItem::new("ok", 1e150, 1e150).amount(), 1e300);
    }

    #[test]
    fn test_line_amount_null_is_tolerated() {
        let item: LineItem =
            serde_json::from_str(r#"{"quantity": 2, "unitRate": 5, "lineAmount": null}"#).unwrap();
        assert_eq!(item.line_amount, 0.0);
        let item: LineItem =
            serde_json::from_str(r#"{"quantity": 2, "unitRate": 5, "lineAmount": "x"}"#).unwrap();
        assert_eq!(item.line_amount, 0.0);
    }

    #[test]
    fn test_numeric_input_strict() {
        assert_eq!(NumericInput::from("12.5").parse_strict(), Some(12.5));
        assert_eq!(NumericInput::from("12.5kg").parse_strict(), None);
        assert_eq!(NumericInput::from("NaN").parse_strict(), None);
        assert_eq!(NumericInput::Missing.parse_strict(), None);
    }

    #[test]
    fn test_numeric_input_from_json() {
        let parsed: Vec<NumericInput> = serde_json::from_str(r#"[1, 2.5, "3", null]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                NumericInput::Number(1.0),
                NumericInput::Number(2.5),
                NumericInput::Text("3".to_string()),
                NumericInput::Missing,
            ]
        );
    }

    #[test]
    fn test_line_item_amount() {
        let item = LineItem::new("Widget", 3.0, 2.5);
        assert_eq!(item.line_amount, 7.5);

        let credit = LineItem::new("Refund", 1.0, -40.0);
        assert_eq!(credit.amount(), -40.0);
    }

    #[test]
    fn test_line_item_accepts_rate_alias() {
        let item: LineItem =
            serde_json::from_str(r#"{"description":"Hours","quantity":"2","rate":50}"#).unwrap();
        assert_eq!(item.amount(), 100.0);
        // Stored amount is whatever the payload said until refreshed
        assert_eq!(item.line_amount, 0.0);
    }

    #[test]
    fn test_empty_line_item() {
        let item = LineItem::empty();
        assert_eq!(item.quantity.value(), 1.0);
        assert_eq!(item.line_amount, 0.0);
    }

    #[test]
    fn test_discount_mode_serde() {
        assert_eq!(serde_json::to_string(&DiscountMode::Fixed).unwrap(), "\"fixed\"");
        let mode: DiscountMode = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(mode, DiscountMode::Percentage);
    }

    #[test]
    fn test_adjustments_shipping_defaults_to_zero() {
        let adj = FinancialAdjustments::default();
        assert_eq!(adj.shipping(), 0.0);
        assert_eq!(adj.discount_mode, DiscountMode::Percentage);
    }
}
