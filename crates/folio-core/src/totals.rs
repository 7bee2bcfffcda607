//! # Totals Engine
//!
//! Derives subtotal, discount, tax and grand total from a document's line
//! items and adjustments.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Σ quantity × unit_rate ─────────────────────────────► subtotal        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Percentage? subtotal × value / 100 : value ─────────► discount        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal − discount + shipping ─────────────────────► tax base        │
//! │       │                    ▲                                            │
//! │       │                    └── invoices only, zero for quotations      │
//! │       ▼                                                                 │
//! │  tax base × rate / 100 ──────────────────────────────► tax             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax base + tax ─────────────────────────────────────► grand total     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Numeric Semantics
//! - Plain `f64` throughout, no intermediate rounding
//! - Rounding happens only at display time ([`crate::currency::format`])
//! - The discount is NOT clamped: a discount above the subtotal yields a
//!   negative tax base and a negative total
//! - Invalid inputs read as zero, so the result never contains NaN
//! - A term that overflows `f64` also reads as zero, so extreme inputs
//!   cannot produce `inf − inf` or `0 × inf` further down
//!
//! ## Example
//! ```rust
//! use folio_core::{totals, DiscountMode, FinancialAdjustments, LineItem, NumericInput};
//!
//! let items = vec![LineItem::new("Consulting", 1.0, 100.0)];
//! let adjustments = FinancialAdjustments {
//!     discount_value: NumericInput::from(10.0),
//!     discount_mode: DiscountMode::Percentage,
//!     shipping_amount: Some(NumericInput::from(20.0)),
//!     tax_rate_percent: NumericInput::from(10.0),
//! };
//!
//! let t = totals::compute(&items, &adjustments);
//! assert_eq!(t.tax_base, 110.0);
//! assert_eq!(t.tax_amount, 11.0);
//! assert_eq!(t.grand_total, 121.0);
//! ```

use crate::types::{finite_or_zero, DiscountMode, FinancialAdjustments, LineItem, Totals};

/// Computes the totals for a set of line items.
///
/// Pure: the same inputs always give bit-identical outputs. Each item's
/// amount is recomputed from `quantity × unit_rate`; the stored
/// `line_amount` is ignored so a stale row cannot leak into the total.
///
/// Shipping joins the tax base when `adjustments.shipping_amount` is set
/// (invoice style) and is zero when it is `None` (quotation style).
pub fn compute(items: &[LineItem], adjustments: &FinancialAdjustments) -> Totals {
    let subtotal = subtotal(items);
    let discount_amount = discount_amount(
        subtotal,
        adjustments.discount_value.value(),
        adjustments.discount_mode,
    );
    let shipping_amount = adjustments.shipping();

    let tax_base = finite_or_zero(subtotal - discount_amount + shipping_amount);
    let tax_amount = finite_or_zero(tax_base * adjustments.tax_rate_percent.value() / 100.0);
    let grand_total = finite_or_zero(tax_base + tax_amount);

    Totals {
        subtotal,
        discount_amount,
        shipping_amount,
        tax_base,
        tax_amount,
        grand_total,
    }
}

/// Σ quantity × unit_rate, in item order.
pub fn subtotal(items: &[LineItem]) -> f64 {
    finite_or_zero(items.iter().map(LineItem::amount).sum())
}

/// Resolves a discount value against the subtotal.
///
/// ## Example
/// ```rust
/// use folio_core::{totals::discount_amount, DiscountMode};
///
/// assert_eq!(discount_amount(200.0, 10.0, DiscountMode::Percentage), 20.0);
/// assert_eq!(discount_amount(200.0, 10.0, DiscountMode::Fixed), 10.0);
/// ```
pub fn discount_amount(subtotal: f64, value: f64, mode: DiscountMode) -> f64 {
    finite_or_zero(match mode {
        DiscountMode::Percentage => subtotal * value / 100.0,
        DiscountMode::Fixed => value,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericInput;

    fn adjustments(discount: f64, mode: DiscountMode, shipping: Option<f64>, tax: f64) -> FinancialAdjustments {
        FinancialAdjustments {
            discount_value: discount.into(),
            discount_mode: mode,
            shipping_amount: shipping.map(NumericInput::from),
            tax_rate_percent: tax.into(),
        }
    }

    #[test]
    fn test_tax_after_discount() {
        let items = vec![LineItem::new("Service", 1.0, 100.0)];
        let t = compute(&items, &adjustments(10.0, DiscountMode::Percentage, None, 10.0));

        assert_eq!(t.subtotal, 100.0);
        assert_eq!(t.discount_amount, 10.0);
        assert_eq!(t.tax_base, 90.0);
        assert_eq!(t.tax_amount, 9.0);
        assert_eq!(t.grand_total, 99.0);
    }

    #[test]
    fn test_shipping_before_tax() {
        let items = vec![LineItem::new("Service", 1.0, 100.0)];
        let t = compute(&items, &adjustments(10.0, DiscountMode::Percentage, Some(20.0), 10.0));

        assert_eq!(t.shipping_amount, 20.0);
        assert_eq!(t.tax_base, 110.0);
        assert_eq!(t.tax_amount, 11.0);
        assert_eq!(t.grand_total, 121.0);
    }

    #[test]
    fn test_discount_modes_agree_on_hundred() {
        let items = vec![LineItem::new("Service", 1.0, 100.0)];
        let pct = compute(&items, &adjustments(10.0, DiscountMode::Percentage, None, 0.0));
        let fixed = compute(&items, &adjustments(10.0, DiscountMode::Fixed, None, 0.0));

        assert_eq!(pct.discount_amount, 10.0);
        assert_eq!(pct, fixed);
    }

    #[test]
    fn test_zero_items() {
        let t = compute(&[], &FinancialAdjustments::default());
        assert_eq!(t, Totals::zero());

        let t = compute(&[], &adjustments(0.0, DiscountMode::Percentage, Some(15.0), 0.0));
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.grand_total, 15.0);

        let t = compute(&[], &adjustments(0.0, DiscountMode::Percentage, Some(15.0), 20.0));
        assert_eq!(t.grand_total, 18.0);
    }

    #[test]
    fn test_non_numeric_item_contributes_zero() {
        let items = vec![
            LineItem::new("Bad", "abc", 50.0),
            LineItem::new("Good", 2.0, 25.0),
            LineItem::new("Missing", NumericInput::Missing, NumericInput::Missing),
        ];
        let t = compute(&items, &adjustments(0.0, DiscountMode::Fixed, None, 5.0));

        assert_eq!(t.subtotal, 50.0);
        assert!(!t.grand_total.is_nan());
        assert_eq!(t.grand_total, 52.5);
    }

    #[test]
    fn test_non_numeric_adjustments_read_as_zero() {
        let items = vec![LineItem::new("Service", 1.0, 100.0)];
        let adj = FinancialAdjustments {
            discount_value: "ten".into(),
            discount_mode: DiscountMode::Percentage,
            shipping_amount: Some("free".into()),
            tax_rate_percent: NumericInput::Missing,
        };
        let t = compute(&items, &adj);

        assert_eq!(t.grand_total, 100.0);
    }

    #[test]
    fn test_discount_is_not_clamped() {
        let items = vec![LineItem::new("Service", 1.0, 50.0)];
        let t = compute(&items, &adjustments(80.0, DiscountMode::Fixed, None, 10.0));

        assert_eq!(t.discount_amount, 80.0);
        assert_eq!(t.tax_base, -30.0);
        assert_eq!(t.tax_amount, -3.0);
        assert_eq!(t.grand_total, -33.0);
    }

    #[test]
    fn test_credit_lines_reduce_subtotal() {
        let items = vec![
            LineItem::new("Hosting", 12.0, 10.0),
            LineItem::new("Credit", 1.0, -20.0),
        ];
        assert_eq!(subtotal(&items), 100.0);
    }

    #[test]
    fn test_stale_line_amount_is_ignored() {
        let mut item = LineItem::new("Service", 2.0, 10.0);
        item.line_amount = 999.0;
        let t = compute(&[item], &FinancialAdjustments::default());
        assert_eq!(t.subtotal, 20.0);
    }

    #[test]
    fn test_overflowing_inputs_never_yield_nan() {
        let items = vec![LineItem::new("Huge", 1e200, 1e200)];
        let t = compute(&items, &adjustments(100.0, DiscountMode::Percentage, Some(0.0), 10.0));
        assert_eq!(t, Totals::zero());

        let items = vec![
            LineItem::new("Up", 1e154, 1e154),
            LineItem::new("Up again", 1e154, 1e154),
            LineItem::new("Down", 1e154, -1e154),
        ];
        let t = compute(&items, &adjustments(0.0, DiscountMode::Fixed, None, 10.0));
        for value in [t.subtotal, t.discount_amount, t.tax_base, t.tax_amount, t.grand_total] {
            assert!(value.is_finite(), "{t:?}");
        }

        let items = vec![LineItem::new("Big", 1.0, f64::MAX)];
        let t = compute(&items, &adjustments(f64::MAX, DiscountMode::Percentage, Some(f64::MAX), 100.0));
        for value in [t.subtotal, t.discount_amount, t.tax_base, t.tax_amount, t.grand_total] {
            assert!(value.is_finite(), "{t:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let items = vec![
            LineItem::new("A", 3.0, 19.99),
            LineItem::new("B", "0.5", 7.3),
        ];
        let adj = adjustments(12.5, DiscountMode::Percentage, Some(4.95), 8.25);

        let first = compute(&items, &adj);
        let second = compute(&items, &adj);
        assert_eq!(first.grand_total.to_bits(), second.grand_total.to_bits());
        assert_eq!(first, second);
    }
}
