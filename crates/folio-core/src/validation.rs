//! # Validation Module
//!
//! Optional strict-mode checks for document inputs.
//!
//! ## Two Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Policies                                     │
//! │                                                                         │
//! │  Permissive (default, totals engine)                                   │
//! │  ├── "abc" → 0                                                         │
//! │  ├── discount > subtotal → negative total                              │
//! │  └── unknown currency → code shown as symbol                           │
//! │                                                                         │
//! │  Strict (THIS MODULE, opt-in)                                          │
//! │  ├── "abc" → NotANumber                                                │
//! │  ├── negative quantity / discount / shipping → MustBeNonNegative       │
//! │  ├── percentage discount or tax outside 0-100 → OutOfRange             │
//! │  └── unknown currency → UnknownCurrency                                │
//! │                                                                         │
//! │  Strict mode only reports. It never changes what the engine computes.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{validate_currency_code, validate_numeric};
//! use folio_core::NumericInput;
//!
//! assert!(validate_currency_code("usd").is_ok());
//! assert!(validate_numeric("quantity", &NumericInput::from("abc")).is_err());
//! ```

use crate::currency;
use crate::document::Document;
use crate::error::ValidationError;
use crate::types::{DiscountMode, FinancialAdjustments, LineItem, NumericInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Parses a field strictly.
///
/// Blank fields are `Required`; anything else that is not a finite number in
/// full is `NotANumber`.
pub fn validate_numeric(field: &str, input: &NumericInput) -> ValidationResult<f64> {
    if input.is_blank() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    input.parse_strict().ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
        value: match input {
            NumericInput::Text(text) => text.clone(),
            NumericInput::Other(json) => json.to_string(),
            other => format!("{:?}", other),
        },
    })
}

fn non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn percent(field: &str, value: f64) -> ValidationResult<f64> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(value)
}

/// Validates a currency code against the registry.
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    currency::find(code)
        .map(|_| ())
        .ok_or_else(|| ValidationError::UnknownCurrency(code.trim().to_string()))
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates one row.
///
/// ## Rules
/// - Quantity parses and is ≥ 0
/// - Unit rate parses (negative allowed for credits)
pub fn validate_line_item(index: usize, item: &LineItem) -> ValidationResult<()> {
    let quantity_field = format!("item {} quantity", index + 1);
    let quantity = validate_numeric(&quantity_field, &item.quantity)?;
    non_negative(&quantity_field, quantity)?;

    validate_numeric(&format!("item {} rate", index + 1), &item.unit_rate)?;
    Ok(())
}

/// Validates document-level adjustments.
///
/// Blank discount, shipping and tax fields are fine: they mean zero.
pub fn validate_adjustments(adjustments: &FinancialAdjustments) -> ValidationResult<()> {
    if !adjustments.discount_value.is_blank() {
        let discount = validate_numeric("discount", &adjustments.discount_value)?;
        non_negative("discount", discount)?;
        if adjustments.discount_mode == DiscountMode::Percentage {
            percent("discount", discount)?;
        }
    }

    if let Some(shipping) = adjustments.shipping_amount.as_ref().filter(|s| !s.is_blank()) {
        let shipping = validate_numeric("shipping", shipping)?;
        non_negative("shipping", shipping)?;
    }

    if !adjustments.tax_rate_percent.is_blank() {
        let tax = validate_numeric("tax rate", &adjustments.tax_rate_percent)?;
        percent("tax rate", tax)?;
    }

    Ok(())
}

/// Validates a whole document. The first problem found is returned.
pub fn validate_document(doc: &Document) -> ValidationResult<()> {
    validate_currency_code(&doc.currency_code)?;

    for (index, item) in doc.items().iter().enumerate() {
        validate_line_item(index, item)?;
    }

    validate_adjustments(&doc.effective_adjustments())
}

// =============================================================================
// Unit Tests
// =============================================================================
