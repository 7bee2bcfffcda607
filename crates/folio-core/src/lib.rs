//! # folio-core: Pure Business Logic for Folio
//!
//! Invoice and quotation arithmetic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Form UI (browser, TypeScript)                   │   │
//! │  │   Company ──► Client ──► Line Items ──► Adjustments ──► Preview │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs bindings / JSON                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │ currency  │  │ document  │  │   │
//! │  │   │ LineItem  │  │  compute  │  │  format   │  │ Document  │  │   │
//! │  │   │  Totals   │  │           │  │ symbol_for│  │ recompute │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SUBSCRIBERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/preview (`folio` binary)                   │   │
//! │  │          config, logging, JSON in, text/JSON preview out        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Engine inputs and outputs (LineItem, FinancialAdjustments, Totals)
//! - [`totals`] - The totals engine
//! - [`currency`] - Currency registry and display formatting
//! - [`document`] - Invoice/quotation model that recomputes on every edit
//! - [`validation`] - Opt-in strict input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Permissive Inputs**: bad numbers read as zero, the engine never fails
//! 3. **Round Once**: floating point until display, then half-even to cents
//! 4. **Explicit Recompute**: every document mutation refreshes its totals
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{currency, Document, DocumentKind, DiscountMode};
//!
//! let mut invoice = Document::new(DocumentKind::Invoice);
//! invoice.set_unit_rate(0, 100.0).unwrap();
//! invoice.set_discount(10.0, DiscountMode::Percentage);
//! invoice.set_tax_rate(10.0);
//!
//! assert_eq!(invoice.totals().grand_total, 99.0);
//! assert_eq!(currency::format(invoice.totals().grand_total, "USD"), "$99.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod document;
pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{Document, DocumentKind, FormattedTotals, Party};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
