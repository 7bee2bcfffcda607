//! # Document Model
//!
//! The invoice/quotation form state that the totals engine serves.
//!
//! ## Recompute After Every Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Operations                                  │
//! │                                                                         │
//! │  Form Action              Document Method          Side Effect          │
//! │  ───────────              ───────────────          ───────────          │
//! │                                                                         │
//! │  Click "Add Item" ───────► add_item() ──────────┐                      │
//! │  Edit qty / rate ────────► set_quantity() ──────┤                      │
//! │  Click remove ───────────► remove_item() ───────┤                      │
//! │  Edit discount ──────────► set_discount() ──────┼──► recompute()       │
//! │  Edit shipping ──────────► set_shipping() ──────┤     refreshes every  │
//! │  Edit tax ───────────────► set_tax_rate() ──────┤     line amount and  │
//! │  Load saved JSON ────────► from_json() ─────────┘     the totals       │
//! │                                                                         │
//! │  NOTE: totals are a projection. They are never read back from JSON.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::currency;
use crate::error::{CoreError, CoreResult};
use crate::types::{DiscountMode, FinancialAdjustments, LineItem, NumericInput, Totals};

/// Currency a fresh document starts in.
pub const DEFAULT_CURRENCY: &str = "USD";

// =============================================================================
// Document Kind
// =============================================================================

/// Invoice or quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Invoice,
    Quotation,
}

impl DocumentKind {
    /// Only invoices carry shipping into the tax base.
    #[inline]
    pub const fn includes_shipping(&self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }

    /// Prefix for generated document numbers.
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Quotation => "QUO",
        }
    }

    /// Heading used on previews.
    pub const fn title(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INVOICE",
            DocumentKind::Quotation => "QUOTATION",
        }
    }
}

// =============================================================================
// Party
// =============================================================================

/// Company or client details shown on the document header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-form address lines.
    pub address: Vec<String>,
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            ..Party::default()
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// An invoice or quotation under edit.
///
/// ## Invariants
/// - `totals` always equals `totals::compute(items, effective adjustments)`
/// - Every item's `line_amount` equals its `quantity × unit_rate`
/// - Quotations compute with shipping omitted, whatever `adjustments` holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Generated when a saved document carries none.
    #[serde(default = "Uuid::new_v4")]
    #[ts(as = "String")]
    pub id: Uuid,
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub number: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    /// Payment due date (invoice) or validity end (quotation).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub company: Party,
    #[serde(default)]
    pub client: Party,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    adjustments: FinancialAdjustments,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    /// Derived. Ignored on input.
    #[serde(default, skip_deserializing)]
    totals: Totals,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Document {
    /// Creates a document the way the form opens one: a single blank line
    /// item, zero adjustments, today's date.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::{Document, DocumentKind};
    ///
    /// let doc = Document::new(DocumentKind::Invoice);
    /// assert_eq!(doc.items().len(), 1);
    /// assert_eq!(doc.totals().grand_total, 0.0);
    /// assert!(doc.number.starts_with("INV-"));
    /// ```
    pub fn new(kind: DocumentKind) -> Self {
        let id = Uuid::new_v4();
        let mut adjustments = FinancialAdjustments::default();
        if kind.includes_shipping() {
            adjustments.shipping_amount = Some(NumericInput::default());
        }

        let mut doc = Document {
            number: format!("{}-{}", kind.number_prefix(), short_id(&id)),
            id,
            kind,
            issue_date: Local::now().date_naive(),
            due_date: None,
            company: Party::default(),
            client: Party::default(),
            currency_code: default_currency(),
            items: vec![LineItem::empty()],
            adjustments,
            notes: None,
            terms: None,
            totals: Totals::zero(),
        };
        doc.recompute();
        doc
    }

    /// Parses a saved document and recomputes everything derived.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.recompute();
        Ok(doc)
    }

    /// Serializes the document, totals included, as pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn adjustments(&self) -> &FinancialAdjustments {
        &self.adjustments
    }

    /// The derived totals, current as of the last mutation.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Adjustments as the engine sees them for this kind of document.
    pub fn effective_adjustments(&self) -> FinancialAdjustments {
        let mut adjustments = self.adjustments.clone();
        if !self.kind.includes_shipping() {
            adjustments.shipping_amount = None;
        }
        adjustments
    }

    /// Display strings for the summary block, in the document currency.
    pub fn formatted_totals(&self) -> FormattedTotals {
        let code = self.currency_code.as_str();
        FormattedTotals {
            subtotal: currency::format(self.totals.subtotal, code),
            discount: currency::format(self.totals.discount_amount, code),
            shipping: self
                .kind
                .includes_shipping()
                .then(|| currency::format(self.totals.shipping_amount, code)),
            tax: currency::format(self.totals.tax_amount, code),
            grand_total: currency::format(self.totals.grand_total, code),
        }
    }

    // -------------------------------------------------------------------------
    // Line item mutations
    // -------------------------------------------------------------------------

    /// Appends a line item and returns its index.
    pub fn add_item(&mut self, item: LineItem) -> usize {
        self.items.push(item);
        self.recompute();
        self.items.len() - 1
    }

    /// Appends a blank row.
    pub fn add_empty_item(&mut self) -> usize {
        self.add_item(LineItem::empty())
    }

    /// Removes and returns the item at `index`.
    ///
    /// Removing the last remaining row is allowed; an empty document totals
    /// to its shipping plus tax.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Applies an arbitrary edit to one row, then recomputes.
    pub fn update_item<F>(&mut self, index: usize, edit: F) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem),
    {
        self.check_index(index)?;
        edit(&mut self.items[index]);
        self.recompute();
        Ok(())
    }

    pub fn set_description(&mut self, index: usize, description: impl Into<String>) -> CoreResult<()> {
        let description = description.into();
        self.update_item(index, |item| item.description = description)
    }

    pub fn set_quantity(&mut self, index: usize, quantity: impl Into<NumericInput>) -> CoreResult<()> {
        let quantity = quantity.into();
        self.update_item(index, |item| item.quantity = quantity)
    }

    pub fn set_unit_rate(&mut self, index: usize, unit_rate: impl Into<NumericInput>) -> CoreResult<()> {
        let unit_rate = unit_rate.into();
        self.update_item(index, |item| item.unit_rate = unit_rate)
    }

    // -------------------------------------------------------------------------
    // Adjustment mutations
    // -------------------------------------------------------------------------

    pub fn set_discount(&mut self, value: impl Into<NumericInput>, mode: DiscountMode) {
        self.adjustments.discount_value = value.into();
        self.adjustments.discount_mode = mode;
        self.recompute();
    }

    pub fn set_discount_mode(&mut self, mode: DiscountMode) {
        self.adjustments.discount_mode = mode;
        self.recompute();
    }

    /// Sets shipping. Stored for quotations too, but only invoices use it.
    pub fn set_shipping(&mut self, amount: impl Into<NumericInput>) {
        self.adjustments.shipping_amount = Some(amount.into());
        self.recompute();
    }

    pub fn set_tax_rate(&mut self, percent: impl Into<NumericInput>) {
        self.adjustments.tax_rate_percent = percent.into();
        self.recompute();
    }

    /// Replaces all adjustments at once.
    pub fn set_adjustments(&mut self, adjustments: FinancialAdjustments) {
        self.adjustments = adjustments;
        self.recompute();
    }

    /// Changes the display currency. Amounts are not converted.
    pub fn set_currency(&mut self, code: impl Into<String>) {
        self.currency_code = code.into().trim().to_ascii_uppercase();
    }

    /// Switches between invoice and quotation.
    pub fn set_kind(&mut self, kind: DocumentKind) {
        self.kind = kind;
        self.recompute();
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Refreshes every line amount and the totals from current inputs.
    ///
    /// All mutators call this. Callers that edit items through other means
    /// (e.g. after deserializing) must call it themselves.
    pub fn recompute(&mut self) {
        for item in &mut self.items {
            item.refresh_amount();
        }
        self.totals = crate::totals::compute(&self.items, &self.effective_adjustments());
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(CoreError::LineItemNotFound {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

/// First eight hex digits of a UUID, upper-cased.
fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_ascii_uppercase()
}

// =============================================================================
// Formatted Totals
// =============================================================================

/// Totals rendered as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount: String,
    /// `None` for quotations.
    pub shipping: Option<String>,
    pub tax: String,
    pub grand_total: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
