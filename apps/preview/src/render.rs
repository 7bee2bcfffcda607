//! # Preview Rendering
//!
//! Turns a recomputed [`Document`] into stdout output. Totals are read,
//! never computed here.

use std::fmt::Write;

use folio_core::{currency, DiscountMode, Document, DocumentKind, FormattedTotals, Party, Totals};
use serde::Serialize;

use crate::error::AppResult;

const WIDTH: usize = 72;
const DESCRIPTION_WIDTH: usize = 30;

/// JSON output: the totals plus enough context to identify the document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport<'a> {
    pub id: String,
    pub number: &'a str,
    pub kind: DocumentKind,
    pub currency_code: &'a str,
    pub totals: &'a Totals,
    pub formatted: FormattedTotals,
}

pub fn render_json(doc: &Document) -> AppResult<String> {
    let report = TotalsReport {
        id: doc.id.to_string(),
        number: &doc.number,
        kind: doc.kind,
        currency_code: &doc.currency_code,
        totals: doc.totals(),
        formatted: doc.formatted_totals(),
    };
    Ok(serde_json::to_string_pretty(&report).map_err(folio_core::CoreError::from)?)
}

/// Plain-text preview laid out like the printed document.
pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();
    let code = doc.currency_code.as_str();
    let rule = "-".repeat(WIDTH);

    // Writing into a String cannot fail
    let _ = writeln!(out, "{} {}", doc.kind.title(), doc.number);
    let _ = write!(out, "Issued: {}", doc.issue_date);
    if let Some(due) = doc.due_date {
        let label = match doc.kind {
            DocumentKind::Invoice => "Due",
            DocumentKind::Quotation => "Valid until",
        };
        let _ = write!(out, "    {}: {}", label, due);
    }
    out.push('\n');

    write_party(&mut out, "From", &doc.company);
    write_party(&mut out, "Bill To", &doc.client);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<dw$} {:>8} {:>14} {:>16}",
        "Description",
        "Qty",
        "Rate",
        "Amount",
        dw = DESCRIPTION_WIDTH
    );
    let _ = writeln!(out, "{rule}");

    for item in doc.items() {
        let _ = writeln!(
            out,
            "{:<dw$} {:>8} {:>14} {:>16}",
            truncate(&item.description, DESCRIPTION_WIDTH),
            trim_number(item.quantity.value()),
            currency::format(item.unit_rate.value(), code),
            currency::format(item.line_amount, code),
            dw = DESCRIPTION_WIDTH
        );
    }
    let _ = writeln!(out, "{rule}");

    let totals = doc.totals();
    let adjustments = doc.adjustments();

    summary_line(&mut out, "Subtotal", &currency::format(totals.subtotal, code));

    if totals.discount_amount != 0.0 {
        let label = match adjustments.discount_mode {
            DiscountMode::Percentage => format!(
                "Discount ({}%)",
                trim_number(adjustments.discount_value.value())
            ),
            DiscountMode::Fixed => "Discount".to_string(),
        };
        summary_line(&mut out, &label, &currency::format(-totals.discount_amount, code));
    }

    if doc.kind.includes_shipping() {
        summary_line(&mut out, "Shipping", &currency::format(totals.shipping_amount, code));
    }

    let tax_label = format!("Tax ({}%)", trim_number(adjustments.tax_rate_percent.value()));
    summary_line(&mut out, &tax_label, &currency::format(totals.tax_amount, code));
    summary_line(&mut out, "Total", &currency::format(totals.grand_total, code));

    if let Some(notes) = doc.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "\nNotes:\n{}", notes.trim());
    }
    if let Some(terms) = doc.terms.as_deref().filter(|t| !t.trim().is_empty()) {
        let _ = writeln!(out, "\nTerms:\n{}", terms.trim());
    }

    out
}

fn write_party(out: &mut String, label: &str, party: &Party) {
    if party.name.trim().is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}: {}", label, party.name.trim());
    for line in &party.address {
        let _ = writeln!(out, "  {}", line);
    }
    if let Some(email) = &party.email {
        let _ = writeln!(out, "  {}", email);
    }
    if let Some(phone) = &party.phone {
        let _ = writeln!(out, "  {}", phone);
    }
}

fn summary_line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:>w$} {:>16}", label, value, w = WIDTH - 17);
}

/// `2.0` → "2", `2.5` → "2.5".
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::LineItem;

    fn sample_invoice() -> Document {
        let mut doc = Document::new(DocumentKind::Invoice);
        doc.number = "INV-0042".to_string();
        doc.company = Party::named("Acme Studio");
        doc.client = Party::named("Globex");
        doc.set_description(0, "Landing page design").unwrap();
        doc.set_unit_rate(0, 100.0).unwrap();
        doc.add_item(LineItem::new("Hosting", 2.0, 12.5));
        doc.set_discount(10.0, DiscountMode::Percentage);
        doc.set_shipping(20.0);
        doc.set_tax_rate(10.0);
        doc.notes = Some("Thanks for your business".to_string());
        doc
    }

    #[test]
    fn test_render_text_contains_totals() {
        let text = render_text(&sample_invoice());

        assert!(text.starts_with("INVOICE INV-0042\n"));
        assert!(text.contains("From: Acme Studio"));
        assert!(text.contains("Bill To: Globex"));
        assert!(text.contains("Landing page design"));
        assert!(text.contains("$25.00"));
        assert!(text.contains("Discount (10%)"));
        assert!(text.contains("-$12.50"));
        assert!(text.contains("Shipping"));
        assert!(text.contains("Tax (10%)"));
        // 125 - 12.5 + 20 = 132.5, + 13.25 tax
        assert!(text.contains("$145.75"));
        assert!(text.contains("Notes:\nThanks for your business"));
    }

    #[test]
    fn test_quotation_has_no_shipping_line() {
        let mut doc = sample_invoice();
        doc.set_kind(DocumentKind::Quotation);
        let text = render_text(&doc);

        assert!(text.starts_with("QUOTATION"));
        assert!(!text.contains("Shipping"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_invoice()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["number"], "INV-0042");
        assert_eq!(value["kind"], "invoice");
        assert_eq!(value["totals"]["grandTotal"], 145.75);
        assert_eq!(value["formatted"]["grandTotal"], "$145.75");
    }

    #[test]
    fn test_trim_number() {
        assert_eq!(trim_number(2.0), "2");
        assert_eq!(trim_number(2.5), "2.5");
        assert_eq!(trim_number(0.0), "0");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 6), "a ver…");
    }
}
