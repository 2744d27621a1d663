//! Document totals
//!
//! Aggregates already-rounded line totals into the document-level cascade:
//! subtotal, tax amount, extra amount (quotes only), and the exchange-rate
//! gated local total. The aggregator never re-derives line totals from raw
//! quantity x price - that would double-round and drift from the committed
//! figures.

use rust_decimal::prelude::*;
use shared::document::{DocumentSnapshot, ItemSnapshot};
use shared::error::{ValidationError, ValidationResult};
use tracing::debug;

use super::money::{money_eq, round2, to_decimal, to_f64};

/// Derived document totals
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    /// Total in document currency
    pub total: f64,
    /// `None` when the exchange rate is absent or not a positive number
    pub total_local: Option<f64>,
}

/// Compute document totals from line items and header inputs
///
/// - `subtotal` sums the stored per-line totals
/// - `tax_amount = subtotal * tax_percent / 100` (absent tax contributes
///   nothing, not an error)
/// - `total = subtotal + tax_amount + extra_amount`
/// - `total_local = total * exchange_rate`, only when the rate is a finite
///   positive number; otherwise it stays uncomputed
///
/// Pure and idempotent: identical inputs yield identical outputs.
pub fn compute_document_totals(
    items: &[ItemSnapshot],
    tax_percent: Option<f64>,
    extra_amount: Option<f64>,
    exchange_rate: Option<f64>,
) -> DocumentTotals {
    let subtotal = round2(items.iter().map(|i| to_decimal(i.line_total)).sum());
    let tax_amount = round2(subtotal * to_decimal(tax_percent.unwrap_or(0.0)) / Decimal::ONE_HUNDRED);
    let extra = to_decimal(extra_amount.unwrap_or(0.0));
    let total = round2(subtotal + tax_amount + extra);

    let total_local = exchange_rate
        .filter(|r| r.is_finite() && *r > 0.0)
        .map(|r| to_f64(total * to_decimal(r)));

    DocumentTotals {
        subtotal: subtotal.to_f64().unwrap_or_default(),
        tax_amount: tax_amount.to_f64().unwrap_or_default(),
        total: total.to_f64().unwrap_or_default(),
        total_local,
    }
}

/// Recalculate a snapshot's derived totals in place
///
/// Line totals are taken as stored - they were committed when the line was
/// last mutated. Sales carry no extra amount even if one survived in the
/// header.
pub fn recalculate_totals(snapshot: &mut DocumentSnapshot) {
    let extra = if snapshot.is_quote() {
        snapshot.extra_amount
    } else {
        None
    };
    let totals = compute_document_totals(
        &snapshot.items,
        snapshot.tax_percent,
        extra,
        snapshot.exchange_rate,
    );

    debug!(
        items = snapshot.items.len(),
        subtotal = totals.subtotal,
        tax_amount = totals.tax_amount,
        total = totals.total,
        total_local = ?totals.total_local,
        "[Totals] document totals recalculated"
    );

    snapshot.subtotal = totals.subtotal;
    snapshot.tax_amount = totals.tax_amount;
    snapshot.total = totals.total;
    snapshot.total_local = totals.total_local;
}

/// Verify a loaded snapshot's stored totals against a fresh aggregation
///
/// For documents persisted by older builds: non-finite stored figures
/// surface as [`ValidationError::non_numeric_total`], and totals that drift
/// more than one cent from a recomputation are reported so the caller can
/// force a re-save.
pub fn verify_totals(snapshot: &DocumentSnapshot) -> ValidationResult<()> {
    for item in &snapshot.items {
        if !item.line_total.is_finite() {
            return Err(ValidationError::non_numeric_total("line total"));
        }
    }
    for (field, value) in [
        ("subtotal", snapshot.subtotal),
        ("tax amount", snapshot.tax_amount),
        ("total", snapshot.total),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::non_numeric_total(field));
        }
    }
    if let Some(local) = snapshot.total_local
        && !local.is_finite()
    {
        return Err(ValidationError::non_numeric_total("local total"));
    }

    let extra = if snapshot.is_quote() {
        snapshot.extra_amount
    } else {
        None
    };
    let fresh = compute_document_totals(
        &snapshot.items,
        snapshot.tax_percent,
        extra,
        snapshot.exchange_rate,
    );
    if !money_eq(fresh.subtotal, snapshot.subtotal)
        || !money_eq(fresh.tax_amount, snapshot.tax_amount)
        || !money_eq(fresh.total, snapshot.total)
    {
        return Err(ValidationError::invalid_operation(format!(
            "stored totals drift from recomputation (stored {}, recomputed {})",
            snapshot.total, fresh.total
        )));
    }
    Ok(())
}
