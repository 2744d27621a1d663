//! Quote to sale import
//!
//! Restates a quote's line items and header into a sale draft. Committed
//! line totals are preserved verbatim - the client already agreed to them -
//! while product unit prices are restated as line_total / quantity so the
//! quote's discount stays baked into the sale's price basis.

use shared::document::{DocumentKind, DocumentSnapshot, ItemDetail, ItemSnapshot};
use shared::error::{ValidationError, ValidationResult};
use tracing::debug;

use super::draft::DocumentDraft;
use crate::pricing::{to_decimal, to_f64};

/// Map a quote into a sale draft
///
/// Carried over: client, tax percent, exchange rate, and every line item.
/// Not carried over: the document ID (the sale gets its own on save), the
/// status and payment fields (reset), and the extra amount (sales have no
/// equivalent). The returned draft is already re-aggregated; a quote with
/// zero items maps to a valid empty draft and submit validation blocks the
/// save.
pub fn quote_to_sale_draft(quote: &DocumentSnapshot) -> ValidationResult<DocumentDraft> {
    if quote.kind != DocumentKind::Quote {
        return Err(ValidationError::invalid_operation(
            "only quotes can be imported into a sale",
        ));
    }

    let mut sale = DocumentSnapshot::new(DocumentKind::Sale);
    sale.client_id = quote.client_id;
    sale.tax_percent = quote.tax_percent;
    sale.exchange_rate = quote.exchange_rate;

    for item in &quote.items {
        let mut mapped = match &item.detail {
            ItemDetail::Product {
                product_id,
                code,
                description,
                discount_percent,
            } => {
                // Restate the unit price from the committed total; fall back
                // to the stored price when the quantity cannot divide it.
                let unit_price = if item.quantity.is_finite() && item.quantity > 0.0 {
                    to_f64(to_decimal(item.line_total) / to_decimal(item.quantity))
                } else {
                    item.unit_price
                };
                ItemSnapshot::new(
                    ItemDetail::Product {
                        product_id: *product_id,
                        code: code.clone(),
                        description: description.clone(),
                        discount_percent: *discount_percent,
                    },
                    item.quantity,
                    unit_price,
                    item.line_total,
                )
            }
            ItemDetail::Custom { description } => ItemSnapshot::new(
                ItemDetail::Custom {
                    description: description.clone(),
                },
                item.quantity,
                item.unit_price,
                item.line_total,
            ),
        };
        mapped.note = item.note.clone();
        sale.items.push(mapped);
    }

    let draft = DocumentDraft::open(sale);
    debug!(
        quote_id = ?quote.id,
        items = draft.snapshot().items.len(),
        total = draft.snapshot().total,
        "[Import] quote mapped to sale draft"
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{DocumentDraft, DraftEdit};
    use shared::document::{DocumentStatus, ItemChanges, ItemInput, PaymentStatus};
    use shared::error::ValidationCode;

    fn quote_with_discounted_item() -> DocumentSnapshot {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        draft
            .apply(DraftEdit::AddItem {
                item: ItemInput::Product {
                    product_id: 42,
                    code: "P-042".to_string(),
                    description: "Widget".to_string(),
                    quantity: 10.0,
                    unit_price: 2.0,
                    discount_percent: None,
                    note: None,
                },
            })
            .unwrap();
        draft
            .apply(DraftEdit::AddItem {
                item: ItemInput::Custom {
                    description: "Installation".to_string(),
                    quantity: 1.0,
                    unit_price: 35.5,
                    note: None,
                },
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetClient { client_id: Some(7) })
            .unwrap();
        draft
            .apply(DraftEdit::SetTaxPercent {
                tax_percent: Some(21.0),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetExtraAmount {
                extra_amount: Some(5.0),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: Some(1000.0),
            })
            .unwrap();
        let mut snapshot = draft.into_snapshot();
        snapshot.id = Some("Q-0009".to_string());
        snapshot.status = DocumentStatus::Accepted;
        snapshot
    }

    #[test]
    fn test_import_preserves_committed_totals() {
        let quote = quote_with_discounted_item();
        // Tier discount of 5% committed 19.00 on the product line
        assert_eq!(quote.items[0].line_total, 19.0);

        let draft = quote_to_sale_draft(&quote).unwrap();
        let sale = draft.snapshot();

        let product = &sale.items[0];
        assert_eq!(product.unit_price, 1.9); // 19.00 / 10
        assert_eq!(product.line_total, 19.0); // not recomputed
        assert_eq!(product.discount_percent(), Some(5.0));

        let custom = &sale.items[1];
        assert_eq!(custom.unit_price, 35.5);
        assert_eq!(custom.line_total, 35.5);
    }

    #[test]
    fn test_import_header_carry_over_and_resets() {
        let quote = quote_with_discounted_item();
        let draft = quote_to_sale_draft(&quote).unwrap();
        let sale = draft.snapshot();

        assert_eq!(sale.kind, DocumentKind::Sale);
        assert_eq!(sale.client_id, Some(7));
        assert_eq!(sale.tax_percent, Some(21.0));
        assert_eq!(sale.exchange_rate, Some(1000.0));
        // The sale gets its own identity and state
        assert_eq!(sale.id, None);
        assert_eq!(sale.status, DocumentStatus::Unset);
        assert_eq!(sale.payment_status, PaymentStatus::Unset);
        assert_eq!(sale.extra_amount, None);
    }

    #[test]
    fn test_import_reaggregates_without_quote_extra() {
        let quote = quote_with_discounted_item();
        // Quote cascade includes the extra amount
        assert_eq!(quote.subtotal, 54.5);
        assert_eq!(quote.tax_amount, 11.45);
        assert_eq!(quote.total, 70.95);

        let draft = quote_to_sale_draft(&quote).unwrap();
        let sale = draft.snapshot();
        // Same items, same tax - but no extra amount in the sale cascade
        assert_eq!(sale.subtotal, 54.5);
        assert_eq!(sale.tax_amount, 11.45);
        assert_eq!(sale.total, 65.95);
        assert_eq!(sale.total_local, Some(65_950.0));
    }

    #[test]
    fn test_import_zero_quantity_falls_back_to_stored_price() {
        let mut quote = quote_with_discounted_item();
        quote.items[0].quantity = 0.0;

        let draft = quote_to_sale_draft(&quote).unwrap();
        assert_eq!(draft.snapshot().items[0].unit_price, 2.0);
    }

    #[test]
    fn test_import_empty_quote_yields_valid_empty_draft() {
        let quote = DocumentSnapshot::new(DocumentKind::Quote);
        let mut draft = quote_to_sale_draft(&quote).unwrap();
        assert!(draft.snapshot().items.is_empty());

        // Blocking the save is the caller's job, through submit validation
        let err = draft.begin_save().unwrap_err();
        assert_eq!(err.code, ValidationCode::MissingRequiredField);
    }

    #[test]
    fn test_import_rejects_non_quote_source() {
        let sale = DocumentSnapshot::new(DocumentKind::Sale);
        let err = quote_to_sale_draft(&sale).unwrap_err();
        assert_eq!(err.code, ValidationCode::InvalidOperation);
    }

    #[test]
    fn test_imported_items_feed_the_edit_pipeline() {
        let quote = quote_with_discounted_item();
        let mut draft = quote_to_sale_draft(&quote).unwrap();
        let line_id = draft.snapshot().items[0].line_id.clone();

        // Editing the imported line re-enters the normal recompute path:
        // quantity 25 re-resolves the tier discount against the restated
        // unit price.
        draft
            .apply(DraftEdit::UpdateItem {
                line_id,
                changes: ItemChanges {
                    quantity: Some(25.0),
                    ..Default::default()
                },
            })
            .unwrap();

        let item = &draft.snapshot().items[0];
        assert_eq!(item.discount_percent(), Some(10.0));
        assert_eq!(item.line_total, 42.75); // 25 x 1.90 x 0.90
    }
}
