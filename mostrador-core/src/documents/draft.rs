//! Document draft editor
//!
//! Holds the in-memory snapshot of a document being edited and applies
//! discrete edit events. Every successful edit ends with a synchronous
//! totals recompute, so callers never observe stale totals; a failed edit
//! leaves the snapshot untouched.

use shared::document::{
    DocumentKind, DocumentSnapshot, DraftPhase, EditorStatus, ItemChanges, ItemDetail, ItemInput,
    ItemSnapshot,
};
use shared::error::{ValidationError, ValidationResult};
use tracing::debug;

use super::edits::DraftEdit;
use super::validate::{
    MAX_DESCRIPTION_LEN, MAX_NOTE_LEN, validate_for_submit, validate_item_input,
    validate_optional_text,
};
use crate::pricing::{
    calculate_line_total, compute_custom_line_total, compute_line_total, recalculate_totals,
    resolve_default_discount,
};

/// A document being edited in a form
///
/// One editor instance per open document; the surrounding app guarantees a
/// single editor at a time, so there is no shared state to coordinate.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    snapshot: DocumentSnapshot,
    status: EditorStatus,
}

impl DocumentDraft {
    /// Start a new empty document
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            snapshot: DocumentSnapshot::new(kind),
            status: EditorStatus::Editing,
        }
    }

    /// Open an existing document for editing
    ///
    /// Re-aggregates the header totals from the stored line totals; the line
    /// totals themselves stay as committed.
    pub fn open(mut snapshot: DocumentSnapshot) -> Self {
        recalculate_totals(&mut snapshot);
        Self {
            snapshot,
            status: EditorStatus::Editing,
        }
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> DocumentSnapshot {
        self.snapshot
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    /// Derived editing phase, for UI gating
    pub fn phase(&self) -> DraftPhase {
        if validate_for_submit(&self.snapshot).is_ok() {
            DraftPhase::Valid
        } else if self.snapshot.items.is_empty() {
            DraftPhase::Empty
        } else {
            DraftPhase::ItemsPending
        }
    }

    /// Apply a single edit event
    ///
    /// On success the snapshot's totals are already re-aggregated. On error
    /// nothing was applied.
    pub fn apply(&mut self, edit: DraftEdit) -> ValidationResult<()> {
        if self.status != EditorStatus::Editing {
            return Err(ValidationError::invalid_operation(format!(
                "draft is not editable (status {:?})",
                self.status
            )));
        }

        match edit {
            DraftEdit::AddItem { item } => self.add_item(item)?,
            DraftEdit::RemoveItem { line_id } => self.remove_item(&line_id)?,
            DraftEdit::UpdateItem { line_id, changes } => self.update_item(&line_id, changes)?,
            DraftEdit::SetClient { client_id } => self.snapshot.client_id = client_id,
            DraftEdit::SetDate { date } => self.snapshot.date = date,
            DraftEdit::SetTaxPercent { tax_percent } => self.snapshot.tax_percent = tax_percent,
            DraftEdit::SetExtraAmount { extra_amount } => {
                if !self.snapshot.is_quote() {
                    return Err(ValidationError::invalid_operation(
                        "sales have no extra amount",
                    ));
                }
                self.snapshot.extra_amount = extra_amount;
            }
            DraftEdit::SetExchangeRate { exchange_rate } => {
                self.snapshot.exchange_rate = exchange_rate;
            }
            DraftEdit::SetNote { note } => {
                validate_optional_text(&note, "note", MAX_NOTE_LEN)?;
                self.snapshot.note = note;
            }
        }

        recalculate_totals(&mut self.snapshot);
        self.snapshot.updated_at = chrono::Utc::now().timestamp_millis();
        Ok(())
    }

    // ==================== Save transitions ====================

    /// Validate the draft and enter `Saving`
    ///
    /// Entered only on explicit user submit; a validation error blocks the
    /// transition and the draft stays editable.
    pub fn begin_save(&mut self) -> ValidationResult<()> {
        if self.status != EditorStatus::Editing {
            return Err(ValidationError::invalid_operation(format!(
                "cannot begin save (status {:?})",
                self.status
            )));
        }
        validate_for_submit(&self.snapshot)?;
        self.status = EditorStatus::Saving;
        Ok(())
    }

    /// Record a successful save with the store-assigned document ID
    pub fn mark_saved(&mut self, id: String) -> ValidationResult<()> {
        if self.status != EditorStatus::Saving {
            return Err(ValidationError::invalid_operation(
                "no save in progress to complete",
            ));
        }
        self.snapshot.id = Some(id);
        self.status = EditorStatus::Saved;
        Ok(())
    }

    /// Return to editing after a failed save; the draft is retained
    /// unchanged for resubmission
    pub fn mark_save_failed(&mut self) -> ValidationResult<()> {
        if self.status != EditorStatus::Saving {
            return Err(ValidationError::invalid_operation(
                "no save in progress to fail",
            ));
        }
        self.status = EditorStatus::Editing;
        Ok(())
    }

    // ==================== Item edits ====================

    fn add_item(&mut self, input: ItemInput) -> ValidationResult<()> {
        validate_item_input(&input)?;

        let item = match input {
            ItemInput::Product {
                product_id,
                code,
                description,
                quantity,
                unit_price,
                discount_percent,
                note,
            } => {
                // Manual discount wins at add time; otherwise the quantity
                // tiers decide.
                let discount = match discount_percent {
                    Some(d) => d,
                    None => resolve_default_discount(quantity),
                };
                let line_total = compute_line_total(quantity, unit_price, discount);
                let mut item = ItemSnapshot::new(
                    ItemDetail::Product {
                        product_id,
                        code,
                        description,
                        discount_percent: discount,
                    },
                    quantity,
                    unit_price,
                    line_total,
                );
                item.note = note;
                item
            }
            ItemInput::Custom {
                description,
                quantity,
                unit_price,
                note,
            } => {
                let line_total = compute_custom_line_total(quantity, unit_price);
                let mut item = ItemSnapshot::new(
                    ItemDetail::Custom { description },
                    quantity,
                    unit_price,
                    line_total,
                );
                item.note = note;
                item
            }
        };

        debug!(
            line_id = %item.line_id,
            quantity = item.quantity,
            unit_price = item.unit_price,
            line_total = item.line_total,
            "[Draft] item added"
        );
        self.snapshot.items.push(item);
        Ok(())
    }

    fn remove_item(&mut self, line_id: &str) -> ValidationResult<()> {
        let before = self.snapshot.items.len();
        self.snapshot.items.retain(|i| i.line_id != line_id);
        if self.snapshot.items.len() == before {
            return Err(ValidationError::item_not_found(line_id));
        }
        debug!(line_id, "[Draft] item removed");
        Ok(())
    }

    fn update_item(&mut self, line_id: &str, changes: ItemChanges) -> ValidationResult<()> {
        let idx = self
            .snapshot
            .items
            .iter()
            .position(|i| i.line_id == line_id)
            .ok_or_else(|| ValidationError::item_not_found(line_id))?;

        // Kind and text checks run before any mutation, so a rejected edit
        // leaves the line untouched.
        {
            let item = &self.snapshot.items[idx];
            if changes.description.is_some() && item.is_product() {
                return Err(ValidationError::invalid_operation(
                    "catalog lines keep their product description",
                ));
            }
            if changes.discount_percent.is_some() && !item.is_product() {
                return Err(ValidationError::invalid_operation(
                    "custom lines have no discount",
                ));
            }
        }
        if let Some(desc) = &changes.description
            && desc.trim().is_empty()
        {
            return Err(ValidationError::missing_required_field("description"));
        }
        validate_optional_text(&changes.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&changes.note, "note", MAX_NOTE_LEN)?;

        let item = &mut self.snapshot.items[idx];

        if let Some(quantity) = changes.quantity {
            item.quantity = quantity;
            // Quantity change re-resolves the tier default, silently
            // replacing any manual discount entered since the last change.
            if let ItemDetail::Product {
                discount_percent, ..
            } = &mut item.detail
            {
                *discount_percent = resolve_default_discount(quantity);
            }
        }
        if let Some(unit_price) = changes.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(discount) = changes.discount_percent {
            // An explicit discount edit in the same event overrides the tier
            // default. Live edits clamp; strict rejection is add-time only.
            if let ItemDetail::Product {
                discount_percent, ..
            } = &mut item.detail
            {
                *discount_percent = if discount.is_finite() {
                    discount.clamp(0.0, 100.0)
                } else {
                    0.0
                };
            }
        }
        if let Some(description) = changes.description
            && let ItemDetail::Custom { description: d } = &mut item.detail
        {
            *d = description;
        }
        if let Some(note) = changes.note {
            item.note = if note.is_empty() { None } else { Some(note) };
        }

        item.line_total = calculate_line_total(item);
        debug!(
            line_id = %item.line_id,
            line_total = item.line_total,
            "[Draft] line updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ValidationCode;

    fn product_input(quantity: f64, unit_price: f64, discount: Option<f64>) -> ItemInput {
        ItemInput::Product {
            product_id: 1,
            code: "P-001".to_string(),
            description: "Widget".to_string(),
            quantity,
            unit_price,
            discount_percent: discount,
            note: None,
        }
    }

    fn draft_with_item(input: ItemInput) -> (DocumentDraft, String) {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        draft.apply(DraftEdit::AddItem { item: input }).unwrap();
        let line_id = draft.snapshot().items[0].line_id.clone();
        (draft, line_id)
    }

    #[test]
    fn test_add_item_resolves_tier_discount() {
        let (draft, _) = draft_with_item(product_input(10.0, 2.0, None));
        let item = &draft.snapshot().items[0];
        assert_eq!(item.discount_percent(), Some(5.0));
        assert_eq!(item.line_total, 19.0);
        assert_eq!(draft.snapshot().subtotal, 19.0);
    }

    #[test]
    fn test_add_item_manual_discount_wins() {
        let (draft, _) = draft_with_item(product_input(10.0, 2.0, Some(50.0)));
        let item = &draft.snapshot().items[0];
        assert_eq!(item.discount_percent(), Some(50.0));
        assert_eq!(item.line_total, 10.0);
    }

    #[test]
    fn test_add_item_rejection_leaves_list_untouched() {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        let err = draft
            .apply(DraftEdit::AddItem {
                item: product_input(1.0, 2.0, Some(150.0)),
            })
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::InvalidDiscountRange);
        assert!(draft.snapshot().items.is_empty());
        assert_eq!(draft.snapshot().subtotal, 0.0);
    }

    #[test]
    fn test_quantity_change_clobbers_manual_discount() {
        // Manual 50% on a qty=1 line (tier says 0), then quantity moves to
        // 10 (tier says 5): the manual value is replaced by the formula.
        let (mut draft, line_id) = draft_with_item(product_input(1.0, 2.0, Some(50.0)));
        assert_eq!(draft.snapshot().items[0].discount_percent(), Some(50.0));

        draft
            .apply(DraftEdit::UpdateItem {
                line_id,
                changes: ItemChanges {
                    quantity: Some(10.0),
                    ..Default::default()
                },
            })
            .unwrap();

        let item = &draft.snapshot().items[0];
        assert_eq!(item.discount_percent(), Some(5.0));
        assert_eq!(item.line_total, 19.0);
    }

    #[test]
    fn test_discount_edit_survives_until_next_quantity_change() {
        let (mut draft, line_id) = draft_with_item(product_input(10.0, 2.0, None));

        draft
            .apply(DraftEdit::UpdateItem {
                line_id: line_id.clone(),
                changes: ItemChanges {
                    discount_percent: Some(30.0),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(draft.snapshot().items[0].discount_percent(), Some(30.0));

        // Price edit does not re-resolve the tier default
        draft
            .apply(DraftEdit::UpdateItem {
                line_id,
                changes: ItemChanges {
                    unit_price: Some(4.0),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(draft.snapshot().items[0].discount_percent(), Some(30.0));
        assert_eq!(draft.snapshot().items[0].line_total, 28.0);
    }

    #[test]
    fn test_live_discount_edit_clamps_instead_of_rejecting() {
        let (mut draft, line_id) = draft_with_item(product_input(4.0, 25.0, None));

        draft
            .apply(DraftEdit::UpdateItem {
                line_id,
                changes: ItemChanges {
                    discount_percent: Some(150.0),
                    ..Default::default()
                },
            })
            .unwrap();

        let item = &draft.snapshot().items[0];
        assert_eq!(item.discount_percent(), Some(100.0));
        assert_eq!(item.line_total, 0.0);
    }

    #[test]
    fn test_custom_line_rejects_discount_edit() {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        draft
            .apply(DraftEdit::AddItem {
                item: ItemInput::Custom {
                    description: "Setup fee".to_string(),
                    quantity: 1.0,
                    unit_price: 40.0,
                    note: None,
                },
            })
            .unwrap();
        let line_id = draft.snapshot().items[0].line_id.clone();

        let err = draft
            .apply(DraftEdit::UpdateItem {
                line_id,
                changes: ItemChanges {
                    discount_percent: Some(10.0),
                    ..Default::default()
                },
            })
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::InvalidOperation);
        assert_eq!(draft.snapshot().items[0].line_total, 40.0);
    }

    #[test]
    fn test_remove_item_recomputes_totals() {
        let (mut draft, line_id) = draft_with_item(product_input(10.0, 2.0, None));
        draft
            .apply(DraftEdit::RemoveItem { line_id })
            .unwrap();
        assert!(draft.snapshot().items.is_empty());
        assert_eq!(draft.snapshot().subtotal, 0.0);
        assert_eq!(draft.snapshot().total, 0.0);

        let err = draft
            .apply(DraftEdit::RemoveItem {
                line_id: "missing".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::ItemNotFound);
    }

    #[test]
    fn test_header_edits_recompute_cascade() {
        let (mut draft, _) = draft_with_item(product_input(10.0, 10.0, Some(0.0)));
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
        assert_eq!(draft.snapshot().tax_amount, 21.0);
        assert_eq!(draft.snapshot().total, 126.0);
        assert_eq!(draft.snapshot().total_local, None);

        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: Some(1000.0),
            })
            .unwrap();
        assert_eq!(draft.snapshot().total_local, Some(126_000.0));

        // Clearing the rate un-computes the local total instead of zeroing it
        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: None,
            })
            .unwrap();
        assert_eq!(draft.snapshot().total_local, None);
    }

    #[test]
    fn test_extra_amount_rejected_on_sales() {
        let mut draft = DocumentDraft::new(DocumentKind::Sale);
        let err = draft
            .apply(DraftEdit::SetExtraAmount {
                extra_amount: Some(5.0),
            })
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::InvalidOperation);
    }

    #[test]
    fn test_phase_progression() {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        assert_eq!(draft.phase(), DraftPhase::Empty);

        draft
            .apply(DraftEdit::AddItem {
                item: product_input(2.0, 10.0, None),
            })
            .unwrap();
        assert_eq!(draft.phase(), DraftPhase::ItemsPending);

        draft
            .apply(DraftEdit::SetClient { client_id: Some(3) })
            .unwrap();
        draft
            .apply(DraftEdit::SetDate {
                date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: Some(1185.5),
            })
            .unwrap();
        assert_eq!(draft.phase(), DraftPhase::Valid);
    }

    #[test]
    fn test_save_state_machine() {
        let mut draft = DocumentDraft::new(DocumentKind::Quote);
        // Empty drafts cannot enter Saving
        let err = draft.begin_save().unwrap_err();
        assert_eq!(err.code, ValidationCode::MissingRequiredField);
        assert_eq!(draft.status(), EditorStatus::Editing);

        draft
            .apply(DraftEdit::AddItem {
                item: product_input(2.0, 10.0, None),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetClient { client_id: Some(3) })
            .unwrap();
        draft
            .apply(DraftEdit::SetDate {
                date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: Some(1000.0),
            })
            .unwrap();

        draft.begin_save().unwrap();
        assert_eq!(draft.status(), EditorStatus::Saving);

        // No edits while a save is in flight
        let err = draft
            .apply(DraftEdit::SetClient { client_id: None })
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::InvalidOperation);

        // Failed save returns to Editing with the draft retained
        draft.mark_save_failed().unwrap();
        assert_eq!(draft.status(), EditorStatus::Editing);
        assert_eq!(draft.snapshot().items.len(), 1);

        draft.begin_save().unwrap();
        draft.mark_saved("Q-0001".to_string()).unwrap();
        assert_eq!(draft.status(), EditorStatus::Saved);
        assert_eq!(draft.snapshot().id.as_deref(), Some("Q-0001"));
    }

    #[test]
    fn test_empty_submit_always_reports_empty_item_list() {
        let mut draft = DocumentDraft::new(DocumentKind::Sale);
        draft
            .apply(DraftEdit::SetClient { client_id: Some(1) })
            .unwrap();
        draft
            .apply(DraftEdit::SetDate {
                date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1),
            })
            .unwrap();
        draft
            .apply(DraftEdit::SetExchangeRate {
                exchange_rate: Some(1.0),
            })
            .unwrap();

        let err = draft.begin_save().unwrap_err();
        assert_eq!(err.code, ValidationCode::EmptyItemList);
    }
}
