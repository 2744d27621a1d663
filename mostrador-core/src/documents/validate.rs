//! Input validation for draft edits and submit
//!
//! Two deliberately different policies coexist here. Live recompute is
//! permissive: non-numeric quantities and prices contribute zero, and
//! out-of-range discounts are clamped. Explicit user actions - adding an
//! item, submitting the document - validate strictly and block. Do not unify
//! the two paths; the forms rely on both behaviors.

use shared::document::{DocumentSnapshot, ItemInput};
use shared::error::{ValidationError, ValidationResult};

use crate::pricing::{MAX_QUANTITY, MAX_UNIT_PRICE};

// ── Text length limits ──────────────────────────────────────────────

/// Line descriptions (catalog snapshot or free text)
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Notes on lines and documents
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub(crate) fn validate_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing_required_field(field));
    }
    if value.len() > max_len {
        return Err(ValidationError::invalid_operation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub(crate) fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> ValidationResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(ValidationError::invalid_operation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Add-item validation (strict path) ───────────────────────────────

/// Validate an item input at the moment the user submits "add item"
///
/// Unlike live recompute, this path rejects instead of coercing: a manual
/// discount of 150 is an error here even though the calculator would clamp
/// it to 100.
pub fn validate_item_input(input: &ItemInput) -> ValidationResult<()> {
    let quantity = input.quantity();
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::invalid_quantity(format!(
            "quantity must be a positive number, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::invalid_quantity(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }

    let unit_price = input.unit_price();
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(ValidationError::invalid_unit_price(format!(
            "unit price must be a non-negative number, got {unit_price}"
        )));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(ValidationError::invalid_unit_price(format!(
            "unit price exceeds maximum allowed ({MAX_UNIT_PRICE}), got {unit_price}"
        )));
    }

    match input {
        ItemInput::Product {
            discount_percent,
            note,
            ..
        } => {
            if let Some(d) = discount_percent
                && (!d.is_finite() || !(0.0..=100.0).contains(d))
            {
                return Err(ValidationError::invalid_discount_range(*d));
            }
            validate_optional_text(note, "note", MAX_NOTE_LEN)?;
        }
        ItemInput::Custom {
            description, note, ..
        } => {
            validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?;
            validate_optional_text(note, "note", MAX_NOTE_LEN)?;
        }
    }

    Ok(())
}

// ── Submit validation ───────────────────────────────────────────────

/// Validate a document at submit time
///
/// Header completeness, a non-empty item list, and (defensively) numeric
/// derived totals. Errors block the save; the draft is left untouched for
/// the user to correct and retry.
pub fn validate_for_submit(snapshot: &DocumentSnapshot) -> ValidationResult<()> {
    if snapshot.client_id.is_none() {
        return Err(ValidationError::missing_required_field("client"));
    }
    if snapshot.date.is_none() {
        return Err(ValidationError::missing_required_field("date"));
    }
    match snapshot.exchange_rate {
        None => return Err(ValidationError::missing_required_field("exchange rate")),
        Some(rate) if !rate.is_finite() || rate <= 0.0 => {
            return Err(ValidationError::new(
                shared::error::ValidationCode::MissingRequiredField,
                format!("exchange rate must be a positive number, got {rate}"),
            ));
        }
        Some(_) => {}
    }

    if snapshot.items.is_empty() {
        return Err(ValidationError::empty_item_list());
    }

    crate::pricing::verify_totals(snapshot)
}
