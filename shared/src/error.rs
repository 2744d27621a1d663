//! Validation error system
//!
//! Every rejected user action carries a [`ValidationCode`] (machine-checkable,
//! stable across the API boundary) plus a human-readable message. The UI is
//! responsible for presentation and localization; this crate only guarantees
//! a stable code and a usable reason string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable validation error codes
///
/// Serialized as SCREAMING_SNAKE_CASE strings so the desktop front end can
/// match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// Client, date, or exchange rate absent at submit time
    MissingRequiredField,
    /// Quantity non-numeric or outside the allowed range
    InvalidQuantity,
    /// Unit price non-numeric or outside the allowed range
    InvalidUnitPrice,
    /// Manually entered discount outside [0, 100] at add time
    InvalidDiscountRange,
    /// Attempt to submit a document with zero items
    EmptyItemList,
    /// A derived total computed to a non-finite number (defensive; indicates
    /// malformed upstream data, never a normal user-facing path)
    NonNumericDerivedTotal,
    /// Referenced line item does not exist in the draft
    ItemNotFound,
    /// Edit not applicable to the target (wrong item kind, wrong document
    /// kind, editor not in an editable state, text too long)
    InvalidOperation,
}

/// Validation error with structured code and message
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// The code identifying the type of error
    pub code: ValidationCode,
    /// Human-readable error message
    pub message: String,
}

/// Result alias for validation-fallible operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
    /// Create a new error with an explicit code and message
    pub fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    // ==================== Convenience constructors ====================

    pub fn missing_required_field(field: &str) -> Self {
        Self::new(
            ValidationCode::MissingRequiredField,
            format!("{field} is required"),
        )
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::new(ValidationCode::InvalidQuantity, msg)
    }

    pub fn invalid_unit_price(msg: impl Into<String>) -> Self {
        Self::new(ValidationCode::InvalidUnitPrice, msg)
    }

    pub fn invalid_discount_range(value: f64) -> Self {
        Self::new(
            ValidationCode::InvalidDiscountRange,
            format!("discount must be between 0 and 100, got {value}"),
        )
    }

    pub fn empty_item_list() -> Self {
        Self::new(
            ValidationCode::EmptyItemList,
            "document must contain at least one item",
        )
    }

    pub fn non_numeric_total(field: &str) -> Self {
        Self::new(
            ValidationCode::NonNumericDerivedTotal,
            format!("{field} computed to a non-numeric value"),
        )
    }

    pub fn item_not_found(line_id: &str) -> Self {
        Self::new(
            ValidationCode::ItemNotFound,
            format!("line item not found: {line_id}"),
        )
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::new(ValidationCode::InvalidOperation, msg)
    }
}
