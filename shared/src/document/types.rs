//! Shared types for document line items and draft editing

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Product;

// ============================================================================
// Document Kind / Status
// ============================================================================

/// Document kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Non-binding priced offer, convertible into a sale
    Quote,
    /// Binding invoiced transaction
    Sale,
}

/// Document lifecycle status
///
/// Carried through by the pricing core, never computed by it. Importing a
/// quote into a sale resets this to `Unset`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    Unset,
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

/// Payment status
///
/// Opaque to the pricing core, same passthrough contract as [`DocumentStatus`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unset,
    Unpaid,
    Partial,
    Paid,
}

// ============================================================================
// Editor State
// ============================================================================

/// Editor status for a document draft
///
/// `Saving` is entered only on explicit submit and always resolves back to
/// `Saved` or `Editing`; there are no timer-driven transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorStatus {
    #[default]
    Editing,
    Saving,
    Saved,
}

/// Derived editing phase, for UI gating (e.g. enabling the save button)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftPhase {
    /// No items yet
    Empty,
    /// Has items but required header fields are still missing
    ItemsPending,
    /// Would pass submit validation
    Valid,
}

// ============================================================================
// Line Item Types
// ============================================================================

/// Variant-specific line item fields
///
/// The `kind` tag is the sole discriminant between catalog and free-text
/// items; a line can never carry both a product reference and a custom
/// description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemDetail {
    /// Catalog product line
    Product {
        /// Catalog reference (not owned by the document)
        product_id: i64,
        /// Code snapshot for display
        code: String,
        /// Description snapshot for display
        description: String,
        /// Discount percentage (0-100): quantity-tier default, or a manual
        /// override that survives until the next quantity change
        discount_percent: f64,
    },
    /// Free-text charge, no catalog reference and no discount concept
    Custom { description: String },
}

/// Line item snapshot - one priced entry in a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSnapshot {
    /// Line instance ID, assigned when the item enters a draft
    pub line_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Line total (computed, persisted; never re-rounded on display)
    pub line_total: f64,
    #[serde(flatten)]
    pub detail: ItemDetail,
    /// Line note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ItemSnapshot {
    /// Create a snapshot with a fresh line ID
    pub fn new(detail: ItemDetail, quantity: f64, unit_price: f64, line_total: f64) -> Self {
        Self {
            line_id: Uuid::new_v4().to_string(),
            quantity,
            unit_price,
            line_total,
            detail,
            note: None,
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self.detail, ItemDetail::Product { .. })
    }

    /// Discount percentage, if this line kind has one
    pub fn discount_percent(&self) -> Option<f64> {
        match &self.detail {
            ItemDetail::Product {
                discount_percent, ..
            } => Some(*discount_percent),
            ItemDetail::Custom { .. } => None,
        }
    }

    /// Display description for either kind
    pub fn description(&self) -> &str {
        match &self.detail {
            ItemDetail::Product { description, .. } => description,
            ItemDetail::Custom { description } => description,
        }
    }
}

/// Line item input - what the form submits on "add item"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemInput {
    Product {
        product_id: i64,
        code: String,
        description: String,
        quantity: f64,
        unit_price: f64,
        /// Manual discount override; `None` resolves from the quantity tiers
        #[serde(skip_serializing_if = "Option::is_none")]
        discount_percent: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    Custom {
        description: String,
        quantity: f64,
        unit_price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
}

impl ItemInput {
    /// Build a product input from a catalog entry
    pub fn from_product(product: &Product, quantity: f64) -> Self {
        Self::Product {
            product_id: product.id,
            code: product.code.clone(),
            description: product.description.clone(),
            quantity,
            unit_price: product.unit_price,
            discount_percent: None,
            note: None,
        }
    }

    pub fn quantity(&self) -> f64 {
        match self {
            Self::Product { quantity, .. } | Self::Custom { quantity, .. } => *quantity,
        }
    }

    pub fn unit_price(&self) -> f64 {
        match self {
            Self::Product { unit_price, .. } | Self::Custom { unit_price, .. } => *unit_price,
        }
    }
}

/// Partial line item update - the edit form patches one field at a time
///
/// `None` means "no change"; an all-`None` value is a valid no-op.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Manual discount percentage (product lines only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    /// Free-text description (custom lines only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
