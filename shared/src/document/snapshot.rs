//! Document snapshot - header, items, and derived totals
//!
//! Derived totals are recomputed by the pricing core after every edit; they
//! are never hand-edited. `total_local` stays `None` until a valid exchange
//! rate is set, so the UI renders "not computed" instead of a fabricated
//! number.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{DocumentKind, DocumentStatus, ItemSnapshot, PaymentStatus};

/// Document snapshot - a quote or sale being drafted, or loaded for edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSnapshot {
    /// Document ID (assigned by the data-access layer on create)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: DocumentKind,
    /// Client reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Tax percentage (e.g. 21 for 21% IVA); absent means no tax line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
    /// Flat amount added after tax (quotes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_amount: Option<f64>,
    /// Multiplier from document currency to local currency; must be positive
    /// for the local total to be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    pub status: DocumentStatus,
    pub payment_status: PaymentStatus,
    /// Line items, ordered for display (order is irrelevant to totals)
    pub items: Vec<ItemSnapshot>,
    /// Document note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    // === Derived totals ===
    pub subtotal: f64,
    pub tax_amount: f64,
    /// Total in document currency
    pub total: f64,
    /// Total in local currency; `None` until a valid exchange rate is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_local: Option<f64>,

    pub created_at: i64,
    pub updated_at: i64,
}

impl DocumentSnapshot {
    /// Create a new empty document
    pub fn new(kind: DocumentKind) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: None,
            kind,
            client_id: None,
            date: None,
            tax_percent: None,
            extra_amount: None,
            exchange_rate: None,
            status: DocumentStatus::default(),
            payment_status: PaymentStatus::default(),
            items: Vec::new(),
            note: None,
            subtotal: 0.0,
            tax_amount: 0.0,
            total: 0.0,
            total_local: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_quote(&self) -> bool {
        self.kind == DocumentKind::Quote
    }

    /// Find a line item by its instance ID
    pub fn find_item(&self, line_id: &str) -> Option<&ItemSnapshot> {
        self.items.iter().find(|i| i.line_id == line_id)
    }

    /// Find a line item by its instance ID, mutably
    pub fn find_item_mut(&mut self, line_id: &str) -> Option<&mut ItemSnapshot> {
        self.items.iter_mut().find(|i| i.line_id == line_id)
    }
}
