//! Draft edit events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::document::{ItemChanges, ItemInput};

/// Discrete edit events accepted by the draft editor
///
/// The form submits one event per user action. Item events recompute the
/// affected line total; header events only re-aggregate. `AddItem` is the
/// strict path - everything else recomputes permissively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftEdit {
    AddItem { item: ItemInput },
    RemoveItem { line_id: String },
    UpdateItem { line_id: String, changes: ItemChanges },
    SetClient { client_id: Option<i64> },
    SetDate { date: Option<NaiveDate> },
    SetTaxPercent { tax_percent: Option<f64> },
    /// Quotes only; sales have no extra amount
    SetExtraAmount { extra_amount: Option<f64> },
    SetExchangeRate { exchange_rate: Option<f64> },
    SetNote { note: Option<String> },
}
