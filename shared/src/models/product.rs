//! Product Model

use serde::{Deserialize, Serialize};

/// Product catalog entity
///
/// `code` and `description` are snapshotted into product line items when a
/// document is drafted, so saved documents keep displaying what was sold even
/// if the catalog entry changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub description: String,
    /// Unit price in document currency
    pub unit_price: f64,
    /// Units on hand (maintained by the stock module, not by pricing)
    pub stock: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
