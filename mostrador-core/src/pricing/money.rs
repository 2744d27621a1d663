//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Each derived figure is rounded exactly
//! once, at the point it is produced; already-rounded values are never
//! re-rounded on display or aggregation.

use rust_decimal::prelude::*;
use shared::document::{ItemDetail, ItemSnapshot};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per line
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: f64 = 9_999.0;

/// Convert f64 to Decimal for calculation
///
/// Non-finite inputs convert to zero: during live recompute, absence means
/// "not priceable yet", never an error.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

/// Clamp a discount percentage into [0, 100]
///
/// Live recompute is permissive: out-of-range discounts are clamped, not
/// rejected. Strict rejection happens only at add-item validation.
fn clamp_discount(percent: f64) -> Decimal {
    to_decimal(percent).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Calculate a product line total with precise decimal arithmetic
///
/// Formula: quantity * unit_price * (1 - discount/100), rounded once.
pub fn compute_line_total(quantity: f64, unit_price: f64, discount_percent: f64) -> f64 {
    let qty = to_decimal(quantity);
    let price = to_decimal(unit_price);
    let multiplier = Decimal::ONE - clamp_discount(discount_percent) / Decimal::ONE_HUNDRED;
    to_f64(qty * price * multiplier)
}

/// Calculate a custom line total (free-text lines have no discount concept)
pub fn compute_custom_line_total(quantity: f64, unit_price: f64) -> f64 {
    to_f64(to_decimal(quantity) * to_decimal(unit_price))
}

/// Line total for a snapshot, dispatching on the item kind
///
/// Both paths round with the same strategy, so mixed documents stay
/// consistent.
pub fn calculate_line_total(item: &ItemSnapshot) -> f64 {
    match &item.detail {
        ItemDetail::Product {
            discount_percent, ..
        } => compute_line_total(item.quantity, item.unit_price, *discount_percent),
        ItemDetail::Custom { .. } => compute_custom_line_total(item.quantity, item.unit_price),
    }
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}
