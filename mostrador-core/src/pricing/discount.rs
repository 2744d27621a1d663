//! Quantity discount tiers
//!
//! Catalog lines get an automatic discount from fixed quantity breakpoints.
//! The default is re-resolved on every quantity change, silently replacing
//! any manually entered value; editing the discount field alone never
//! triggers re-resolution. Downstream forms rely on this behavior - it is
//! the contract, not a bug.

/// Discount tiers: (minimum quantity, discount percent), highest tier first
const DISCOUNT_TIERS: [(f64, f64); 3] = [(50.0, 12.0), (25.0, 10.0), (10.0, 5.0)];

/// Resolve the default discount percentage for a product quantity
///
/// Total over all inputs: non-finite or non-positive quantities resolve to 0.
pub fn resolve_default_discount(quantity: f64) -> f64 {
    if !quantity.is_finite() || quantity <= 0.0 {
        return 0.0;
    }
    for (min_quantity, percent) in DISCOUNT_TIERS {
        if quantity >= min_quantity {
            return percent;
        }
    }
    0.0
}
