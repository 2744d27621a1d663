//! Pricing Module
//!
//! This module derives all monetary figures for quotes and sales: the
//! quantity-tier discount defaults, per-line totals, and the document-level
//! cascade (subtotal, tax, extra amount, local-currency total).

mod discount;
mod document_calculator;
mod money;

pub use discount::*;
pub use document_calculator::*;
pub use money::*;
