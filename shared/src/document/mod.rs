//! Document types for quote and sale drafting
//!
//! A document is a header plus a list of line items; all monetary fields are
//! computed by the pricing core and stored pre-rounded. The data-access layer
//! must not re-round them.

mod snapshot;
mod types;

pub use snapshot::*;
pub use types::*;
