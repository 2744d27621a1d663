//! Catalog models
//!
//! Read-only catalogs consumed by the pricing core. CRUD over these entities
//! is owned by the data-access layer; the core only snapshots fields into
//! document line items. All IDs are `i64`.

pub mod client;
pub mod product;

// Re-exports
pub use client::*;
pub use product::*;
