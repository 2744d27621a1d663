//! Shared types for the Mostrador business-management app
//!
//! Common types used by the pricing core and its callers: catalog models,
//! document/line-item types, and the validation error system.

pub mod document;
pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use document::{
    DocumentKind, DocumentSnapshot, DocumentStatus, DraftPhase, EditorStatus, ItemChanges,
    ItemDetail, ItemInput, ItemSnapshot, PaymentStatus,
};
pub use error::{ValidationCode, ValidationError, ValidationResult};
