//! Collaborator contracts for the data-access layer
//!
//! The pricing core consumes these; it does not own their implementation.
//! The desktop app wires them to its persistence backend. Monetary fields
//! cross this boundary pre-rounded - implementations must not re-round.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use shared::document::{DocumentKind, DocumentSnapshot};
use shared::models::{Client, Product};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Read-only catalogs
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
}

/// CRUD over persisted documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load a full document with items, for edit or import
    async fn get_document(
        &self,
        kind: DocumentKind,
        id: &str,
    ) -> Result<DocumentSnapshot, StoreError>;

    /// Persist a new document and return its assigned ID
    async fn create_document(
        &self,
        kind: DocumentKind,
        document: &DocumentSnapshot,
    ) -> Result<String, StoreError>;

    async fn update_document(
        &self,
        kind: DocumentKind,
        id: &str,
        document: &DocumentSnapshot,
    ) -> Result<(), StoreError>;

    async fn delete_document(&self, kind: DocumentKind, id: &str) -> Result<(), StoreError>;
}
