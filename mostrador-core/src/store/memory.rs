//! In-memory store implementation
//!
//! Reference implementation of the store contracts, used by tests and as
//! the executable description of what the desktop app's data-access layer
//! must provide. Documents round-trip through JSON to mirror the wire the
//! real backend uses - a snapshot that survives this store survives the IPC
//! boundary bit-for-bit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared::document::{DocumentKind, DocumentSnapshot};
use shared::models::{Client, Product};

use super::{CatalogStore, DocumentStore, StoreError};

/// In-memory catalog and document store
#[derive(Default)]
pub struct MemoryStore {
    clients: RwLock<Vec<Client>>,
    products: RwLock<Vec<Product>>,
    documents: RwLock<HashMap<(DocumentKind, String), serde_json::Value>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_clients(&self, clients: Vec<Client>) {
        *self.clients.write().await = clients;
    }

    pub async fn seed_products(&self, products: Vec<Product>) {
        *self.products.write().await = products;
    }

    fn allocate_id(&self, kind: DocumentKind) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let prefix = match kind {
            DocumentKind::Quote => "Q",
            DocumentKind::Sale => "S",
        };
        format!("{prefix}-{n:04}")
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.clients.read().await.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        kind: DocumentKind,
        id: &str,
    ) -> Result<DocumentSnapshot, StoreError> {
        let documents = self.documents.read().await;
        let value = documents
            .get(&(kind, id.to_string()))
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    async fn create_document(
        &self,
        kind: DocumentKind,
        document: &DocumentSnapshot,
    ) -> Result<String, StoreError> {
        let id = self.allocate_id(kind);
        let mut stored = document.clone();
        stored.id = Some(id.clone());
        let value = serde_json::to_value(&stored)?;
        self.documents
            .write()
            .await
            .insert((kind, id.clone()), value);
        Ok(id)
    }

    async fn update_document(
        &self,
        kind: DocumentKind,
        id: &str,
        document: &DocumentSnapshot,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let key = (kind, id.to_string());
        if !documents.contains_key(&key) {
            return Err(StoreError::DocumentNotFound(id.to_string()));
        }
        let mut stored = document.clone();
        stored.id = Some(id.to_string());
        documents.insert(key, serde_json::to_value(&stored)?);
        Ok(())
    }

    async fn delete_document(&self, kind: DocumentKind, id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        documents
            .remove(&(kind, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))
    }
}
