//! Draft persistence flow
//!
//! Bridges the synchronous editor to the async document store: validate,
//! enter `Saving`, hand the snapshot to the store, and resolve the attempt
//! either way.

use thiserror::Error;
use tracing::warn;

use shared::error::ValidationError;

use super::draft::DocumentDraft;
use crate::store::{DocumentStore, StoreError};

/// Errors from the save flow
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Persist a draft through the document store
///
/// Runs submit validation, enters `Saving`, and resolves to `Saved` with the
/// store-assigned ID - or back to `Editing` when the store fails, with the
/// draft retained unchanged for resubmission.
pub async fn save_draft(
    store: &dyn DocumentStore,
    draft: &mut DocumentDraft,
) -> Result<String, SaveError> {
    draft.begin_save()?;

    let snapshot = draft.snapshot().clone();
    let result = match &snapshot.id {
        Some(id) => store
            .update_document(snapshot.kind, id, &snapshot)
            .await
            .map(|_| id.clone()),
        None => store.create_document(snapshot.kind, &snapshot).await,
    };

    match result {
        Ok(id) => {
            draft.mark_saved(id.clone())?;
            Ok(id)
        }
        Err(e) => {
            warn!(error = %e, "[Draft] save failed, draft retained for resubmission");
            draft.mark_save_failed()?;
            Err(e.into())
        }
    }
}
