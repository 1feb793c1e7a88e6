//! Store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors reported by the wish store.
///
/// All failures surface synchronously to the caller; the store never
/// retries and a failed persist leaves the in-memory state intact.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Wish not found: {0}")]
    NotFound(Uuid),

    #[error("Wish is already fulfilled: {0}")]
    AlreadyFulfilled(Uuid),

    #[error("Failed to persist wishes: {0}")]
    Persistence(String),
}
