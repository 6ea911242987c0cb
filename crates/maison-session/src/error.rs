//! Session error types.

use maison_commerce::CommerceError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;
use crate::submit::SubmissionError;

/// Errors surfaced by the session layer.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Domain-level failure (validation, transition, arithmetic).
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Cart storage backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Catalog backend failure.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Order submission failure; the cart is preserved for a manual retry.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// A submission is already in flight for this checkout.
    #[error("an order submission is already in progress")]
    SubmissionInFlight,
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::Storage(e.to_string())
    }
}

impl From<CatalogError> for SessionError {
    fn from(e: CatalogError) -> Self {
        SessionError::Catalog(e.to_string())
    }
}
